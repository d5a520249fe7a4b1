// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use std::path::PathBuf;

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

pub const CRATE_NAME: &str = "statusboard-core";

pub const ENV_STATUSBOARD_BIND: &str = "STATUSBOARD_BIND";
pub const ENV_STATUSBOARD_DATA_DIR: &str = "STATUSBOARD_DATA_DIR";
pub const ENV_STATUSBOARD_STATE_PATH: &str = "STATUSBOARD_STATE_PATH";
pub const ENV_STATUSBOARD_URGENT_PATH: &str = "STATUSBOARD_URGENT_PATH";

pub const STATE_FILE_NAME: &str = "state.json";
pub const URGENT_FILE_NAME: &str = "urgent.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub state: PathBuf,
    pub urgent: PathBuf,
}

/// Resolves the two board documents.
///
/// Explicit per-file variables win over the data directory, which in turn
/// defaults to the working directory.
#[must_use]
pub fn resolve_data_paths() -> DataPaths {
    let dir = non_empty_env(ENV_STATUSBOARD_DATA_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    DataPaths {
        state: non_empty_env(ENV_STATUSBOARD_STATE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| dir.join(STATE_FILE_NAME)),
        urgent: non_empty_env(ENV_STATUSBOARD_URGENT_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| dir.join(URGENT_FILE_NAME)),
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    let raw = std::env::var(name).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_paths_default_to_working_directory() {
        // Runs with the variables unset in CI.
        if std::env::var_os(ENV_STATUSBOARD_DATA_DIR).is_some()
            || std::env::var_os(ENV_STATUSBOARD_STATE_PATH).is_some()
            || std::env::var_os(ENV_STATUSBOARD_URGENT_PATH).is_some()
        {
            return;
        }
        let paths = resolve_data_paths();
        assert_eq!(paths.state, PathBuf::from(".").join("state.json"));
        assert_eq!(paths.urgent, PathBuf::from(".").join("urgent.json"));
    }
}
