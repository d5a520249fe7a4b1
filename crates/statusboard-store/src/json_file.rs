// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use statusboard_model::{BoardState, UrgentMessage};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{BoardStore, StoreError};

/// The two flat JSON documents: the board record and the urgent message list.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    state_path: PathBuf,
    urgent_path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(state_path: PathBuf, urgent_path: PathBuf) -> Self {
        Self {
            state_path,
            urgent_path,
        }
    }

    #[must_use]
    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    #[must_use]
    pub fn urgent_path(&self) -> &Path {
        &self.urgent_path
    }

    /// Creates whichever document is missing; existing files are untouched.
    pub fn seed(&self, now: i64) -> Result<(), StoreError> {
        if !self.state_path.exists() {
            write_json_atomic(&self.state_path, &BoardState::initial(now))?;
            info!(path = %self.state_path.display(), "seeded state document");
        }
        if !self.urgent_path.exists() {
            write_json_atomic(&self.urgent_path, &Vec::<UrgentMessage>::new())?;
            info!(path = %self.urgent_path.display(), "seeded urgent document");
        }
        Ok(())
    }
}

/// `None` when the document is missing or malformed.
fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), "document read failed, using default: {e}");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(path = %path.display(), "document parse failed, using default: {e}");
            None
        }
    }
}

/// Writes a sibling temp file and renames it over the target.
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| StoreError(format!("create {} failed: {e}", parent.display())))?;
    }
    let bytes = serde_json::to_vec(value)
        .map_err(|e| StoreError(format!("encode {} failed: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| StoreError(format!("invalid document path: {}", path.display())))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, &bytes)
        .map_err(|e| StoreError(format!("write {} failed: {e}", tmp.display())))?;
    fs::rename(&tmp, path)
        .map_err(|e| StoreError(format!("rename into {} failed: {e}", path.display())))
}

fn check_document(path: &Path) -> Result<(), StoreError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => fs::File::open(path)
            .map(|_| ())
            .map_err(|e| StoreError(format!("{} unreadable: {e}", path.display()))),
        Ok(_) => Err(StoreError(format!("{} is not a file", path.display()))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError(format!("{} unreadable: {e}", path.display()))),
    }
}

#[async_trait]
impl BoardStore for JsonFileStore {
    fn backend_tag(&self) -> &'static str {
        "jsonfile"
    }

    async fn load_state(&self, now: i64) -> BoardState {
        read_json(&self.state_path).unwrap_or_else(|| BoardState::initial(now))
    }

    #[instrument(skip(self, state), fields(path = %self.state_path.display()))]
    async fn save_state(&self, state: &BoardState) -> Result<(), StoreError> {
        write_json_atomic(&self.state_path, state)
    }

    async fn load_urgent(&self) -> Vec<UrgentMessage> {
        read_json(&self.urgent_path).unwrap_or_default()
    }

    #[instrument(
        skip(self, messages),
        fields(path = %self.urgent_path.display(), count = messages.len())
    )]
    async fn save_urgent(&self, messages: &[UrgentMessage]) -> Result<(), StoreError> {
        write_json_atomic(&self.urgent_path, messages)
    }

    async fn check_readable(&self) -> Result<(), StoreError> {
        check_document(&self.state_path)?;
        check_document(&self.urgent_path)
    }
}
