// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::validation::{check_len, ValidationError, LOCATION_MAX_LEN, NOTE_MAX_LEN, STATUS_MAX_LEN};

pub const DEFAULT_STATUS: &str = "In Office";
pub const DEFAULT_LOCATION: &str = "Principal's Office";

/// The principal's current state as persisted in the state document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub status: String,
    pub location: String,
    #[serde(default)]
    pub note: String,
    pub since: i64,
}

impl BoardState {
    #[must_use]
    pub fn initial(now: i64) -> Self {
        Self {
            status: DEFAULT_STATUS.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            note: String::new(),
            since: now,
        }
    }

    /// Applies an admin update.
    ///
    /// An absent status falls back to [`DEFAULT_STATUS`] and an absent note
    /// clears the note, while an absent or empty location keeps the previous
    /// one.
    pub fn apply(&mut self, update: StatusUpdate, now: i64) {
        self.status = update.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
        if let Some(location) = update.location.filter(|l| !l.is_empty()) {
            self.location = location;
        }
        self.note = update.note.unwrap_or_default();
        self.since = now;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl StatusUpdate {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            ("status", self.status.as_deref(), STATUS_MAX_LEN),
            ("location", self.location.as_deref(), LOCATION_MAX_LEN),
            ("note", self.note.as_deref(), NOTE_MAX_LEN),
        ]
        .into_iter()
        .filter_map(|(field, value, max)| check_len(field, value?, max).err())
        .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
