// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::validation::{
    check_len, ValidationError, DESIGNATION_MAX_LEN, MESSAGE_MAX_LEN, NAME_MAX_LEN,
    REASON_MAX_LEN, REPLY_MAX_LEN,
};

pub const DEFAULT_REASON: &str = "Other";
pub const DEFAULT_STALE_MINUTES: u64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgentMessage {
    pub id: u64,
    pub reason: String,
    pub text: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub designation: String,
    pub time: i64,
    #[serde(default)]
    pub reply: Option<Reply>,
}

impl UrgentMessage {
    #[must_use]
    pub fn from_submission(id: u64, submission: UrgentSubmission, now: i64) -> Self {
        Self {
            id,
            reason: submission.reason,
            text: submission.text,
            name: submission.name,
            designation: submission.designation,
            time: now,
            reply: None,
        }
    }

    /// Active while at most `window` seconds old; the boundary is inclusive.
    #[must_use]
    pub fn is_active(&self, now: i64, window: ActivityWindow) -> bool {
        now.saturating_sub(self.time) <= window.secs()
    }

    pub fn set_reply(&mut self, text: String, now: i64) {
        self.reply = Some(Reply { text, time: now });
    }
}

/// A kiosk submission before the server assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrgentSubmission {
    pub reason: String,
    pub text: String,
    pub name: String,
    pub designation: String,
}

impl UrgentSubmission {
    /// Trims every field and substitutes [`DEFAULT_REASON`] for a blank reason.
    #[must_use]
    pub fn normalized(
        reason: Option<&str>,
        text: Option<&str>,
        name: Option<&str>,
        designation: Option<&str>,
    ) -> Self {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        Self {
            reason: reason.unwrap_or(DEFAULT_REASON).to_string(),
            text: text.map(str::trim).unwrap_or_default().to_string(),
            name: name.map(str::trim).unwrap_or_default().to_string(),
            designation: designation.map(str::trim).unwrap_or_default().to_string(),
        }
    }

    #[must_use]
    pub fn has_message(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            ("reason", self.reason.as_str(), REASON_MAX_LEN),
            ("message", self.text.as_str(), MESSAGE_MAX_LEN),
            ("name", self.name.as_str(), NAME_MAX_LEN),
            ("designation", self.designation.as_str(), DESIGNATION_MAX_LEN),
        ]
        .into_iter()
        .filter_map(|(field, value, max)| check_len(field, value, max).err())
        .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub fn validate_reply_text(text: &str) -> Result<(), ValidationError> {
    check_len("text", text, REPLY_MAX_LEN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    minutes: u64,
}

impl ActivityWindow {
    #[must_use]
    pub const fn from_minutes(minutes: u64) -> Self {
        Self { minutes }
    }

    #[must_use]
    pub const fn minutes(self) -> u64 {
        self.minutes
    }

    #[must_use]
    pub fn secs(self) -> i64 {
        i64::try_from(self.minutes.saturating_mul(60)).unwrap_or(i64::MAX)
    }
}

impl Default for ActivityWindow {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_STALE_MINUTES)
    }
}

/// Next id is one past the largest id ever stored, expired messages included.
///
/// `None` once the largest stored id is `u64::MAX`.
#[must_use]
pub fn next_message_id(messages: &[UrgentMessage]) -> Option<u64> {
    messages.iter().map(|m| m.id).max().unwrap_or(0).checked_add(1)
}

#[must_use]
pub fn active_messages(
    messages: &[UrgentMessage],
    now: i64,
    window: ActivityWindow,
) -> Vec<UrgentMessage> {
    messages
        .iter()
        .filter(|m| m.is_active(now, window))
        .cloned()
        .collect()
}

#[must_use]
pub fn latest_active(
    messages: &[UrgentMessage],
    now: i64,
    window: ActivityWindow,
) -> Option<UrgentMessage> {
    messages
        .iter()
        .rev()
        .find(|m| m.is_active(now, window))
        .cloned()
}
