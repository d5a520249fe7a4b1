// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Status board model.
//!
//! The board is a single mutable [`BoardState`] record plus an append-only list
//! of [`UrgentMessage`]s. A message counts as active while it is younger than
//! the [`ActivityWindow`].

mod board;
mod urgent;
mod validation;

pub use board::{BoardState, StatusUpdate, DEFAULT_LOCATION, DEFAULT_STATUS};
pub use urgent::{
    active_messages, latest_active, next_message_id, validate_reply_text, ActivityWindow, Reply,
    UrgentMessage, UrgentSubmission, DEFAULT_REASON, DEFAULT_STALE_MINUTES,
};
pub use validation::{
    ValidationError, DESIGNATION_MAX_LEN, LOCATION_MAX_LEN, MESSAGE_MAX_LEN, NAME_MAX_LEN,
    NOTE_MAX_LEN, REASON_MAX_LEN, REPLY_MAX_LEN, STATUS_MAX_LEN,
};

pub const CRATE_NAME: &str = "statusboard-model";
