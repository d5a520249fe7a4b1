// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const REASON_MAX_LEN: usize = 64;
pub const MESSAGE_MAX_LEN: usize = 2000;
pub const NAME_MAX_LEN: usize = 120;
pub const DESIGNATION_MAX_LEN: usize = 120;
pub const STATUS_MAX_LEN: usize = 64;
pub const LOCATION_MAX_LEN: usize = 120;
pub const NOTE_MAX_LEN: usize = 500;
pub const REPLY_MAX_LEN: usize = 2000;

/// Character (not byte) length check shared by every free-text field.
pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError(format!(
            "{field} exceeds max length {max}"
        )));
    }
    Ok(())
}
