// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

pub const API_ERROR_SCHEMA_REF: &str = "#/components/schemas/ApiError";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
    pub schema_ref: &'static str,
}

#[must_use]
pub fn status_for(code: ApiErrorCode) -> u16 {
    match code {
        ApiErrorCode::MissingMessage
        | ApiErrorCode::ValidationFailed
        | ApiErrorCode::InvalidJson
        | ApiErrorCode::InvalidMessageId => 400,
        ApiErrorCode::NotAuthorized => 403,
        ApiErrorCode::MessageNotFound => 404,
        ApiErrorCode::PayloadTooLarge => 413,
        ApiErrorCode::StorageUnavailable => 503,
        _ => 500,
    }
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    ApiErrorMapping {
        status_code: status_for(error.code),
        schema_ref: API_ERROR_SCHEMA_REF,
    }
}
