// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use statusboard_model::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    MissingMessage,
    ValidationFailed,
    InvalidJson,
    InvalidMessageId,
    MessageNotFound,
    NotAuthorized,
    PayloadTooLarge,
    StorageUnavailable,
    Internal,
}

impl ApiErrorCode {
    pub const ALL: [Self; 9] = [
        Self::MissingMessage,
        Self::ValidationFailed,
        Self::InvalidJson,
        Self::InvalidMessageId,
        Self::MessageNotFound,
        Self::NotAuthorized,
        Self::PayloadTooLarge,
        Self::StorageUnavailable,
        Self::Internal,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingMessage => "MissingMessage",
            Self::ValidationFailed => "ValidationFailed",
            Self::InvalidJson => "InvalidJson",
            Self::InvalidMessageId => "InvalidMessageId",
            Self::MessageNotFound => "MessageNotFound",
            Self::NotAuthorized => "NotAuthorized",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::StorageUnavailable => "StorageUnavailable",
            Self::Internal => "Internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = request_id.to_string();
        self
    }

    #[must_use]
    pub fn missing_message() -> Self {
        Self::new(
            ApiErrorCode::MissingMessage,
            "Message required",
            json!({"field": "message"}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn validation_failed(errors: &[ValidationError]) -> Self {
        let field_errors: Vec<Value> = errors
            .iter()
            .map(|e| json!({"reason": e.to_string()}))
            .collect();
        Self::new(
            ApiErrorCode::ValidationFailed,
            "validation failed",
            json!({"field_errors": field_errors}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn invalid_json(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidJson,
            "request body must be a JSON object",
            json!({"reason": reason}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn invalid_message_id(raw: &Value) -> Self {
        Self::new(
            ApiErrorCode::InvalidMessageId,
            "invalid message id",
            json!({"id": raw}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn message_not_found(id: u64) -> Self {
        Self::new(
            ApiErrorCode::MessageNotFound,
            "Message not found",
            json!({"id": id}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn not_authorized() -> Self {
        Self::new(
            ApiErrorCode::NotAuthorized,
            "Not authorized",
            json!({}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn payload_too_large(limit_bytes: usize) -> Self {
        Self::new(
            ApiErrorCode::PayloadTooLarge,
            "request body too large",
            json!({"limit_bytes": limit_bytes}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn storage_unavailable(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::StorageUnavailable,
            "board storage unavailable",
            json!({"reason": reason}),
            "req-unknown",
        )
    }

    /// Body shape served to clients: the legacy `ok`/`msg` pair read by the
    /// page scripts plus the structured error.
    #[must_use]
    pub fn to_body(&self) -> Value {
        json!({"ok": false, "msg": self.message, "error": self})
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
