// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use serde_json::{Map, Value};
use statusboard_model::{validate_reply_text, StatusUpdate, UrgentSubmission};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    pub id: u64,
    pub text: String,
}

/// Kiosk form: `reason`, `message`, `name`, `designation`.
pub fn parse_urgent_form(form: &BTreeMap<String, String>) -> Result<UrgentSubmission, ApiError> {
    let submission = UrgentSubmission::normalized(
        form.get("reason").map(String::as_str),
        form.get("message").map(String::as_str),
        form.get("name").map(String::as_str),
        form.get("designation").map(String::as_str),
    );
    if !submission.has_message() {
        return Err(ApiError::missing_message());
    }
    submission
        .validate()
        .map_err(|errors| ApiError::validation_failed(&errors))?;
    Ok(submission)
}

/// The body is decoded as JSON whatever the declared content type.
pub fn parse_reply_request(body: &[u8]) -> Result<ReplyRequest, ApiError> {
    let object = json_object(body)?;
    let raw_id = object.get("id").cloned().unwrap_or(Value::Null);
    let id = message_id(&raw_id).ok_or_else(|| ApiError::invalid_message_id(&raw_id))?;
    let text = optional_string(&object, "text")?
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    validate_reply_text(&text).map_err(|e| ApiError::validation_failed(&[e]))?;
    Ok(ReplyRequest { id, text })
}

/// The body is decoded as JSON whatever the declared content type. Values are
/// taken verbatim, without trimming.
pub fn parse_status_request(body: &[u8]) -> Result<StatusUpdate, ApiError> {
    let object = json_object(body)?;
    let update = StatusUpdate {
        status: optional_string(&object, "status")?,
        location: optional_string(&object, "location")?,
        note: optional_string(&object, "note")?,
    };
    update
        .validate()
        .map_err(|errors| ApiError::validation_failed(&errors))?;
    Ok(update)
}

#[must_use]
pub fn parse_pin(form: &BTreeMap<String, String>) -> String {
    form.get("pin")
        .map(|p| p.trim().to_string())
        .unwrap_or_default()
}

fn json_object(body: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::invalid_json("expected a JSON object")),
        Err(e) => Err(ApiError::invalid_json(&e.to_string())),
    }
}

/// Accepts a non-negative integer or a string holding one.
fn message_id(raw: &Value) -> Option<u64> {
    match raw {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn optional_string(object: &Map<String, Value>, key: &str) -> Result<Option<String>, ApiError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ApiError::invalid_json(&format!(
            "field {key} must be a string, got {other}"
        ))),
    }
}
