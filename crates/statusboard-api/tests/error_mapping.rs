// SPDX-License-Identifier: Apache-2.0

use statusboard_api::{map_error, status_for, ApiError, ApiErrorCode, API_ERROR_SCHEMA_REF};

#[test]
fn every_error_code_maps_to_an_http_status() {
    for code in ApiErrorCode::ALL {
        let status = status_for(code);
        assert!((400..600).contains(&status), "{code:?} -> {status}");
    }
    assert_eq!(status_for(ApiErrorCode::MissingMessage), 400);
    assert_eq!(status_for(ApiErrorCode::NotAuthorized), 403);
    assert_eq!(status_for(ApiErrorCode::MessageNotFound), 404);
    assert_eq!(status_for(ApiErrorCode::PayloadTooLarge), 413);
    assert_eq!(status_for(ApiErrorCode::StorageUnavailable), 503);
    assert_eq!(status_for(ApiErrorCode::Internal), 500);
}

#[test]
fn error_body_keeps_legacy_ok_and_msg_fields() {
    let err = ApiError::message_not_found(9).with_request_id("req-1");
    let body = err.to_body();
    assert_eq!(body["ok"], false);
    assert_eq!(body["msg"], "Message not found");
    assert_eq!(body["error"]["code"], "MessageNotFound");
    assert_eq!(body["error"]["details"]["id"], 9);
    assert_eq!(body["error"]["request_id"], "req-1");
    assert_eq!(map_error(&err).status_code, 404);
    assert_eq!(map_error(&err).schema_ref, API_ERROR_SCHEMA_REF);
}

#[test]
fn api_error_rejects_unknown_fields() {
    let raw = r#"{"code":"Internal","message":"x","details":{},"request_id":"r","extra":1}"#;
    assert!(serde_json::from_str::<ApiError>(raw).is_err());
}
