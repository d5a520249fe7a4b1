// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::RequestId;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use statusboard_api::{status_for, ApiError};

/// Error body `{"ok":false,"msg":..,"error":{..}}` with the mapped status code.
#[must_use]
pub(crate) fn api_error_response(err: ApiError, request_id: &RequestId) -> Response {
    let err = err.with_request_id(request_id.as_str());
    let status =
        StatusCode::from_u16(status_for(err.code)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut resp = (status, Json(err.to_body())).into_response();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        resp.headers_mut()
            .insert("retry-after", HeaderValue::from_static("3"));
    }
    resp
}
