// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::RequestId;
use crate::http::response_contract::api_error_response;
use crate::services::BoardError;
use crate::telemetry::metrics::RequestMetrics;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, FormRejection};
use axum::extract::{Extension, Form, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use statusboard_api::{
    parse_reply_request, parse_status_request, parse_urgent_form, AckResponse, ApiError,
    SubmitUrgentResponse, UrgentListResponse,
};
use std::collections::BTreeMap;
use tracing::{error, warn};

fn board_error_response(err: BoardError, request_id: &RequestId) -> Response {
    match err {
        BoardError::MessageNotFound(id) => {
            api_error_response(ApiError::message_not_found(id), request_id)
        }
        BoardError::IdSpaceExhausted => {
            error!(request_id = %request_id.as_str(), "urgent message ids exhausted");
            api_error_response(ApiError::storage_unavailable("message ids exhausted"), request_id)
        }
        BoardError::Store(e) => {
            error!(request_id = %request_id.as_str(), "board write failed: {e}");
            api_error_response(ApiError::storage_unavailable(&e.to_string()), request_id)
        }
    }
}

fn read_body(
    body: Result<Bytes, BytesRejection>,
    state: &AppState,
) -> Result<Bytes, ApiError> {
    body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::payload_too_large(state.config.max_body_bytes)
        } else {
            ApiError::invalid_json(&rejection.body_text())
        }
    })
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    if state.sessions.is_admin(headers, state.board.now()) {
        Ok(())
    } else {
        Err(ApiError::not_authorized())
    }
}

pub(crate) async fn status_handler(State(state): State<AppState>) -> Response {
    Json(state.board.status().await).into_response()
}

pub(crate) async fn list_urgent_handler(State(state): State<AppState>) -> Response {
    Json(UrgentListResponse {
        urgent: state.board.active_urgent().await,
    })
    .into_response()
}

/// Kiosk submissions arrive as a form; an unparseable form reads as empty.
pub(crate) async fn submit_urgent_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    form: Result<Form<BTreeMap<String, String>>, FormRejection>,
) -> Response {
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return api_error_response(
                ApiError::payload_too_large(state.config.max_body_bytes),
                &request_id,
            );
        }
        Err(rejection) => {
            warn!(request_id = %request_id.as_str(), "urgent form rejected: {rejection}");
            BTreeMap::new()
        }
    };
    let submission = match parse_urgent_form(&fields) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.board.submit_urgent(submission).await {
        Ok(id) => {
            RequestMetrics::incr(&state.metrics.urgent_submitted);
            Json(SubmitUrgentResponse::accepted(id)).into_response()
        }
        Err(e) => board_error_response(e, &request_id),
    }
}

pub(crate) async fn reply_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if let Err(e) = require_admin(&state, &headers) {
        return api_error_response(e, &request_id);
    }
    let request = match read_body(body, &state).and_then(|b| parse_reply_request(&b)) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.board.reply(request.id, request.text).await {
        Ok(()) => {
            RequestMetrics::incr(&state.metrics.replies_sent);
            Json(AckResponse::ok()).into_response()
        }
        Err(e) => board_error_response(e, &request_id),
    }
}

pub(crate) async fn set_status_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if let Err(e) = require_admin(&state, &headers) {
        return api_error_response(e, &request_id);
    }
    let update = match read_body(body, &state).and_then(|b| parse_status_request(&b)) {
        Ok(v) => v,
        Err(e) => return api_error_response(e, &request_id),
    };
    match state.board.set_status(update).await {
        Ok(_) => {
            RequestMetrics::incr(&state.metrics.status_updates);
            Json(AckResponse::ok()).into_response()
        }
        Err(e) => board_error_response(e, &request_id),
    }
}
