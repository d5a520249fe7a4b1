// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use statusboard_api::openapi_spec;
use tracing::warn;

pub(crate) async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

/// Ready while both board documents are readable or absent.
pub(crate) async fn readyz(State(state): State<AppState>) -> Response {
    match state.board.check_ready().await {
        Ok(()) => (StatusCode::OK, "ready").into_response(),
        Err(e) => {
            warn!(backend = state.board.backend_tag(), "readiness check failed: {e}");
            (StatusCode::SERVICE_UNAVAILABLE, "not ready").into_response()
        }
    }
}

pub(crate) async fn metrics_handler(State(state): State<AppState>) -> Response {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render().await,
    )
        .into_response()
}

pub(crate) async fn openapi_handler() -> Response {
    Json(openapi_spec()).into_response()
}
