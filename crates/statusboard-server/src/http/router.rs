// SPDX-License-Identifier: Apache-2.0

use crate::http::{board_endpoints, ops, pages};
use crate::middleware::audit::audit_middleware;
use crate::middleware::request_tracing::request_tracing_middleware;
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index_page))
        .route("/status", get(board_endpoints::status_handler))
        .route(
            "/urgent",
            get(board_endpoints::list_urgent_handler).post(board_endpoints::submit_urgent_handler),
        )
        .route("/reply", post(board_endpoints::reply_handler))
        .route("/api/set", post(board_endpoints::set_status_handler))
        .route("/login", get(pages::login_page).post(pages::login_submit))
        .route("/logout", get(pages::logout))
        .route("/admin", get(pages::admin_page))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics_handler))
        .route("/openapi.json", get(ops::openapi_handler))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(from_fn_with_state(state.clone(), audit_middleware))
        .layer(from_fn_with_state(
            state.clone(),
            request_tracing_middleware,
        ))
        .with_state(state)
}
