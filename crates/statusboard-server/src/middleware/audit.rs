// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::{client_ip, RequestId};
use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::info;

pub(crate) async fn audit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.enable_audit_log {
        return next.run(request).await;
    }
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.as_str().to_string())
        .unwrap_or_default();
    let client_ip = client_ip(
        request.headers(),
        request.extensions(),
        state.config.trust_forwarded_for,
    );
    let resp = next.run(request).await;
    info!(
        target: "statusboard_audit",
        method = %method,
        path = %path,
        status = resp.status().as_u16(),
        request_id = %request_id,
        client_ip = %client_ip,
        latency_ms = started.elapsed().as_millis() as u64,
        "audit"
    );
    resp
}
