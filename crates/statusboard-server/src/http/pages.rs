// SPDX-License-Identifier: Apache-2.0

use crate::http::request_tracing::{client_ip, RequestId};
use crate::http::response_contract::api_error_response;
use crate::telemetry::metrics::RequestMetrics;
use crate::views::{render_template, render_template_with_status, AdminView, IndexView, LoginView};
use crate::AppState;
use axum::extract::{Form, FromRequest, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use statusboard_api::{parse_pin, ApiError};
use std::collections::BTreeMap;
use tracing::{info, warn};

const WRONG_PIN: &str = "Wrong PIN";
const TOO_MANY_ATTEMPTS: &str = "Too many attempts, try again in a minute";

pub(crate) async fn index_page(State(state): State<AppState>) -> Response {
    render_template(IndexView {
        stale_after_min: state.board.window().minutes(),
    })
}

pub(crate) async fn login_page() -> Response {
    render_template(LoginView { error: None })
}

pub(crate) async fn login_submit(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let client = client_ip(
        &parts.headers,
        &parts.extensions,
        state.config.trust_forwarded_for,
    );
    if !state
        .login_limiter
        .allow(&client, &state.config.login_rate_limit)
        .await
    {
        RequestMetrics::incr(&state.metrics.login_rate_limited);
        warn!(client_ip = %client, "login attempts rate limited");
        return render_template_with_status(
            StatusCode::TOO_MANY_REQUESTS,
            LoginView {
                error: Some(TOO_MANY_ATTEMPTS.to_string()),
            },
        );
    }

    let request_id = parts
        .extensions
        .get::<RequestId>()
        .cloned()
        .unwrap_or_else(|| RequestId("req-unknown".to_string()));
    let request = Request::from_parts(parts, body);
    let fields = match Form::<BTreeMap<String, String>>::from_request(request, &state).await {
        Ok(Form(fields)) => fields,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!(client_ip = %client, "login form over body limit");
            return api_error_response(
                ApiError::payload_too_large(state.config.max_body_bytes),
                &request_id,
            );
        }
        Err(_) => BTreeMap::new(),
    };
    let pin = parse_pin(&fields);

    if !state.sessions.pin_matches(&state.config.admin_pin, &pin) {
        RequestMetrics::incr(&state.metrics.login_failures);
        warn!(client_ip = %client, "admin login rejected");
        return render_template(LoginView {
            error: Some(WRONG_PIN.to_string()),
        });
    }

    match state.sessions.issue(state.board.now()) {
        Ok(token) => {
            info!(client_ip = %client, "admin session started");
            (
                [(header::SET_COOKIE, state.sessions.set_cookie(&token))],
                Redirect::to("/admin"),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("session issue failed: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub(crate) async fn logout(State(state): State<AppState>) -> Response {
    (
        [(header::SET_COOKIE, state.sessions.clear_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

pub(crate) async fn admin_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !state.sessions.is_admin(&headers, state.board.now()) {
        return Redirect::to("/login").into_response();
    }
    let board = state.board.status().await;
    render_template(AdminView::from_board(
        &board.status,
        board.location,
        board.note,
        board.stale_after_min,
    ))
}
