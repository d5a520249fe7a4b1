// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use statusboard_core::{Clock, SystemClock};
use statusboard_model::ActivityWindow;
use statusboard_store::BoardStore;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod config;
mod http;
mod middleware;
mod services;
mod session;
mod telemetry;
mod views;

pub use config::{
    validate_startup_config_contract, RateLimitConfig, ServerConfig, DEFAULT_ADMIN_PIN,
    DEFAULT_SESSION_SECRET, DEFAULT_SESSION_TTL_SECS,
};
pub use http::router::build_router;
pub use services::{BoardError, BoardService};
pub use session::{
    cookie_value, SessionError, SessionErrorCode, SessionKeys, SessionPayload, SESSION_COOKIE_NAME,
};

use telemetry::metrics::RequestMetrics;
use telemetry::rate_limiter::RateLimiter;

pub const CRATE_NAME: &str = "statusboard-server";

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<BoardService>,
    pub config: Arc<ServerConfig>,
    pub sessions: Arc<SessionKeys>,
    pub(crate) login_limiter: Arc<RateLimiter>,
    pub(crate) metrics: Arc<RequestMetrics>,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn BoardStore>, config: ServerConfig) -> Self {
        Self::with_clock(store, Arc::new(SystemClock), config)
    }

    #[must_use]
    pub fn with_clock(
        store: Arc<dyn BoardStore>,
        clock: Arc<dyn Clock>,
        config: ServerConfig,
    ) -> Self {
        let window = ActivityWindow::from_minutes(config.stale_minutes);
        let sessions = SessionKeys::new(
            &config.session_secret,
            config.session_ttl_secs,
            config.cookie_secure,
        );
        Self {
            board: Arc::new(BoardService::new(store, clock, window)),
            sessions: Arc::new(sessions),
            login_limiter: Arc::new(RateLimiter::default()),
            metrics: Arc::new(RequestMetrics::default()),
            request_id_seed: Arc::new(AtomicU64::new(1)),
            config: Arc::new(config),
        }
    }
}
