// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use statusboard_core::{resolve_data_paths, Clock, SystemClock, ENV_STATUSBOARD_BIND};
use statusboard_server::{
    build_router, validate_startup_config_contract, AppState, RateLimitConfig, ServerConfig,
};
use statusboard_store::JsonFileStore;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn config_from_env() -> ServerConfig {
    let defaults = ServerConfig::default();
    let paths = resolve_data_paths();
    ServerConfig {
        bind_addr: env_string(ENV_STATUSBOARD_BIND, &defaults.bind_addr),
        state_path: paths.state,
        urgent_path: paths.urgent,
        admin_pin: env_string("STATUSBOARD_ADMIN_PIN", &defaults.admin_pin),
        session_secret: env_string("STATUSBOARD_SESSION_SECRET", &defaults.session_secret),
        session_ttl_secs: env_u64("STATUSBOARD_SESSION_TTL_SECS", defaults.session_ttl_secs),
        cookie_secure: env_bool("STATUSBOARD_COOKIE_SECURE", defaults.cookie_secure),
        stale_minutes: env_u64("STATUSBOARD_STALE_MINUTES", defaults.stale_minutes),
        max_body_bytes: env_usize("STATUSBOARD_MAX_BODY_BYTES", defaults.max_body_bytes),
        login_rate_limit: RateLimitConfig {
            capacity: env_f64(
                "STATUSBOARD_LOGIN_RATE_LIMIT_CAPACITY",
                defaults.login_rate_limit.capacity,
            ),
            refill_per_sec: env_f64(
                "STATUSBOARD_LOGIN_RATE_LIMIT_REFILL_PER_SEC",
                defaults.login_rate_limit.refill_per_sec,
            ),
        },
        trust_forwarded_for: env_bool(
            "STATUSBOARD_TRUST_FORWARDED_FOR",
            defaults.trust_forwarded_for,
        ),
        enable_audit_log: env_bool("STATUSBOARD_ENABLE_AUDIT_LOG", defaults.enable_audit_log),
        log_json: env_bool("STATUSBOARD_LOG_JSON", defaults.log_json),
        shutdown_drain: Duration::from_millis(env_u64(
            "STATUSBOARD_SHUTDOWN_DRAIN_MS",
            u64::try_from(defaults.shutdown_drain.as_millis()).unwrap_or(500),
        )),
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cfg = config_from_env();
    init_tracing(cfg.log_json);

    validate_startup_config_contract(&cfg)?;
    if cfg.uses_default_session_secret() {
        warn!(
            "STATUSBOARD_SESSION_SECRET is unset; sessions are signed with the built-in test secret"
        );
    }

    let store = JsonFileStore::new(cfg.state_path.clone(), cfg.urgent_path.clone());
    store
        .seed(SystemClock.now())
        .map_err(|e| format!("seeding board documents failed: {e}"))?;

    let bind_addr = cfg.bind_addr.clone();
    let drain = cfg.shutdown_drain;
    info!(
        state_path = %cfg.state_path.display(),
        urgent_path = %cfg.urgent_path.display(),
        stale_minutes = cfg.stale_minutes,
        "board documents ready"
    );
    let state = AppState::new(Arc::new(store), cfg);
    let app = build_router(state);

    let addr: SocketAddr = bind_addr
        .parse()
        .map_err(|e| format!("invalid bind addr {bind_addr}: {e}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("bind failed: {e}"))?;
    let port = addr.port();
    info!("statusboard listening on {bind_addr}");
    info!("kiosk page: http://localhost:{port}/");
    info!("admin page: http://localhost:{port}/admin");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        wait_for_shutdown_signal().await;
        info!("shutdown requested, draining");
        tokio::time::sleep(drain).await;
    })
    .await
    .map_err(|e| format!("server failed: {e}"))
}
