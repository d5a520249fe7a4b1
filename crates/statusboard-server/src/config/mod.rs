// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADMIN_PIN: &str = "1234";
pub const DEFAULT_SESSION_SECRET: &str = "test-secret";
/// Thirty-one days, the lifetime of a "permanent" admin session.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 31 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize)]
pub struct RateLimitConfig {
    pub capacity: f64,
    pub refill_per_sec: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: 5.0,
            refill_per_sec: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub state_path: PathBuf,
    pub urgent_path: PathBuf,
    #[serde(skip_serializing)]
    pub admin_pin: String,
    #[serde(skip_serializing)]
    pub session_secret: String,
    pub session_ttl_secs: u64,
    pub cookie_secure: bool,
    pub stale_minutes: u64,
    pub max_body_bytes: usize,
    pub login_rate_limit: RateLimitConfig,
    /// Key clients by `X-Forwarded-For` instead of the socket peer.
    /// Only safe behind a proxy that overwrites the header.
    pub trust_forwarded_for: bool,
    pub enable_audit_log: bool,
    pub log_json: bool,
    pub shutdown_drain: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            state_path: PathBuf::from(statusboard_core::STATE_FILE_NAME),
            urgent_path: PathBuf::from(statusboard_core::URGENT_FILE_NAME),
            admin_pin: DEFAULT_ADMIN_PIN.to_string(),
            session_secret: DEFAULT_SESSION_SECRET.to_string(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            cookie_secure: false,
            stale_minutes: statusboard_model::DEFAULT_STALE_MINUTES,
            max_body_bytes: 16 * 1024,
            login_rate_limit: RateLimitConfig::default(),
            trust_forwarded_for: false,
            enable_audit_log: true,
            log_json: true,
            shutdown_drain: Duration::from_millis(500),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn uses_default_session_secret(&self) -> bool {
        self.session_secret == DEFAULT_SESSION_SECRET
    }
}

pub fn validate_startup_config_contract(cfg: &ServerConfig) -> Result<(), String> {
    if cfg.admin_pin.trim().is_empty() {
        return Err("admin pin must not be empty".to_string());
    }
    if cfg.session_secret.is_empty() {
        return Err("session secret must not be empty".to_string());
    }
    if cfg.session_ttl_secs == 0 {
        return Err("session ttl must be > 0".to_string());
    }
    if cfg.stale_minutes == 0 {
        return Err("stale window must be > 0 minutes".to_string());
    }
    if cfg.max_body_bytes == 0 {
        return Err("max body bytes must be > 0".to_string());
    }
    let limit = &cfg.login_rate_limit;
    if limit.capacity.is_nan()
        || limit.refill_per_sec.is_nan()
        || limit.capacity < 1.0
        || limit.refill_per_sec <= 0.0
    {
        return Err("login rate limit requires capacity >= 1 and refill > 0".to_string());
    }
    if cfg.state_path == cfg.urgent_path {
        return Err("state and urgent documents must be distinct files".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_startup_validation() {
        validate_startup_config_contract(&ServerConfig::default()).expect("defaults valid");
        assert!(ServerConfig::default().uses_default_session_secret());
        assert!(!ServerConfig::default().trust_forwarded_for);
    }

    #[test]
    fn startup_validation_rejects_blank_pin_and_zero_limits() {
        let cfg = ServerConfig {
            admin_pin: "  ".to_string(),
            ..ServerConfig::default()
        };
        assert!(validate_startup_config_contract(&cfg)
            .expect_err("blank pin")
            .contains("pin"));

        let cfg = ServerConfig {
            stale_minutes: 0,
            ..ServerConfig::default()
        };
        assert!(validate_startup_config_contract(&cfg).is_err());

        let cfg = ServerConfig {
            login_rate_limit: RateLimitConfig {
                capacity: 5.0,
                refill_per_sec: f64::NAN,
            },
            ..ServerConfig::default()
        };
        assert!(validate_startup_config_contract(&cfg).is_err());
    }

    #[test]
    fn secrets_are_not_serialized() {
        let json = serde_json::to_value(ServerConfig::default()).expect("serialize config");
        assert!(json.get("admin_pin").is_none());
        assert!(json.get("session_secret").is_none());
        assert_eq!(json["bind_addr"], "0.0.0.0:5000");
    }
}
