// SPDX-License-Identifier: Apache-2.0

//! Signed admin session cookie.
//!
//! A token is `v1.<payload>.<signature>` where the payload is the base64url
//! JSON `{"admin":true,"issued_at":<secs>}` and the signature is an
//! HMAC-SHA256 over the encoded payload.

use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE_NAME: &str = "statusboard_session";
const SESSION_VERSION_V1: &str = "v1";
const MAX_SESSION_TOKEN_LEN: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionErrorCode {
    InvalidFormat,
    UnsupportedVersion,
    InvalidSignature,
    InvalidPayload,
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub code: SessionErrorCode,
    pub message: String,
}

impl SessionError {
    #[must_use]
    pub fn new(code: SessionErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for SessionError {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionPayload {
    pub admin: bool,
    pub issued_at: i64,
}

#[derive(Clone)]
pub struct SessionKeys {
    secret: Vec<u8>,
    ttl_secs: u64,
    secure: bool,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl_secs", &self.ttl_secs)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionKeys {
    #[must_use]
    pub fn new(secret: &str, ttl_secs: u64, secure: bool) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl_secs,
            secure,
        }
    }

    fn mac(&self) -> Result<HmacSha256, SessionError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| SessionError::new(SessionErrorCode::InvalidPayload, e.to_string()))
    }

    pub fn issue(&self, now: i64) -> Result<String, SessionError> {
        let payload = SessionPayload {
            admin: true,
            issued_at: now,
        };
        let payload_bytes = serde_json::to_vec(&payload)
            .map_err(|e| SessionError::new(SessionErrorCode::InvalidPayload, e.to_string()))?;
        let payload_part = URL_SAFE_NO_PAD.encode(payload_bytes);
        let mut mac = self.mac()?;
        mac.update(payload_part.as_bytes());
        let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{SESSION_VERSION_V1}.{payload_part}.{sig_part}"))
    }

    pub fn verify(&self, token: &str, now: i64) -> Result<SessionPayload, SessionError> {
        if token.len() > MAX_SESSION_TOKEN_LEN {
            return Err(SessionError::new(
                SessionErrorCode::InvalidFormat,
                "session token exceeds max length",
            ));
        }
        let mut parts = token.split('.');
        let (Some(version), Some(payload_part), Some(sig_part), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(SessionError::new(
                SessionErrorCode::InvalidFormat,
                "session token must have three parts",
            ));
        };
        if version != SESSION_VERSION_V1 {
            return Err(SessionError::new(
                SessionErrorCode::UnsupportedVersion,
                format!("unsupported session version {version}"),
            ));
        }
        let expected = URL_SAFE_NO_PAD
            .decode(sig_part)
            .map_err(|e| SessionError::new(SessionErrorCode::InvalidFormat, e.to_string()))?;
        let mut mac = self.mac()?;
        mac.update(payload_part.as_bytes());
        mac.verify_slice(&expected).map_err(|_| {
            SessionError::new(
                SessionErrorCode::InvalidSignature,
                "session signature mismatch",
            )
        })?;
        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_part)
            .map_err(|e| SessionError::new(SessionErrorCode::InvalidFormat, e.to_string()))?;
        let payload: SessionPayload = serde_json::from_slice(&payload_bytes)
            .map_err(|e| SessionError::new(SessionErrorCode::InvalidPayload, e.to_string()))?;
        if !payload.admin {
            return Err(SessionError::new(
                SessionErrorCode::InvalidPayload,
                "session does not carry the admin flag",
            ));
        }
        let age = now.saturating_sub(payload.issued_at);
        if age > i64::try_from(self.ttl_secs).unwrap_or(i64::MAX) {
            return Err(SessionError::new(
                SessionErrorCode::Expired,
                format!("session issued {age}s ago"),
            ));
        }
        Ok(payload)
    }

    /// True when the request carries a valid admin session cookie.
    #[must_use]
    pub fn is_admin(&self, headers: &HeaderMap, now: i64) -> bool {
        match cookie_value(headers, SESSION_COOKIE_NAME) {
            Some(token) => match self.verify(token, now) {
                Ok(_) => true,
                Err(e) => {
                    tracing::debug!(code = ?e.code, "admin session rejected");
                    false
                }
            },
            None => false,
        }
    }

    #[must_use]
    pub fn set_cookie(&self, token: &str) -> String {
        self.cookie(token, self.ttl_secs)
    }

    #[must_use]
    pub fn clear_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: u64) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}"
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Compares a submitted PIN with the configured one in constant time.
    #[must_use]
    pub fn pin_matches(&self, expected: &str, provided: &str) -> bool {
        let Ok(mut expected_mac) = self.mac() else {
            return false;
        };
        expected_mac.update(expected.as_bytes());
        let expected_tag = expected_mac.finalize().into_bytes();
        let Ok(mut provided_mac) = self.mac() else {
            return false;
        };
        provided_mac.update(provided.as_bytes());
        provided_mac.verify_slice(&expected_tag).is_ok()
    }
}

/// First value of the named cookie across every `Cookie` header.
#[must_use]
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
