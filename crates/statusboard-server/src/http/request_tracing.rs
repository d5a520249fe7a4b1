// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap};
use std::net::SocketAddr;

/// Request id attached to the request by the tracing middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RequestId(pub String);

impl RequestId {
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

#[must_use]
pub(crate) fn extract_request_id(headers: &HeaderMap, state: &AppState) -> RequestId {
    let request_id = normalized_header_value(headers, "x-request-id", 128).unwrap_or_else(|| {
        let id = state
            .request_id_seed
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        format!("req-{id:016x}")
    });
    RequestId(request_id)
}

pub(crate) fn normalized_header_value(
    headers: &HeaderMap,
    name: &str,
    max_len: usize,
) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= max_len)
        .map(ToString::to_string)
}

pub(crate) fn normalized_forwarded_for(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();
    if first.is_empty() || first.len() > 64 {
        return None;
    }
    if first
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b':' || b == b'-')
    {
        Some(first.to_string())
    } else {
        None
    }
}

/// Socket peer, or `unknown` when the connection carries no peer address.
///
/// `X-Forwarded-For` wins only when `trust_forwarded` is set.
pub(crate) fn client_ip(
    headers: &HeaderMap,
    extensions: &Extensions,
    trust_forwarded: bool,
) -> String {
    trust_forwarded
        .then(|| normalized_forwarded_for(headers))
        .flatten()
        .or_else(|| {
            extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_for_takes_first_clean_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("10.1.2.3, 172.16.0.1"),
        );
        assert_eq!(normalized_forwarded_for(&headers).as_deref(), Some("10.1.2.3"));

        headers.insert("x-forwarded-for", HeaderValue::from_static("<script>"));
        assert_eq!(normalized_forwarded_for(&headers), None);
        assert_eq!(client_ip(&headers, &Extensions::new(), true), "unknown");
    }

    #[test]
    fn socket_peer_is_used_without_forwarding_header() {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 7], 5000))));
        assert_eq!(client_ip(&HeaderMap::new(), &extensions, true), "192.168.1.7");
    }

    #[test]
    fn forwarded_for_is_ignored_unless_trusted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.9.9.9"));
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40000))));
        assert_eq!(client_ip(&headers, &extensions, false), "127.0.0.1");
        assert_eq!(client_ip(&headers, &extensions, true), "10.9.9.9");
        assert_eq!(client_ip(&headers, &Extensions::new(), false), "unknown");
    }
}
