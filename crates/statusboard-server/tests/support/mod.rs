// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use statusboard_core::ManualClock;
use statusboard_server::{build_router, AppState, ServerConfig};
use statusboard_store::JsonFileStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const START_TIME: i64 = 1_700_000_000;

pub struct TestServer {
    pub addr: SocketAddr,
    pub clock: Arc<ManualClock>,
    pub state_path: PathBuf,
    pub urgent_path: PathBuf,
    _dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> ServerConfig {
    ServerConfig {
        state_path: dir.path().join("state.json"),
        urgent_path: dir.path().join("urgent.json"),
        session_secret: "integration-secret".to_string(),
        ..ServerConfig::default()
    }
}

pub async fn spawn_server() -> TestServer {
    spawn_server_with(|cfg| cfg).await
}

pub async fn spawn_server_with(
    customize: impl FnOnce(ServerConfig) -> ServerConfig,
) -> TestServer {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = customize(test_config(&dir));
    let state_path = cfg.state_path.clone();
    let urgent_path = cfg.urgent_path.clone();
    let clock = Arc::new(ManualClock::new(START_TIME));
    let store = JsonFileStore::new(state_path.clone(), urgent_path.clone());
    let state = AppState::with_clock(Arc::new(store), clock.clone(), cfg);
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("serve");
    });
    TestServer {
        addr,
        clock,
        state_path,
        urgent_path,
        _dir: dir,
    }
}

pub async fn send_raw_with_method(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    if method != "GET" {
        req.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    req.push_str("\r\n");
    req.push_str(body);
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

pub async fn get(addr: SocketAddr, path: &str, headers: &[(&str, &str)]) -> (u16, String, String) {
    send_raw_with_method(addr, "GET", path, headers, "").await
}

pub async fn post_form(
    addr: SocketAddr,
    path: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> (u16, String, String) {
    let mut all = vec![("Content-Type", "application/x-www-form-urlencoded")];
    all.extend_from_slice(headers);
    send_raw_with_method(addr, "POST", path, &all, body).await
}

pub async fn post_json(
    addr: SocketAddr,
    path: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> (u16, String, String) {
    let mut all = vec![("Content-Type", "application/json")];
    all.extend_from_slice(headers);
    send_raw_with_method(addr, "POST", path, &all, body).await
}

/// Value of a response header, matched case-insensitively.
pub fn header_value(head: &str, name: &str) -> Option<String> {
    head.lines().skip(1).find_map(|line| {
        let (k, v) = line.split_once(':')?;
        if k.trim().eq_ignore_ascii_case(name) {
            Some(v.trim().to_string())
        } else {
            None
        }
    })
}

/// `name=value` pair of the session cookie set by the response.
pub fn session_cookie(head: &str) -> Option<String> {
    let set_cookie = header_value(head, "set-cookie")?;
    set_cookie.split(';').next().map(|pair| pair.trim().to_string())
}

pub async fn login(addr: SocketAddr) -> String {
    let (status, head, _) = post_form(addr, "/login", &[], "pin=1234").await;
    assert_eq!(status, 303, "login should redirect");
    session_cookie(&head).expect("session cookie")
}

pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("json body")
}
