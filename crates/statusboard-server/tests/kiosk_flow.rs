// SPDX-License-Identifier: Apache-2.0

mod support;

use support::{
    get, json, post_form, send_raw_with_method, spawn_server, spawn_server_with, START_TIME,
};

#[tokio::test]
async fn fresh_board_reports_defaults() {
    let server = spawn_server().await;
    let (status, _, body) = get(server.addr, "/status", &[]).await;
    assert_eq!(status, 200);
    let v = json(&body);
    assert_eq!(v["status"], "In Office");
    assert_eq!(v["location"], "Principal's Office");
    assert_eq!(v["note"], "");
    assert_eq!(v["server_time"], START_TIME);
    assert_eq!(v["stale_after_min"], 20);
    assert!(v["urgent"].is_null());
}

#[tokio::test]
async fn submissions_get_sequential_ids_and_latest_is_shown() {
    let server = spawn_server().await;
    let (status, _, body) = post_form(
        server.addr,
        "/urgent",
        &[],
        "reason=&message=+Fire+drill+question+&name=Ms.+Lee&designation=Teacher",
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(json(&body), serde_json::json!({"ok": true, "id": 1}));

    server.clock.advance(30);
    let (_, _, body) = post_form(server.addr, "/urgent", &[], "reason=Parent&message=Pickup").await;
    assert_eq!(json(&body)["id"], 2);

    let (_, _, body) = get(server.addr, "/status", &[]).await;
    let urgent = &json(&body)["urgent"];
    assert_eq!(urgent["id"], 2);
    assert_eq!(urgent["reason"], "Parent");
    assert!(urgent["reply"].is_null());

    let (_, _, body) = get(server.addr, "/urgent", &[]).await;
    let list = json(&body)["urgent"].as_array().cloned().expect("urgent array");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], 1);
    assert_eq!(list[0]["reason"], "Other");
    assert_eq!(list[0]["text"], "Fire drill question");
    assert_eq!(list[0]["name"], "Ms. Lee");
    assert_eq!(list[0]["time"], START_TIME);

    let saved: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&server.urgent_path).expect("read urgent"))
            .expect("urgent document is valid json");
    assert_eq!(saved.as_array().map(Vec::len), Some(2));
    assert!(!server.urgent_path.with_file_name("urgent.json.tmp").exists());
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let server = spawn_server().await;
    let (status, _, body) =
        post_form(server.addr, "/urgent", &[], "reason=Staff&message=+++").await;
    assert_eq!(status, 400);
    let v = json(&body);
    assert_eq!(v["ok"], false);
    assert_eq!(v["msg"], "Message required");
    assert_eq!(v["error"]["code"], "MissingMessage");

    let (status, _, body) = send_raw_with_method(server.addr, "POST", "/urgent", &[], "").await;
    assert_eq!(status, 400);
    assert_eq!(json(&body)["msg"], "Message required");
}

#[tokio::test]
async fn messages_expire_after_the_window_but_ids_keep_growing() {
    let server = spawn_server().await;
    post_form(server.addr, "/urgent", &[], "message=one").await;

    server.clock.advance(20 * 60);
    let (_, _, body) = get(server.addr, "/urgent", &[]).await;
    assert_eq!(json(&body)["urgent"].as_array().map(Vec::len), Some(1));

    server.clock.advance(1);
    let (_, _, body) = get(server.addr, "/urgent", &[]).await;
    assert_eq!(json(&body)["urgent"].as_array().map(Vec::len), Some(0));
    let (_, _, body) = get(server.addr, "/status", &[]).await;
    assert!(json(&body)["urgent"].is_null());

    let (_, _, body) = post_form(server.addr, "/urgent", &[], "message=two").await;
    assert_eq!(json(&body)["id"], 2);

    let stored: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&server.urgent_path).expect("read urgent file"))
            .expect("urgent file json");
    assert_eq!(stored.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn kiosk_page_renders_and_request_ids_echo() {
    let server = spawn_server().await;
    let (status, head, body) = get(server.addr, "/", &[("x-request-id", "req-kiosk")]).await;
    assert_eq!(status, 200);
    assert!(body.contains("Principal Status"));
    assert!(body.contains("const STALE_AFTER_MIN = 20;"));
    assert_eq!(
        support::header_value(&head, "x-request-id").as_deref(),
        Some("req-kiosk")
    );

    let (_, head, _) = get(server.addr, "/status", &[]).await;
    let generated = support::header_value(&head, "x-request-id").expect("generated id");
    assert!(generated.starts_with("req-"));
    assert_eq!(generated.len(), 20);
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let server = spawn_server_with(|cfg| statusboard_server::ServerConfig {
        max_body_bytes: 64,
        ..cfg
    })
    .await;
    let body = format!("message={}", "x".repeat(200));
    let (status, _, resp) = post_form(server.addr, "/urgent", &[], &body).await;
    assert_eq!(status, 413);
    assert_eq!(json(&resp)["error"]["code"], "PayloadTooLarge");
}

#[tokio::test]
async fn overlong_fields_fail_validation() {
    let server = spawn_server().await;
    let body = format!("message=hi&name={}", "n".repeat(121));
    let (status, _, resp) = post_form(server.addr, "/urgent", &[], &body).await;
    assert_eq!(status, 400);
    assert_eq!(json(&resp)["error"]["code"], "ValidationFailed");
}
