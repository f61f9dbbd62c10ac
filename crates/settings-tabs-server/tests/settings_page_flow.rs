// SPDX-License-Identifier: Apache-2.0

use settings_tabs_model::{StoredValue, StoredValues};
use settings_tabs_server::{
    build_router, demo_schema, ensure_options, AppState, MemoryStore, OptionStore,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

async fn spawn_app() -> (std::net::SocketAddr, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(demo_schema("My Settings Tabs"), store.clone());
    ensure_options(&state.registry, state.store.as_ref())
        .await
        .expect("ensure options");
    let app = build_router(state);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    (addr, store)
}

async fn send_raw(addr: std::net::SocketAddr, request: String) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status");
    (status, head.to_string(), body.to_string())
}

async fn http_get(addr: std::net::SocketAddr, path: &str) -> (u16, String, String) {
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    send_raw(addr, request).await
}

async fn http_post_form(addr: std::net::SocketAddr, path: &str, body: &str) -> (u16, String, String) {
    let request = format!(
        "POST {path} HTTP/1.1\r\nHost: {addr}\r\n\
Content-Type: application/x-www-form-urlencoded\r\n\
Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    send_raw(addr, request).await
}

#[tokio::test]
async fn initial_render_defaults_to_first_tab_with_empty_values() {
    let (addr, _store) = spawn_app().await;
    let (status, head, body) = http_get(addr, "/settings").await;
    assert_eq!(status, 200);
    assert!(head.to_lowercase().contains("content-type: text/html"));
    assert!(head.to_lowercase().contains("x-request-id: req-"));

    assert!(body.contains("<h2>My Settings Tabs</h2>"));
    assert!(body.contains("name=\"my_settings_tabs_default[name]\" value=\"\""));
    assert!(body.contains("This section rocks!"));
    assert!(body.contains("Default instructions for Section 2"));
    assert_eq!(body.matches("nav-tab-active").count(), 1);
    assert!(body.contains("<a href=\"?tab=default\" class=\"nav-tab nav-tab-active\">"));
    assert!(!body.contains("Settings saved."));
}

#[tokio::test]
async fn submitted_values_round_trip_through_storage() {
    let (addr, store) = spawn_app().await;
    let (status, head, _) = http_post_form(
        addr,
        "/settings/save",
        "option_page=my_settings_tabs_default\
&my_settings_tabs_default%5Bname%5D=Ann\
&my_settings_tabs_default%5Bmessage%5D=Hi\
&my_settings_tabs_default%5Bcolor%5D=yellow",
    )
    .await;
    assert_eq!(status, 303);
    assert!(head
        .to_lowercase()
        .contains("location: /settings?tab=default&updated=true"));

    let stored = store
        .get("my_settings_tabs_default")
        .await
        .expect("stored values");
    assert_eq!(stored.get("name"), Some(&StoredValue::scalar("Ann")));
    assert_eq!(stored.get("message"), Some(&StoredValue::scalar("Hi")));

    let (status, _, body) = http_get(addr, "/settings?tab=default&updated=true").await;
    assert_eq!(status, 200);
    assert!(body.contains("Settings saved."));
    assert!(body.contains("name=\"my_settings_tabs_default[name]\" value=\"Ann\""));
    assert!(body.contains(">Hi</textarea>"));
    assert!(body.contains("value=\"yellow\" selected=\"selected\""));
}

#[tokio::test]
async fn checkbox_persists_only_zero_or_one() {
    let (addr, store) = spawn_app().await;

    // Checked: the browser submits the hidden "0" and the visible "1".
    http_post_form(
        addr,
        "/settings/save",
        "option_page=my_settings_tabs_other\
&my_settings_tabs_other%5Bsubscribe%5D=0\
&my_settings_tabs_other%5Bsubscribe%5D=1",
    )
    .await;
    let stored = store.get("my_settings_tabs_other").await.expect("values");
    assert_eq!(stored.get("subscribe"), Some(&StoredValue::scalar("1")));

    // Unchecked: only the hidden "0" arrives.
    http_post_form(
        addr,
        "/settings/save",
        "option_page=my_settings_tabs_other&my_settings_tabs_other%5Bsubscribe%5D=0",
    )
    .await;
    let stored = store.get("my_settings_tabs_other").await.expect("values");
    assert_eq!(stored.get("subscribe"), Some(&StoredValue::scalar("0")));

    let (_, _, body) = http_get(addr, "/settings?tab=other").await;
    assert!(!body.contains("checked=\"checked\""));
}

#[tokio::test]
async fn unchecked_checkbox_array_overwrites_the_previous_selection() {
    let (addr, store) = spawn_app().await;
    http_post_form(
        addr,
        "/settings/save",
        "option_page=my_settings_tabs_other\
&my_settings_tabs_other%5Broles%5D%5B%5D=editor\
&my_settings_tabs_other%5Broles%5D%5B%5D=author",
    )
    .await;
    let stored = store.get("my_settings_tabs_other").await.expect("values");
    assert_eq!(
        stored.get("roles"),
        Some(&StoredValue::many(vec![
            "editor".to_string(),
            "author".to_string(),
        ]))
    );

    // Submitting with every box cleared must store the empty sequence,
    // not keep the previous value.
    http_post_form(addr, "/settings/save", "option_page=my_settings_tabs_other").await;
    let stored = store.get("my_settings_tabs_other").await.expect("values");
    assert_eq!(stored.get("roles"), Some(&StoredValue::many(Vec::new())));
}

#[tokio::test]
async fn static_tab_renders_without_form_or_storage_read() {
    let (addr, store) = spawn_app().await;
    let reads_before = store.get_calls.load(Ordering::Relaxed);
    let (status, _, body) = http_get(addr, "/settings?tab=instructions").await;
    assert_eq!(status, 200);
    assert!(body.contains("Instructions go here. This tab has no fields."));
    assert!(!body.contains("<form"));
    assert_eq!(store.get_calls.load(Ordering::Relaxed), reads_before);
}

#[tokio::test]
async fn unknown_tab_parameter_falls_back_to_the_first_tab() {
    let (addr, _store) = spawn_app().await;
    let (status, _, body) = http_get(addr, "/settings?tab=bogus").await;
    assert_eq!(status, 200);
    assert!(body.contains("<a href=\"?tab=default\" class=\"nav-tab nav-tab-active\">"));
}

#[tokio::test]
async fn stored_radio_choice_marks_exactly_its_input() {
    let (addr, store) = spawn_app().await;
    let mut values = StoredValues::new();
    values.insert("gender".to_string(), StoredValue::scalar("f"));
    store
        .replace("my_settings_tabs_other", values)
        .await
        .expect("seed store");

    let (_, _, body) = http_get(addr, "/settings?tab=other").await;
    assert!(body.contains("value=\"f\" checked=\"checked\""));
    assert!(!body.contains("value=\"m\" checked=\"checked\""));
}

#[tokio::test]
async fn unregistered_option_group_redirects_without_writing() {
    let (addr, store) = spawn_app().await;
    let (status, head, _) = http_post_form(
        addr,
        "/settings/save",
        "option_page=my_settings_tabs_bogus&my_settings_tabs_bogus%5Bname%5D=x",
    )
    .await;
    assert_eq!(status, 303);
    assert!(head.to_lowercase().contains("location: /settings"));
    assert!(store
        .get("my_settings_tabs_default")
        .await
        .expect("default entry")
        .is_empty());
}

#[tokio::test]
async fn health_and_metrics_endpoints_respond() {
    let (addr, _store) = spawn_app().await;
    let (status, _, body) = http_get(addr, "/healthz").await;
    assert_eq!(status, 200);
    assert_eq!(body, "ok");

    let (status, _, body) = http_get(addr, "/readyz").await;
    assert_eq!(status, 200);
    assert_eq!(body, "ready");

    http_get(addr, "/settings").await;
    let (status, _, body) = http_get(addr, "/metrics").await;
    assert_eq!(status, 200);
    assert!(body.contains("settings_page_renders_total{subsystem=\"settings\""));
}
