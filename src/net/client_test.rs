use futures::executor::block_on;

use super::*;
use crate::net::test_support::{StubTransport, stub_client};
use crate::net::types::User;

fn alice_session(token: &str) -> Session {
    Session::authenticated(User { id: 1, username: "alice".to_owned(), email: None }, token)
}

// =============================================================
// Header injection
// =============================================================

#[test]
fn authenticated_request_carries_bearer_header() {
    let (client, _) = stub_client();
    let request = client.prepare(Method::GET, "/products", &alice_session("abc123"), None).unwrap();
    assert_eq!(request.header(AUTHORIZATION), Some("Bearer abc123"));
    assert!(request.headers[AUTHORIZATION].is_sensitive());
}

#[test]
fn anonymous_request_has_no_authorization_header() {
    let (client, _) = stub_client();
    let request = client.prepare(Method::GET, "/products", &Session::anonymous(), None).unwrap();
    assert_eq!(request.header(AUTHORIZATION), None);
    assert_eq!(request.headers.len(), 1);
}

#[test]
fn default_json_content_type_is_always_set() {
    let (client, _) = stub_client();
    let request = client.prepare(Method::POST, "/login", &Session::anonymous(), Some("{}".to_owned())).unwrap();
    assert_eq!(request.header("content-type"), Some(JSON_CONTENT_TYPE));
}

#[test]
fn header_follows_the_session_passed_per_call() {
    let (client, _) = stub_client();
    let first = client.prepare(Method::GET, "/products", &alice_session("one"), None).unwrap();
    let second = client.prepare(Method::GET, "/products", &alice_session("two"), None).unwrap();
    let third = client.prepare(Method::GET, "/products", &Session::anonymous(), None).unwrap();
    assert_eq!(first.header(AUTHORIZATION), Some("Bearer one"));
    assert_eq!(second.header(AUTHORIZATION), Some("Bearer two"));
    assert_eq!(third.header(AUTHORIZATION), None);
}

#[test]
fn token_with_control_characters_is_rejected() {
    let (client, transport) = stub_client();
    let err = client.prepare(Method::GET, "/products", &alice_session("bad\ntoken"), None).unwrap_err();
    assert!(matches!(err, ApiError::InvalidHeader(_)));

    let result: Result<serde_json::Value, _> = block_on(client.get_json("/products", &alice_session("bad\ntoken")));
    assert!(matches!(result, Err(ApiError::InvalidHeader(_))));
    assert!(transport.requests().is_empty());
}

// =============================================================
// URL joining
// =============================================================

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let config = AppConfig { api_base_url: "http://api.test/".to_owned(), ..AppConfig::default() };
    let client = ApiClient::with_transport(&config, StubTransport::default());
    assert_eq!(client.base_url(), "http://api.test");
    assert_eq!(client.url("/login"), "http://api.test/login");
    assert_eq!(client.url("products"), "http://api.test/products");
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn non_success_status_becomes_status_error() {
    let (client, transport) = stub_client();
    transport.reply(500, "boom");
    let result: Result<serde_json::Value, _> = block_on(client.get_json("/products", &Session::anonymous()));
    assert_eq!(
        result.unwrap_err(),
        ApiError::Status { status: StatusCode::INTERNAL_SERVER_ERROR, body: "boom".to_owned() }
    );
}

#[test]
fn redirect_status_is_not_success() {
    let (client, transport) = stub_client();
    transport.reply(302, "");
    let result = block_on(client.send_empty(Method::DELETE, "/products/1", &Session::anonymous()));
    assert!(matches!(result, Err(ApiError::Status { status, .. }) if status == StatusCode::FOUND));
}

#[test]
fn transport_failure_is_not_retried() {
    let (client, transport) = stub_client();
    transport.fail(ApiError::Transport("offline".to_owned())).reply(200, "[]");
    let result: Result<Vec<serde_json::Value>, _> = block_on(client.get_json("/products", &Session::anonymous()));
    assert_eq!(result.unwrap_err(), ApiError::Transport("offline".to_owned()));
    assert_eq!(transport.requests().len(), 1);
}

#[test]
fn send_json_serializes_body() {
    let (client, transport) = stub_client();
    transport.reply(200, r#"{"ok":true}"#);
    let reply: serde_json::Value = block_on(client.send_json(
        Method::PUT,
        "/products/1",
        &alice_session("abc123"),
        &serde_json::json!({"name": "Lamp"}),
    ))
    .unwrap();
    assert_eq!(reply, serde_json::json!({"ok": true}));
    assert_eq!(transport.last_request().body.as_deref(), Some(r#"{"name":"Lamp"}"#));
}

#[cfg(not(feature = "csr"))]
#[test]
fn offline_transport_reports_unavailable() {
    let client = ApiClient::from_config(&AppConfig::default());
    let result: Result<serde_json::Value, _> = block_on(client.get_json("/products", &Session::anonymous()));
    assert_eq!(result.unwrap_err(), ApiError::Unavailable);
}
