//! Tests for the HTTP client module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JOB_DOC: &str = "/v1/projects/demo-project/databases/(default)/documents/jobs/1";
const JOBS: &str = "/v1/projects/demo-project/databases/(default)/documents/jobs";

fn emulator_client(timeout: Duration) -> HttpClient {
    HttpClient::with_auth(timeout, AuthConfig::emulator()).unwrap()
}

fn fields() -> serde_json::Value {
    json!({"fields": {"title": {"stringValue": "A"}}})
}

#[tokio::test]
async fn test_patch_sends_authenticated_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(JOB_DOC))
        .and(header("Authorization", "Bearer owner"))
        .and(header("content-type", "application/json"))
        .and(body_json(fields()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = emulator_client(Duration::from_secs(5));
    let url = format!("{}{JOB_DOC}", mock_server.uri());
    client.patch(&url, &fields()).await.unwrap();
}

#[tokio::test]
async fn test_post_returns_response_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(JOBS))
        .and(header("Authorization", "Bearer owner"))
        .and(body_json(fields()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "projects/demo-project/databases/(default)/documents/jobs/xyz"
        })))
        .mount(&mock_server)
        .await;

    let client = emulator_client(Duration::from_secs(5));
    let url = format!("{}{JOBS}", mock_server.uri());
    let response = client.post(&url, &fields()).await.unwrap();
    let created: serde_json::Value = response.json().await.unwrap();

    assert_eq!(
        created["name"],
        "projects/demo-project/databases/(default)/documents/jobs/xyz"
    );
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(JOB_DOC))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .mount(&mock_server)
        .await;

    let client = emulator_client(Duration::from_secs(5));
    let url = format!("{}{JOB_DOC}", mock_server.uri());
    let err = client.patch(&url, &fields()).await.unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "PERMISSION_DENIED");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_sent_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(JOBS))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = emulator_client(Duration::from_secs(5));
    let url = format!("{}{JOBS}", mock_server.uri());
    let err = client.post(&url, &fields()).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(JOB_DOC))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = emulator_client(Duration::from_millis(50));
    let url = format!("{}{JOB_DOC}", mock_server.uri());
    let err = client.patch(&url, &fields()).await.unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}

#[tokio::test]
async fn test_unreachable_host_is_http_error() {
    let client = emulator_client(Duration::from_secs(5));
    // Port 9 (discard) is closed on test hosts
    let err = client
        .patch(&format!("http://127.0.0.1:9{JOB_DOC}"), &fields())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Http(_)));
}

#[test]
fn test_debug_shows_timeout() {
    let client = emulator_client(Duration::from_secs(3));
    let debug_str = format!("{client:?}");

    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("3s"));
}
