//! Test helpers for probe integration tests.
//!
//! Wraps `wiremock` so each test can describe the token and bundle endpoints
//! in one line and then assert on what the probe actually sent.

use probe_core::{Credentials, ProbeClient};

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_ACCESS_TOKEN: &str = "abc.def.ghi";
pub const TOKEN_PATH: &str = "/api/v1/auth/test/token";
pub const BUNDLES_PATH: &str = "/api/v1/bundles";
pub const VALIDATE_PATH: &str = "/api/v1/auth/test/validate";

/// The credentials every ttelgo test script posted.
pub fn test_credentials() -> Credentials {
    Credentials::new(1, "test@ttelgo.com", "USER")
}

pub fn token_success_body(access_token: &str) -> Value {
    json!({
        "success": true,
        "data": {
            "accessToken": access_token,
            "userId": 1,
            "email": "test@ttelgo.com",
            "expiresIn": 86400
        }
    })
}

pub fn bundles_body(count: usize) -> Value {
    let bundles: Vec<Value> = (0..count).map(|_| json!({})).collect();
    json!({"success": true, "data": {"bundles": bundles}})
}

/// Client against `server` with a short timeout so failures surface fast.
pub fn client_for(server: &MockServer) -> ProbeClient {
    ProbeClient::builder(server.uri())
        .with_timeout(Duration::from_secs(2))
        .build()
        .expect("mock server URI should be a valid base URL")
}

/// Mount a token endpoint answering `status` with `body`, expected `times` times.
pub async fn mount_token(server: &MockServer, status: u16, body: Value, times: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Number of requests the mock server saw on `request_path`.
pub async fn requests_to(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == request_path)
        .count()
}
