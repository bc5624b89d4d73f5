use super::helpers::{VALIDATE_PATH, client_for};

use probe_core::{HttpStatusCode, ProbeError, RedactedToken};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies that the bare validation object the server returns is understood.
///
/// **WHY THIS MATTERS**: The validate endpoint is the quickest way to tell an expired token
/// from a wrong signing key when the listing call starts answering 401.
#[tokio::test]
async fn given_valid_token_when_validating_then_returns_claims_summary() {
    // GIVEN: A server that accepts abc.def.ghi
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(VALIDATE_PATH))
        .and(query_param("token", "abc.def.ghi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valid": true,
            "message": "Token is valid",
            "userId": 1,
            "email": "test@ttelgo.com",
            "expired": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Validating
    let validation = client_for(&server)
        .validate_token(&RedactedToken::new("abc.def.ghi"))
        .await
        .unwrap();

    // THEN: Fields come through
    assert!(validation.valid);
    assert!(!validation.expired);
    assert_eq!(validation.user_id, Some(1));
    assert_eq!(validation.email.as_deref(), Some("test@ttelgo.com"));
}

#[tokio::test]
async fn given_invalid_token_when_validating_then_reports_invalid_without_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(VALIDATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valid": false,
            "message": "Token is invalid or expired",
            "userId": null,
            "email": null,
            "expired": true
        })))
        .mount(&server)
        .await;

    let validation = client_for(&server)
        .validate_token(&RedactedToken::new("stale"))
        .await
        .unwrap();

    assert!(!validation.valid);
    assert!(validation.expired);
    assert_eq!(validation.user_id, None);
}

#[tokio::test]
async fn given_enveloped_validation_when_validating_then_unwraps_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(VALIDATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"valid": true, "message": "ok", "expired": false}
        })))
        .mount(&server)
        .await;

    let validation = client_for(&server)
        .validate_token(&RedactedToken::new("abc.def.ghi"))
        .await
        .unwrap();

    assert!(validation.valid);
    assert_eq!(validation.message, "ok");
}

#[tokio::test]
async fn given_server_error_when_validating_then_returns_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(VALIDATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .validate_token(&RedactedToken::new("abc.def.ghi"))
        .await;

    match result {
        Err(error @ ProbeError::Status { .. }) => {
            assert_eq!(error.status(), Some(HttpStatusCode(503)));
            assert_eq!(error.message(), "HTTP 503 - maintenance");
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}
