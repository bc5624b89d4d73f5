use super::helpers::{
    BUNDLES_PATH, TEST_ACCESS_TOKEN, TOKEN_PATH, bundles_body, client_for, mount_token,
    requests_to, test_credentials, token_success_body,
};

use probe_core::{Credentials, HttpStatusCode, ProbeClient, ProbeResult, ProbeStage, probe};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: End-to-end happy path: the listing call carries exactly the token the auth
/// endpoint returned.
///
/// **WHY THIS MATTERS**: This is the whole point of the probe. If the bearer value is
/// reformatted, trimmed, or taken from the wrong field, the live API answers 401 and the
/// probe reports a server problem that is really a client bug.
///
/// **BUG THIS CATCHES**: Would catch a wrong auth header scheme, a wrong page-size query,
/// or a request body that no longer matches `{"userId","email","role"}`.
#[tokio::test]
async fn given_auth_success_when_probing_then_lists_with_returned_bearer_token() {
    // GIVEN: A server that issues abc.def.ghi and lists two bundles for it
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_json(json!({
            "userId": 1,
            "email": "test@ttelgo.com",
            "role": "USER"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_success_body(TEST_ACCESS_TOKEN)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .and(query_param("size", "2"))
        .and(header("Authorization", "Bearer abc.def.ghi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bundles_body(2)))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Probing
    let result = client_for(&server).probe(&test_credentials()).await;

    // THEN: Two bundles, and the token handed back is the one issued
    match result {
        ProbeResult::Succeeded { item_count, token } => {
            assert_eq!(item_count, 2);
            assert_eq!(token.as_str(), TEST_ACCESS_TOKEN);
        }
        other => panic!("expected Succeeded, got {other:?}"),
    }
}

/// **VALUE**: Verifies that an explicit rejection stops the probe before the listing call.
///
/// **WHY THIS MATTERS**: Without a token there is nothing to send. Calling the listing
/// endpoint anyway would turn a clear "invalid role" into a confusing 401.
#[tokio::test]
async fn given_auth_rejected_when_probing_then_returns_auth_failed_without_listing() {
    // GIVEN: Auth rejects the role; listing must never be hit
    let server = MockServer::start().await;
    mount_token(
        &server,
        200,
        json!({"success": false, "message": "invalid role"}),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(bundles_body(1)))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Probing
    let result = client_for(&server).probe(&test_credentials()).await;

    // THEN: AuthFailed with the server's message, zero listing calls
    assert_eq!(
        result,
        ProbeResult::AuthFailed {
            message: String::from("invalid role"),
        }
    );
    assert_eq!(requests_to(&server, BUNDLES_PATH).await, 0);
}

#[tokio::test]
async fn given_auth_rejected_without_message_when_probing_then_uses_generic_message() {
    let server = MockServer::start().await;
    mount_token(&server, 200, json!({"success": false}), 1).await;

    let result = client_for(&server).probe(&test_credentials()).await;

    match result {
        ProbeResult::AuthFailed { message } => assert!(!message.is_empty()),
        other => panic!("expected AuthFailed, got {other:?}"),
    }
}

/// **VALUE**: Verifies that a non-JSON token response is reported, not panicked on.
///
/// **WHY THIS MATTERS**: A misconfigured proxy in front of the API answers with an HTML
/// page. The old scripts crashed with a JSON decode traceback in that case.
#[tokio::test]
async fn given_non_json_auth_body_when_probing_then_returns_auth_failed() {
    // GIVEN: An HTML body with a 200 status
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Probing
    let result = client_for(&server).probe(&test_credentials()).await;

    // THEN: AuthFailed with a parse message, and no listing call
    match result {
        ProbeResult::AuthFailed { message } => {
            assert!(message.contains("Failed to parse token response"));
        }
        other => panic!("expected AuthFailed, got {other:?}"),
    }
    assert_eq!(requests_to(&server, BUNDLES_PATH).await, 0);
}

#[tokio::test]
async fn given_auth_error_status_with_html_when_probing_then_message_has_status_and_excerpt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let result = client_for(&server).probe(&test_credentials()).await;

    assert_eq!(
        result,
        ProbeResult::AuthFailed {
            message: String::from("HTTP 404 - Not Found"),
        }
    );
}

#[tokio::test]
async fn given_success_without_token_data_when_probing_then_returns_auth_failed() {
    let server = MockServer::start().await;
    mount_token(&server, 200, json!({"success": true}), 1).await;

    let result = client_for(&server).probe(&test_credentials()).await;

    assert!(matches!(result, ProbeResult::AuthFailed { .. }));
    assert_eq!(requests_to(&server, BUNDLES_PATH).await, 0);
}

/// **VALUE**: Verifies that a 500 on the listing call keeps the status and a body excerpt.
///
/// **WHY THIS MATTERS**: The excerpt is usually the Spring error JSON with the exception
/// name. That, plus the status, is what gets pasted into a bug report.
#[tokio::test]
async fn given_listing_returns_500_when_probing_then_returns_list_failed_with_excerpt() {
    // GIVEN: Auth works, listing blows up with a long body
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 1).await;
    let long_body = format!("Internal Server Error: {}", "x".repeat(500));
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string(long_body))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Probing
    let result = client_for(&server).probe(&test_credentials()).await;

    // THEN: Status 500, non-empty excerpt no longer than prefix + 200 chars
    match result {
        ProbeResult::ListFailed {
            status_code,
            message,
        } => {
            assert_eq!(status_code, Some(HttpStatusCode(500)));
            assert!(message.starts_with("HTTP 500 - Internal Server Error"));
            assert_eq!(message.chars().count(), "HTTP 500 - ".len() + 200);
        }
        other => panic!("expected ListFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_listing_returns_500_with_empty_body_when_probing_then_message_is_not_empty() {
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 1).await;
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client_for(&server).probe(&test_credentials()).await;

    match result {
        ProbeResult::ListFailed { message, .. } => assert!(!message.is_empty()),
        other => panic!("expected ListFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_listing_rejected_when_probing_then_returns_list_failed_with_server_message() {
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 1).await;
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "vendor unavailable"})),
        )
        .mount(&server)
        .await;

    let result = client_for(&server).probe(&test_credentials()).await;

    assert_eq!(
        result,
        ProbeResult::ListFailed {
            status_code: Some(HttpStatusCode(200)),
            message: String::from("vendor unavailable"),
        }
    );
}

/// **VALUE**: Verifies that an empty but successful page is still a success.
///
/// **WHY THIS MATTERS**: A fresh environment has no bundles synced yet. That is a working
/// API, not a failure, and the probe should say so.
#[tokio::test]
async fn given_listing_returns_empty_list_when_probing_then_succeeds_with_zero_items() {
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 1).await;
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(bundles_body(0)))
        .mount(&server)
        .await;

    let result = client_for(&server).probe(&test_credentials()).await;

    assert!(result.is_success());
    assert_eq!(result.item_count(), Some(0));
}

#[tokio::test]
async fn given_listing_success_without_bundles_field_when_probing_then_counts_zero() {
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 1).await;
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let result = client_for(&server).probe(&test_credentials()).await;

    assert_eq!(result.item_count(), Some(0));
}

#[tokio::test]
async fn given_listing_success_with_null_bundles_when_probing_then_counts_zero() {
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 1).await;
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": {"bundles": null}})),
        )
        .mount(&server)
        .await;

    let result = client_for(&server).probe(&test_credentials()).await;

    assert!(result.is_success());
    assert_eq!(result.item_count(), Some(0));
}

/// **VALUE**: Verifies that a 2xx listing with a body that is not JSON is a `ListFailed`
/// without a status, and that the message shows what came back.
///
/// **WHY THIS MATTERS**: The status was fine, so reporting it would point at the wrong
/// problem. The body excerpt is what reveals a proxy login page or a maintenance banner.
#[tokio::test]
async fn given_listing_returns_non_json_when_probing_then_returns_list_failed_without_status() {
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 1).await;
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).probe(&test_credentials()).await;

    match result {
        ProbeResult::ListFailed {
            status_code,
            message,
        } => {
            assert_eq!(status_code, None);
            assert!(message.starts_with("Failed to parse bundle response"));
            assert!(message.contains("<html>oops</html>"));
        }
        other => panic!("expected ListFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_listing_bundles_not_a_list_when_probing_then_message_has_context_and_excerpt() {
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 1).await;
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": {"bundles": "many"}})),
        )
        .mount(&server)
        .await;

    let result = client_for(&server).probe(&test_credentials()).await;

    match result {
        ProbeResult::ListFailed {
            status_code,
            message,
        } => {
            assert_eq!(status_code, None);
            assert!(message.starts_with("Failed to parse bundle response"));
            assert!(message.contains(r#""bundles":"many""#));
        }
        other => panic!("expected ListFailed, got {other:?}"),
    }
}

/// **VALUE**: Verifies that credentials the server would reject never leave the process.
///
/// **WHY THIS MATTERS**: `ProbeConfig::validate` only guards the CLI. A library caller
/// passing `userId: 0` must get a clear `AuthFailed`, not a server-side error page.
#[tokio::test]
async fn given_zero_user_id_when_probing_then_returns_auth_failed_without_requests() {
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 0).await;

    let credentials = Credentials::new(0, "test@ttelgo.com", "USER");
    let result = probe(&server.uri(), &credentials).await;

    match result {
        ProbeResult::AuthFailed { message } => assert!(message.contains("userId")),
        other => panic!("expected AuthFailed, got {other:?}"),
    }
    assert_eq!(requests_to(&server, TOKEN_PATH).await, 0);
    assert_eq!(requests_to(&server, BUNDLES_PATH).await, 0);
}

/// **VALUE**: Verifies that a hung listing call is cut off by the client timeout.
///
/// **WHY THIS MATTERS**: The original scripts had no timeout and would hang forever against
/// a half-open connection. The probe must come back with a result.
#[tokio::test]
async fn given_listing_slower_than_timeout_when_probing_then_returns_transport_error() {
    // GIVEN: A listing endpoint that answers after 3s, and a 500ms client timeout
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 1).await;
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(bundles_body(1))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    let client = ProbeClient::builder(server.uri())
        .with_timeout(Duration::from_millis(500))
        .build()
        .unwrap();

    // WHEN: Probing
    let result = client.probe(&test_credentials()).await;

    // THEN: Transport failure attributed to the listing stage
    match result {
        ProbeResult::TransportError { stage, cause } => {
            assert_eq!(stage, ProbeStage::List);
            assert!(!cause.is_empty());
        }
        other => panic!("expected TransportError, got {other:?}"),
    }
}

#[tokio::test]
async fn given_unreachable_host_when_probing_then_returns_transport_error_at_auth() {
    // GIVEN: A port nothing listens on
    let client = ProbeClient::builder("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    // WHEN: Probing
    let result = client.probe(&test_credentials()).await;

    // THEN: TransportError at the auth stage
    assert!(matches!(
        result,
        ProbeResult::TransportError {
            stage: ProbeStage::Auth,
            ..
        }
    ));
}

#[tokio::test]
async fn given_invalid_base_url_when_using_free_probe_then_returns_transport_error() {
    let result = probe("not a url", &test_credentials()).await;

    assert!(matches!(
        result,
        ProbeResult::TransportError {
            stage: ProbeStage::Auth,
            ..
        }
    ));
}

#[tokio::test]
async fn given_mock_server_when_using_free_probe_then_uses_default_page_size() {
    let server = MockServer::start().await;
    mount_token(&server, 200, token_success_body(TEST_ACCESS_TOKEN), 1).await;
    Mock::given(method("GET"))
        .and(path(BUNDLES_PATH))
        .and(query_param("size", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bundles_body(2)))
        .expect(1)
        .mount(&server)
        .await;

    let result = probe(&server.uri(), &test_credentials()).await;

    assert_eq!(result.item_count(), Some(2));
}

#[tokio::test]
async fn given_base_url_with_path_prefix_when_probing_then_requests_stay_under_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/backend/api/v1/auth/test/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_success_body(TEST_ACCESS_TOKEN)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/backend/api/v1/bundles"))
        .and(query_param("size", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bundles_body(1)))
        .expect(1)
        .mount(&server)
        .await;
    let client = ProbeClient::builder(format!("{}/backend", server.uri()))
        .with_page_size(1)
        .build()
        .unwrap();

    let result = client.probe(&test_credentials()).await;

    assert_eq!(result.item_count(), Some(1));
}

#[tokio::test]
async fn given_full_token_response_when_requesting_token_then_grant_has_all_fields() {
    let server = MockServer::start().await;
    mount_token(
        &server,
        200,
        json!({
            "success": true,
            "data": {
                "accessToken": "access.jwt.value",
                "refreshToken": "refresh.jwt.value",
                "tokenType": "Bearer",
                "expiresIn": 2_592_000,
                "userId": 42,
                "email": "qa@ttelgo.com"
            }
        }),
        1,
    )
    .await;

    let grant = client_for(&server)
        .request_token(&test_credentials())
        .await
        .unwrap();

    assert_eq!(grant.access_token.as_str(), "access.jwt.value");
    assert_eq!(
        grant.refresh_token.as_ref().map(|t| t.as_str()),
        Some("refresh.jwt.value")
    );
    assert_eq!(grant.token_type.as_deref(), Some("Bearer"));
    assert_eq!(grant.user_id, 42);
    assert_eq!(grant.email, "qa@ttelgo.com");
    assert_eq!(grant.expires_in, Duration::from_secs(2_592_000));
    assert!((grant.expires_in_days() - 30.0).abs() < f64::EPSILON);
}
