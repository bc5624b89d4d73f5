use crate::report::{ProbeReport, render_grant, render_probe, render_validation};

use probe_core::{
    Credentials, HttpStatusCode, ProbeResult, ProbeStage, RedactedToken, TokenGrant,
    TokenValidation,
};

use std::time::Duration;

fn long_token() -> RedactedToken {
    RedactedToken::new(format!("eyJhbGciOiJIUzUxMiJ9.{}.sig", "a".repeat(80)))
}

/// **VALUE**: Verifies that the success report lists both endpoints and only a token prefix.
///
/// **WHY THIS MATTERS**: This block is copied into tickets and chat to show the API is up.
/// It must be enough to reproduce the calls without leaking the full bearer token.
#[test]
fn given_succeeded_result_when_rendered_then_shows_endpoints_and_token_prefix() {
    // GIVEN: A successful probe with a long token
    let token = long_token();
    let full = token.as_str().to_string();
    let result = ProbeResult::Succeeded {
        item_count: 2,
        token,
    };

    // WHEN: Rendering against a local server
    let text = render_probe(&result, "http://localhost:8080/", &Credentials::default());

    // THEN: Count, both endpoints, request body and a truncated token
    assert!(text.contains("Found 2 bundles"));
    assert!(text.contains("POST http://localhost:8080/api/v1/auth/test/token"));
    assert!(text.contains("GET http://localhost:8080/api/v1/bundles"));
    assert!(text.contains(r#"{"userId":1,"email":"test@ttelgo.com","role":"USER"}"#));
    assert!(text.contains(&format!("Bearer {}...", &full[..50])));
    assert!(!text.contains(&full));
}

#[test]
fn given_list_failed_result_when_rendered_then_shows_message_and_status() {
    let result = ProbeResult::ListFailed {
        status_code: Some(HttpStatusCode(403)),
        message: String::from("HTTP 403 - Forbidden"),
    };

    let text = render_probe(&result, "http://localhost:8080", &Credentials::default());

    assert!(text.contains("Bundles error: HTTP 403 - Forbidden"));
    assert!(text.contains("Status: 403"));
}

/// **VALUE**: Verifies that a refused bearer token gets a hint, and other failures do not.
///
/// **WHY THIS MATTERS**: A 401/403 on the listing means the token we were just given is not
/// accepted, which points at the server's JWT setup rather than the bundle service.
#[test]
fn given_list_failed_with_auth_status_when_rendered_then_adds_token_hint() {
    let refused = ProbeResult::ListFailed {
        status_code: Some(HttpStatusCode(401)),
        message: String::from("HTTP 401 - <empty body>"),
    };
    let broken = ProbeResult::ListFailed {
        status_code: Some(HttpStatusCode(500)),
        message: String::from("HTTP 500 - boom"),
    };

    let refused_text = render_probe(&refused, "http://localhost:8080", &Credentials::default());
    let broken_text = render_probe(&broken, "http://localhost:8080", &Credentials::default());

    assert!(refused_text.contains("token was refused"));
    assert!(!broken_text.contains("token was refused"));
}

#[test]
fn given_grant_when_rendered_then_shows_full_token_and_expiry_in_days() {
    let grant = TokenGrant {
        access_token: RedactedToken::new("abc.def.ghi"),
        user_id: 1,
        email: String::from("test@ttelgo.com"),
        expires_in: Duration::from_secs(2_592_000),
        refresh_token: None,
        token_type: Some(String::from("Bearer")),
    };

    let text = render_grant(&grant);

    assert!(text.contains("Authorization: Bearer abc.def.ghi"));
    assert!(text.contains("2592000 seconds (30.0 days)"));
    assert!(text.contains("Token Type: Bearer"));
}

#[test]
fn given_expired_validation_when_rendered_then_marks_failure() {
    let validation = TokenValidation {
        valid: false,
        message: String::from("Token is invalid or expired"),
        user_id: None,
        email: None,
        expired: true,
    };

    let text = render_validation(&validation);

    assert!(text.starts_with("\u{2717} Token is invalid or expired"));
    assert!(text.contains("Expired: true"));
    assert!(!text.contains("User ID"));
}

/// **VALUE**: Verifies the JSON report shape consumed by scripts.
///
/// **BUG THIS CATCHES**: Would catch a rename of the `outcome` tag or its snake_case values.
#[test]
fn given_results_when_converted_to_report_then_serializes_with_outcome_tag() {
    let transport = ProbeResult::TransportError {
        stage: ProbeStage::Auth,
        cause: String::from("connection failed"),
    };
    let succeeded = ProbeResult::Succeeded {
        item_count: 0,
        token: RedactedToken::new("abc.def.ghi"),
    };

    let transport_json = serde_json::to_value(ProbeReport::from(&transport)).unwrap();
    let succeeded_json = serde_json::to_value(ProbeReport::from(&succeeded)).unwrap();

    assert_eq!(transport_json["outcome"], "transport_error");
    assert_eq!(transport_json["stage"], "token request");
    assert_eq!(succeeded_json["outcome"], "succeeded");
    assert_eq!(succeeded_json["item_count"], 0);
    assert_eq!(succeeded_json["token_prefix"], "abc.def.ghi");
}
