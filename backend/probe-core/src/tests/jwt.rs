use crate::error::ProbeError;
use crate::jwt::inspect;

use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use serde_json::json;

fn encode_token(header: &serde_json::Value, claims: &serde_json::Value) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

/// **VALUE**: Verifies that the claims the server signs into an access token are surfaced.
///
/// **WHY THIS MATTERS**: When the bundle endpoint answers 401/403, the first thing to check is
/// whether the token carries the expected user, role, and `type = access`.
#[test]
fn given_server_style_token_when_inspected_then_claims_are_decoded() {
    // GIVEN: A token shaped like the ones the server issues
    let token = encode_token(
        &json!({"alg": "HS512"}),
        &json!({
            "userId": 1,
            "email": "test@ttelgo.com",
            "role": "USER",
            "type": "access",
            "sub": "test@ttelgo.com",
            "iat": 1_700_000_000u64,
            "exp": 1_702_592_000u64
        }),
    );

    // WHEN: Inspecting it
    let inspection = inspect(&token).unwrap();

    // THEN: Header and claims are available
    assert_eq!(inspection.algorithm.as_deref(), Some("HS512"));
    assert_eq!(inspection.user_id, Some(1));
    assert_eq!(inspection.email.as_deref(), Some("test@ttelgo.com"));
    assert_eq!(inspection.role.as_deref(), Some("USER"));
    assert_eq!(inspection.token_type.as_deref(), Some("access"));
    assert_eq!(inspection.expires_at, Some(1_702_592_000));
    assert_eq!(inspection.claims["sub"], "test@ttelgo.com");
}

#[test]
fn given_padded_segments_when_inspected_then_padding_is_tolerated() {
    // {"alg":"none"} is 14 bytes, so standard encoding pads it
    let header = URL_SAFE.encode(json!({"alg": "none"}).to_string());
    let claims = URL_SAFE.encode(json!({"userId": 7}).to_string());
    assert!(header.ends_with('='));

    let inspection = inspect(&format!("{header}.{claims}.sig")).unwrap();

    assert_eq!(inspection.algorithm.as_deref(), Some("none"));
    assert_eq!(inspection.user_id, Some(7));
}

#[test]
fn given_opaque_token_when_inspected_then_returns_parse_error() {
    let result = inspect("abc.def.ghi");

    assert!(matches!(result, Err(ProbeError::Parse { .. })));
}

#[test]
fn given_single_segment_when_inspected_then_returns_parse_error() {
    let result = inspect("not-a-jwt");

    match result {
        Err(ProbeError::Parse { message, .. }) => assert!(message.contains("segment")),
        other => panic!("expected Parse error, got {other:?}"),
    }
}
