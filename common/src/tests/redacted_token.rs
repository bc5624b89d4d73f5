use crate::RedactedToken;

/// **VALUE**: Verifies that neither Debug nor Display leak the token value.
///
/// **WHY THIS MATTERS**: Probe results and errors are logged with `{:?}`. The token is a
/// 30-day bearer credential for the live API; it must never land in a log file by accident.
///
/// **BUG THIS CATCHES**: Would catch a `#[derive(Debug)]` sneaking back onto the wrapper.
#[test]
fn given_token_when_formatted_then_value_is_not_exposed() {
    // GIVEN: A token with a recognisable value
    let token = RedactedToken::new("eyJhbGciOiJIUzUxMiJ9.secret-payload.signature");

    // WHEN: Formatting it both ways
    let debug = format!("{token:?}");
    let display = format!("{token}");

    // THEN: Neither contains any part of the value
    assert!(!debug.contains("secret-payload"));
    assert!(!display.contains("secret-payload"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn given_long_token_when_prefixed_then_truncates_with_ellipsis() {
    let token = RedactedToken::new("abcdefghij");

    assert_eq!(token.prefix(4), "abcd...");
    assert_eq!(token.prefix(10), "abcdefghij");
    assert_eq!(token.prefix(50), "abcdefghij");
}

#[test]
fn given_token_when_serialized_then_fails() {
    let token = RedactedToken::new("abc.def.ghi");

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "RedactedToken must refuse serialization");
}
