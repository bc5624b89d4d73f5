use crate::HttpStatusCode;

/// **VALUE**: Verifies the status class helpers agree with the HTTP ranges.
///
/// **WHY THIS MATTERS**: The probe decides between `Succeeded` and `ListFailed` from
/// `is_success()`. An off-by-one here turns a 300 redirect into a "success".
#[test]
fn given_status_codes_when_classified_then_match_http_ranges() {
    assert!(HttpStatusCode(200).is_success());
    assert!(HttpStatusCode(204).is_success());
    assert!(!HttpStatusCode(300).is_success());
    assert!(!HttpStatusCode(199).is_success());
}

/// **VALUE**: Verifies which statuses count as a refused bearer token.
///
/// **WHY THIS MATTERS**: The report adds a "token refused" hint for these. A 400 or 404 is a
/// different problem and must not send someone off regenerating tokens.
#[test]
fn given_unauthorized_or_forbidden_when_checked_then_is_auth_error() {
    assert!(HttpStatusCode::from(401).is_auth_error());
    assert!(HttpStatusCode::from(403).is_auth_error());
    assert!(!HttpStatusCode::from(400).is_auth_error());
    assert!(!HttpStatusCode::from(404).is_auth_error());
    assert!(!HttpStatusCode::from(500).is_auth_error());
    assert_eq!(HttpStatusCode::from(403).to_string(), "403");
}
