use crate::Credentials;
use crate::error::ProbeError;

/// **VALUE**: Verifies the credential rules the token endpoint enforces.
///
/// **WHY THIS MATTERS**: Library callers build `Credentials` by hand and skip the config
/// file checks. A `userId` of 0 or a blank email would only come back as a vague server
/// error, so it is caught before anything is sent.
#[test]
fn given_default_credentials_when_validated_then_ok() {
    assert!(Credentials::default().validate().is_ok());
}

#[test]
fn given_zero_user_id_when_validated_then_returns_validation_error() {
    let credentials = Credentials::new(0, "test@ttelgo.com", "USER");

    match credentials.validate() {
        Err(ProbeError::Validation { message, .. }) => assert!(message.contains("userId")),
        other => panic!("expected Validation error, got {other:?}"),
    }
}

#[test]
fn given_blank_email_when_validated_then_returns_validation_error() {
    let credentials = Credentials::new(1, "   ", "USER");

    match credentials.validate() {
        Err(ProbeError::Validation { message, .. }) => assert!(message.contains("email")),
        other => panic!("expected Validation error, got {other:?}"),
    }
}
