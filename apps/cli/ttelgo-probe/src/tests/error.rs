// Unit tests for error module
// Tests error serialization used by --format json consumers

use crate::error::CliError;

use common::ErrorLocation;

use probe_core::ConfigError;

use std::panic::Location;

/// **VALUE**: Tests that errors serialize with a variant tag.
///
/// **WHY THIS MATTERS**: CI wrappers parse the JSON error to decide whether a failure is a
/// setup problem (config) or a live API problem. Losing the tag makes them all look alike.
///
/// **BUG THIS CATCHES**: Would catch removal of `#[derive(Serialize)]` or of the
/// `tag`/`content` attributes.
#[test]
fn given_cli_error_when_serialized_then_contains_variant_and_message() {
    // GIVEN: A CliError
    let err = CliError::Output {
        message: String::from("Test"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Serializing to JSON
    let json = serde_json::to_string(&err).unwrap();

    // THEN: Variant and message are present
    assert!(json.contains("\"type\":\"Output\""));
    assert!(json.contains("Test"));
}

#[test]
fn given_config_error_when_converted_then_becomes_config_variant() {
    let config_error = ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("Invalid page size: 0 (must be 1-100)"),
    };

    let err = CliError::from(config_error);

    match err {
        CliError::Config { message, .. } => assert!(message.contains("Invalid page size")),
        other => panic!("expected Config variant, got {other:?}"),
    }
}
