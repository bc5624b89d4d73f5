use probe_core::{HttpStatusCode, ProbeError};

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies that `ProbeError` messages carry the file/line they were raised at.
///
/// **WHY THIS MATTERS**: Probe failures are often reported from a CI log with nothing else
/// attached. The location suffix says which request step failed.
///
/// **BUG THIS CATCHES**: Would catch a Display format that drops the location.
#[test]
fn given_status_error_when_formatted_then_includes_kind_message_and_location() {
    // GIVEN: A Status error raised here
    let err = ProbeError::Status {
        status: HttpStatusCode(500),
        message: String::from("HTTP 500 - boom"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Formatting
    let rendered = err.to_string();

    // THEN: Kind, message and this file are present
    assert!(rendered.contains("Status Error"));
    assert!(rendered.contains("HTTP 500 - boom"));
    assert!(rendered.contains("probe.rs"));
}

/// **VALUE**: Verifies that the `From<serde_json::Error>` conversion records the `?` site.
///
/// **WHY THIS MATTERS**: `#[track_caller]` on the conversion is what makes the location point
/// at the failing parse instead of at the impl block in the error module.
#[test]
fn given_json_error_when_converted_then_location_points_at_call_site() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let err = ProbeError::from(json_error);

    match err {
        ProbeError::Parse { location, .. } => {
            assert!(location.file.contains("integration_tests"));
        }
        other => panic!("expected Parse, got {other:?}"),
    }
}

#[test]
fn given_transport_error_when_asked_for_status_then_returns_none() {
    let err = ProbeError::Transport {
        message: String::from("connection failed"),
        location: ErrorLocation::from(Location::caller()),
    };

    assert_eq!(err.status(), None);
    assert_eq!(err.message(), "connection failed");
}
