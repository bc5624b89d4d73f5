use crate::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies that error locations render as `[file:line:column]`.
///
/// **WHY THIS MATTERS**: Every probe error message ends with this suffix. When a probe fails
/// against a live server, it is the only pointer back to the code path that produced it.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops the brackets or the file name.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    // GIVEN: A location captured in this file
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting as string
    let formatted = location.to_string();

    // THEN: Should be "[file:line:column]"
    assert!(formatted.starts_with('['));
    assert!(formatted.ends_with(']'));
    assert!(formatted.matches(':').count() >= 2);
    assert!(formatted.contains(&location.line.to_string()));
}
