use crate::{DEFAULT_PAGE_SIZE, ProbeClient, ProbeError};

use std::time::Duration;

/// **VALUE**: Verifies that a base URL with a path prefix keeps that prefix.
///
/// **WHY THIS MATTERS**: Deployments behind a reverse proxy mount the API under a path
/// (`https://host/backend`). `Url::join` silently replaces the last segment unless the base
/// ends in `/`, which would send the token request to the wrong place.
///
/// **BUG THIS CATCHES**: Would catch removal of the trailing-slash normalization.
#[test]
fn given_base_url_with_path_when_building_then_path_prefix_is_preserved() {
    // GIVEN/WHEN: A base URL with a path and no trailing slash
    let client = ProbeClient::new("https://example.test/backend").unwrap();

    // THEN: Endpoints resolve below the prefix
    let joined = client.base_url().join(crate::BUNDLES_ENDPOINT).unwrap();
    assert_eq!(joined.as_str(), "https://example.test/backend/api/v1/bundles");
}

#[test]
fn given_defaults_when_building_then_uses_default_page_size_and_timeout() {
    let client = ProbeClient::new("http://localhost:8080").unwrap();

    assert_eq!(client.page_size(), DEFAULT_PAGE_SIZE);
    assert_eq!(client.timeout(), Duration::from_secs(10));
}

/// **VALUE**: Verifies that non-HTTP schemes are rejected up front.
///
/// **WHY THIS MATTERS**: A typo like `localhost:8080` parses as a URL with scheme `localhost`.
/// Catching it at build time gives a clear message instead of an opaque transport error.
#[test]
fn given_non_http_scheme_when_building_then_returns_invalid_url() {
    let result = ProbeClient::new("ftp://example.test");

    match result {
        Err(ProbeError::InvalidUrl { message, .. }) => {
            assert!(message.contains("http or https"));
        }
        Err(other) => panic!("expected InvalidUrl, got {other:?}"),
        Ok(_) => panic!("expected InvalidUrl, got a client"),
    }
}

#[test]
fn given_empty_base_url_when_building_then_returns_invalid_url() {
    let result = ProbeClient::new("   ");

    assert!(matches!(result, Err(ProbeError::InvalidUrl { .. })));
}

#[test]
fn given_zero_page_size_when_building_then_returns_validation_error() {
    let result = ProbeClient::builder("http://localhost:8080")
        .with_page_size(0)
        .build();

    assert!(matches!(result, Err(ProbeError::Validation { .. })));
}

#[test]
fn given_zero_timeout_when_building_then_returns_validation_error() {
    let result = ProbeClient::builder("http://localhost:8080")
        .with_timeout(Duration::ZERO)
        .build();

    assert!(matches!(result, Err(ProbeError::Validation { .. })));
}
