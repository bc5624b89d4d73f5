use crate::config::{DEFAULT_BASE_URL, ProbeConfig};
use crate::error::ConfigError;
use crate::models::Credentials;

use std::time::Duration;

use tempfile::TempDir;

/// **VALUE**: Verifies that a missing config file yields defaults instead of an error.
///
/// **WHY THIS MATTERS**: The probe must work out of the box against a local server with no
/// setup. Requiring a config file would break the one-command smoke test.
#[test]
fn given_missing_config_file_when_loading_then_returns_defaults() {
    // GIVEN: An empty directory
    let dir = TempDir::new().unwrap();

    // WHEN: Loading config
    let config = ProbeConfig::load(dir.path()).unwrap();

    // THEN: Defaults match the local test server and test user
    assert_eq!(config.server.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.server.page_size, 2);
    assert_eq!(config.timeout(), Duration::from_secs(10));
    assert_eq!(config.credentials(), Credentials::default());
}

#[test]
fn given_partial_config_file_when_loading_then_missing_fields_use_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("probe.toml"),
        "[server]\nbase_url = \"https://ttelgo.com\"\n\n[credentials]\nrole = \"ADMIN\"\n",
    )
    .unwrap();

    let config = ProbeConfig::load(dir.path()).unwrap();

    assert_eq!(config.server.base_url, "https://ttelgo.com");
    assert_eq!(config.server.timeout_secs, 10);
    assert_eq!(config.credentials.user_id, 1);
    assert_eq!(config.credentials.role, "ADMIN");
}

/// **VALUE**: Verifies that garbage in the config file is reported, not silently ignored.
///
/// **WHY THIS MATTERS**: Silently falling back to localhost when the user meant to probe
/// production would produce a misleading "connection refused".
#[test]
fn given_malformed_toml_when_loading_then_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("probe.toml"), "[server\nbase_url = ").unwrap();

    let result = ProbeConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn given_out_of_range_values_when_validating_then_returns_validation_error() {
    let mut config = ProbeConfig::default();
    config.server.page_size = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));

    let mut config = ProbeConfig::default();
    config.server.timeout_secs = 61;
    assert!(config.validate().is_err());

    let mut config = ProbeConfig::default();
    config.server.base_url = String::from("localhost:8080");
    assert!(config.validate().is_err());

    let mut config = ProbeConfig::default();
    config.credentials.user_id = 0;
    assert!(config.validate().is_err());

    let mut config = ProbeConfig::default();
    config.credentials.email = String::from("  ");
    assert!(config.validate().is_err());
}

#[test]
fn given_valid_config_when_building_client_then_settings_carry_over() {
    let mut config = ProbeConfig::default();
    config.server.page_size = 5;
    config.server.timeout_secs = 3;

    let client = config.client_builder().build().unwrap();

    assert_eq!(client.page_size(), 5);
    assert_eq!(client.timeout(), Duration::from_secs(3));
}
