use crate::cli::{App, Command, OutputFormat};
use crate::error::CliError;

use probe_core::TTELGO_LIVE_BASE_URL;

use clap::Parser;
use tempfile::TempDir;

fn parse(args: &[&str]) -> App {
    App::try_parse_from(args).unwrap()
}

/// **VALUE**: Verifies that no subcommand means the plain probe with text output.
///
/// **WHY THIS MATTERS**: `ttelgo-probe` with no arguments is the smoke test people run
/// after a deploy. It must keep doing the full round trip.
#[test]
fn given_no_arguments_when_parsed_then_defaults_to_probe_and_text() {
    let app = parse(&["ttelgo-probe"]);

    assert!(app.command.is_none());
    assert_eq!(app.options.format, OutputFormat::Text);
    assert!(!app.options.live);
}

#[test]
fn given_global_flags_after_subcommand_when_parsed_then_are_accepted() {
    let app = parse(&[
        "ttelgo-probe",
        "validate",
        "--token",
        "abc.def.ghi",
        "--format",
        "json",
        "--size",
        "1",
    ]);

    match app.command {
        Some(Command::Validate { token }) => assert_eq!(token, "abc.def.ghi"),
        other => panic!("expected validate, got {other:?}"),
    }
    assert_eq!(app.options.format, OutputFormat::Json);
    assert_eq!(app.options.size, Some(1));
}

/// **VALUE**: Verifies that flags override the config file and `--live` wins over both.
///
/// **WHY THIS MATTERS**: Pointing a probe at production should take exactly one flag and
/// never depend on what happens to be in someone's probe.toml.
#[test]
fn given_config_file_and_flags_when_resolving_then_flags_win() {
    // GIVEN: A config file pointing at staging with page size 5
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("probe.toml"),
        "[server]\nbase_url = \"https://staging.example.test\"\npage_size = 5\n",
    )
    .unwrap();
    let dir_arg = dir.path().to_str().unwrap().to_string();

    // WHEN: Overriding size and asking for the live API
    let app = parse(&[
        "ttelgo-probe",
        "--config-dir",
        &dir_arg,
        "--size",
        "1",
        "--role",
        "ADMIN",
        "--live",
    ]);
    let config = app.options.resolve_config().unwrap();

    // THEN: Flags are applied on top of the file
    assert_eq!(config.server.base_url, TTELGO_LIVE_BASE_URL);
    assert_eq!(config.server.page_size, 1);
    assert_eq!(config.credentials.role, "ADMIN");
    assert_eq!(config.credentials.user_id, 1);
}

#[test]
fn given_invalid_override_when_resolving_then_returns_config_error() {
    let dir = TempDir::new().unwrap();
    let dir_arg = dir.path().to_str().unwrap().to_string();
    let app = parse(&["ttelgo-probe", "--config-dir", &dir_arg, "--size", "0"]);

    let result = app.options.resolve_config();

    assert!(matches!(result, Err(CliError::Config { .. })));
}
