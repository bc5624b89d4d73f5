// Unit tests for logger module initialization logic
// Tests focus on idempotency and error handling

use crate::error::CliError;
use crate::logger::{LOG_FILE_NAME, build_dispatch, initialize};

use std::path::PathBuf;

use log::LevelFilter;
use tempfile::TempDir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: The test harness and the binary can both reach initialization.
/// If the second call errors, every test after the first would fail for the wrong reason.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // WHEN: Calling initialize twice without a log file
    let result1 = initialize(LevelFilter::Warn, None);
    let result2 = initialize(LevelFilter::Warn, None);

    // THEN: Both should return Ok
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

/// **VALUE**: Verifies that an unusable log directory is an error, not a panic.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` were unwrapped.
#[test]
fn given_invalid_log_dir_when_building_dispatch_then_returns_logger_error() {
    // GIVEN: A path that cannot hold a file on Unix-like systems
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Building the dispatch
    let result = build_dispatch(LevelFilter::Info, Some(&invalid_dir));

    // THEN: Logger error
    assert!(matches!(result, Err(CliError::Logger { .. })));
}

#[test]
fn given_writable_log_dir_when_building_dispatch_then_creates_log_file() {
    let dir = TempDir::new().unwrap();

    let result = build_dispatch(LevelFilter::Info, Some(dir.path()));

    assert!(result.is_ok());
    assert!(dir.path().join(LOG_FILE_NAME).exists());
}
