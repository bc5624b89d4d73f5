//! Logging for the probe command line.
//!
//! Colored output on stderr (stdout is reserved for the report), plus an
//! optional plain-text log file. Initialization is thread-safe and idempotent.

use crate::error::CliError;

use common::ErrorLocation;

use std::io::stderr;
use std::panic::Location;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, debug, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

/// Log file name inside `--log-dir`.
pub const LOG_FILE_NAME: &str = "ttelgo-probe.log";

const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";
const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

/// Default log level for debug builds.
#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Default log level for release builds.
#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Install the global logger.
///
/// Safe to call more than once: later calls log a warning and return Ok.
///
/// # Errors
///
/// Returns [`CliError::Logger`] if the log file cannot be created or a
/// global logger is already installed by someone else.
pub fn initialize(level: LevelFilter, log_dir: Option<&Path>) -> Result<(), CliError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = build_dispatch(level, log_dir).and_then(|dispatch| {
            dispatch.apply().map_err(|e| CliError::Logger {
                message: format!("Failed to initialize logger: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })
        });
        if result.is_ok() {
            debug!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{level:?}");
        }
    });

    result
}

/// Build the stderr (+ file) dispatch without installing it.
#[track_caller]
pub fn build_dispatch(level: LevelFilter, log_dir: Option<&Path>) -> Result<Dispatch, CliError> {
    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    let stderr_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(stderr());

    let mut base_dispatch = Dispatch::new().level(level).chain(stderr_dispatch);

    if let Some(dir) = log_dir {
        let log_file_path = dir.join(LOG_FILE_NAME);
        let log_file = fern::log_file(&log_file_path).map_err(|e| CliError::Logger {
            message: format!(
                "Failed to create log file {}: {e}",
                log_file_path.display()
            ),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Plain text, no colors
        let file_dispatch = Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message} [{file}:{line}]",
                    date = format_rfc3339(SystemTime::now()),
                    level = record.level(),
                    message = message,
                    file = record.file().unwrap_or("unknown"),
                    line = record.line().unwrap_or(0)
                ))
            })
            .chain(log_file);

        base_dispatch = base_dispatch.chain(file_dispatch);
    }

    Ok(base_dispatch)
}
