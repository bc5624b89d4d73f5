use common::ErrorLocation;

use probe_core::{ConfigError, ProbeError};

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors that stop the command before or around a probe.
///
/// A failed probe is not one of these: it is a [`probe_core::ProbeResult`] and
/// is reported through the exit code.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum CliError {
    /// Config file missing a directory, unreadable or invalid
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// Logger could not be installed
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    /// Error from probe-core outside of a probe result (client setup, validation call)
    #[error("Probe Error: {message} {location}")]
    Probe {
        message: String,
        location: ErrorLocation,
    },

    /// Report could not be written
    #[error("Output Error: {message} {location}")]
    Output {
        message: String,
        location: ErrorLocation,
    },
}

impl From<ConfigError> for CliError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        CliError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ProbeError> for CliError {
    #[track_caller]
    fn from(error: ProbeError) -> Self {
        CliError::Probe {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        CliError::Output {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
