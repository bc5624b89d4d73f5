use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProbeError {
    /// Connection refused, timeout, or the body could not be read.
    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    /// Body was not JSON or lacked a field the probe needs.
    #[error("Parse Error: {message} {location}")]
    Parse {
        message: String,
        location: ErrorLocation,
    },

    /// Server answered with `"success": false`.
    #[error("Rejected Error: {message} {location}")]
    Rejected {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    /// Non-2xx status; `message` holds the status and a body excerpt.
    #[error("Status Error: {message} {location}")]
    Status {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid URL Error: {message} {location}")]
    InvalidUrl {
        message: String,
        location: ErrorLocation,
    },

    /// Builder option out of range.
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP Client Error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },
}

impl ProbeError {
    /// Status code attached to the error, if the server answered at all.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            ProbeError::Rejected { status, .. } | ProbeError::Status { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Message without the location suffix, suitable for a probe result.
    pub fn message(&self) -> &str {
        match self {
            ProbeError::Transport { message, .. }
            | ProbeError::Parse { message, .. }
            | ProbeError::Rejected { message, .. }
            | ProbeError::Status { message, .. }
            | ProbeError::InvalidUrl { message, .. }
            | ProbeError::Validation { message, .. }
            | ProbeError::Client { message, .. } => message,
        }
    }
}

impl From<url::ParseError> for ProbeError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ProbeError::InvalidUrl {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("request timed out: {error}")
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };

        ProbeError::Transport {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ProbeError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ProbeError::Parse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<base64::DecodeError> for ProbeError {
    #[track_caller]
    fn from(error: base64::DecodeError) -> Self {
        ProbeError::Parse {
            message: format!("invalid base64url segment: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
