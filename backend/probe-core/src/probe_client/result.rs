use crate::error::ProbeError;

use common::{HttpStatusCode, RedactedToken};

use std::fmt;

/// Characters of the token shown next to a successful result.
pub const TOKEN_DISPLAY_PREFIX_CHARS: usize = 50;

/// Which of the two probe requests a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStage {
    Auth,
    List,
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStage::Auth => write!(f, "token request"),
            ProbeStage::List => write!(f, "bundle listing"),
        }
    }
}

/// Terminal outcome of one auth-then-list probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Succeeded {
        item_count: usize,
        token: RedactedToken,
    },
    AuthFailed {
        message: String,
    },
    ListFailed {
        status_code: Option<HttpStatusCode>,
        message: String,
    },
    TransportError {
        stage: ProbeStage,
        cause: String,
    },
}

impl ProbeResult {
    /// Fold a token request failure into a result. Anything short of a
    /// network failure counts as the server refusing to authenticate us.
    pub fn from_auth_error(error: ProbeError) -> Self {
        match error {
            ProbeError::Transport { message, .. }
            | ProbeError::InvalidUrl { message, .. }
            | ProbeError::Client { message, .. } => ProbeResult::TransportError {
                stage: ProbeStage::Auth,
                cause: message,
            },
            other => ProbeResult::AuthFailed {
                message: other.message().to_string(),
            },
        }
    }

    pub fn from_list_error(error: ProbeError) -> Self {
        match error {
            ProbeError::Transport { message, .. }
            | ProbeError::InvalidUrl { message, .. }
            | ProbeError::Client { message, .. } => ProbeResult::TransportError {
                stage: ProbeStage::List,
                cause: message,
            },
            other => ProbeResult::ListFailed {
                status_code: other.status(),
                message: other.message().to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeResult::Succeeded { .. })
    }

    pub fn item_count(&self) -> Option<usize> {
        match self {
            ProbeResult::Succeeded { item_count, .. } => Some(*item_count),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&RedactedToken> {
        match self {
            ProbeResult::Succeeded { token, .. } => Some(token),
            _ => None,
        }
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeResult::Succeeded { item_count, token } => write!(
                f,
                "SUCCESS: found {item_count} bundles (token {})",
                token.prefix(TOKEN_DISPLAY_PREFIX_CHARS)
            ),
            ProbeResult::AuthFailed { message } => write!(f, "token error: {message}"),
            ProbeResult::ListFailed {
                status_code: Some(status),
                message,
            } => write!(f, "bundles error (status {status}): {message}"),
            ProbeResult::ListFailed {
                status_code: None,
                message,
            } => write!(f, "bundles error: {message}"),
            ProbeResult::TransportError { stage, cause } => {
                write!(f, "transport error during {stage}: {cause}")
            }
        }
    }
}
