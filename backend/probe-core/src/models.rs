//! Request and response shapes of the ttelgo auth and bundle endpoints.
//!
//! Wire structs (`*Data`, [`ApiEnvelope`]) mirror the JSON exactly and stay
//! crate-private. The public types are what a probe hands back to callers,
//! with tokens already wrapped in [`RedactedToken`].

use crate::error::ProbeError;

use common::{ErrorLocation, RedactedToken};

use std::panic::Location;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_USER_ID: u64 = 1;
pub const DEFAULT_EMAIL: &str = "test@ttelgo.com";
pub const DEFAULT_ROLE: &str = "USER";

// ============================================
// REQUEST
// ============================================

/// Test credentials posted to the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub user_id: u64,
    pub email: String,
    pub role: String,
}

impl Credentials {
    pub fn new(user_id: u64, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
            role: role.into(),
        }
    }

    /// The server issues tokens only for a positive user id and a non-empty email.
    ///
    /// # Errors
    /// Returns [`ProbeError::Validation`] naming the first offending field.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ProbeError> {
        let problem = if self.user_id == 0 {
            "userId must be greater than 0"
        } else if self.email.trim().is_empty() {
            "email must not be empty"
        } else {
            return Ok(());
        };

        Err(ProbeError::Validation {
            message: format!("Invalid credentials: {problem}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID, DEFAULT_EMAIL, DEFAULT_ROLE)
    }
}

// ============================================
// WIRE FORMAT
// ============================================

/// `{"success": bool, "data": T?, "message": string?}`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenData {
    pub access_token: String,
    pub user_id: u64,
    pub email: String,
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// `bundles` may be absent or `null`; both count as an empty page.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct BundleListData {
    #[serde(default)]
    pub bundles: Option<Vec<Value>>,
}

/// The validate endpoint answers either bare or wrapped in the usual envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ValidationBody {
    Enveloped(ApiEnvelope<TokenValidation>),
    Bare(TokenValidation),
}

// ============================================
// PUBLIC RESULTS
// ============================================

/// A successful answer from the token endpoint.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub access_token: RedactedToken,
    pub user_id: u64,
    pub email: String,
    pub expires_in: Duration,
    pub refresh_token: Option<RedactedToken>,
    pub token_type: Option<String>,
}

impl From<TokenData> for TokenGrant {
    fn from(data: TokenData) -> Self {
        Self {
            access_token: RedactedToken::new(data.access_token),
            user_id: data.user_id,
            email: data.email,
            expires_in: Duration::from_secs(data.expires_in),
            refresh_token: data.refresh_token.map(RedactedToken::new),
            token_type: data.token_type,
        }
    }
}

impl TokenGrant {
    /// Lifetime in days, as the token scripts used to print it.
    pub fn expires_in_days(&self) -> f64 {
        self.expires_in.as_secs_f64() / 86_400.0
    }
}

/// One page of bundles. Records are opaque to the probe.
#[derive(Debug, Clone, Default)]
pub struct BundlePage {
    pub bundles: Vec<Value>,
}

impl BundlePage {
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl From<BundleListData> for BundlePage {
    fn from(data: BundleListData) -> Self {
        Self {
            bundles: data.bundles.unwrap_or_default(),
        }
    }
}

/// Answer of `GET /api/v1/auth/test/validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidation {
    pub valid: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub expired: bool,
}
