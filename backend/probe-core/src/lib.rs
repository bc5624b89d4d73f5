pub mod config;
pub mod error;
pub mod jwt;
pub mod models;

mod probe_client;
#[cfg(test)]
mod tests;

pub use config::ProbeConfig;
pub use error::{ConfigError, ProbeError};
pub use models::{BundlePage, Credentials, TokenGrant, TokenValidation};
pub use probe_client::{
    BODY_EXCERPT_CHARS, DEFAULT_PAGE_SIZE, ProbeClient, ProbeClientBuilder, ProbeResult,
    ProbeStage, excerpt, probe,
};
pub use probe_client::result::TOKEN_DISPLAY_PREFIX_CHARS;

pub use common::{HttpStatusCode, RedactedToken};

pub const TTELGO_LIVE_BASE_URL: &str = "https://ttelgo.com";
pub const API_VERSION_PREFIX: &str = "api/v1";
/// Paths relative to the base URL.
pub const AUTH_TOKEN_ENDPOINT: &str =
    const_format::concatcp!(API_VERSION_PREFIX, "/auth/test/token");
pub const AUTH_VALIDATE_ENDPOINT: &str =
    const_format::concatcp!(API_VERSION_PREFIX, "/auth/test/validate");
pub const BUNDLES_ENDPOINT: &str = const_format::concatcp!(API_VERSION_PREFIX, "/bundles");
