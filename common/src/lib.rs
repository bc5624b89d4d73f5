//! Shared primitives for the ttelgo probe workspace.
//!
//! Nothing in here talks to the network. These are the small value types
//! that both the probe client and the command-line front end pass around.
//!
//! ## Architecture
//!
//! - **common** (this crate): Location-tracked errors, status codes, token wrapper
//! - **probe-core**: The auth-then-list probe client and its wire models
//! - **ttelgo-probe**: Command-line application presenting probe results

pub mod error;
pub mod http_status;
pub mod redacted_token;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;
