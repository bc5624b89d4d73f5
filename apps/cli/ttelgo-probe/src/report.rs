//! Human and JSON renderings of probe outcomes.
//!
//! Everything here is a pure function of already-obtained results, so the
//! network code never formats output and these never touch the network.

use probe_core::jwt::JwtInspection;
use probe_core::{
    AUTH_TOKEN_ENDPOINT, BUNDLES_ENDPOINT, Credentials, ProbeResult, TOKEN_DISPLAY_PREFIX_CHARS,
    TokenGrant, TokenValidation,
};

use std::fmt::Write;

use serde::Serialize;

const BANNER_WIDTH: usize = 70;
const CHECK: &str = "\u{2713}";
const CROSS: &str = "\u{2717}";
const TOKEN_REFUSED_HINT: &str =
    "Hint: the token was refused. Check the server's JWT secret and the user's role.";

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{rule}");
}

fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{endpoint}", base_url.trim_end_matches('/'))
}

/// Outcome of a probe, with the endpoint summary on success.
pub fn render_probe(result: &ProbeResult, base_url: &str, credentials: &Credentials) -> String {
    let mut out = String::new();

    match result {
        ProbeResult::Succeeded { item_count, token } => {
            let _ = writeln!(out, "{CHECK} SUCCESS! Bundles API is working!");
            let _ = writeln!(out, "Found {item_count} bundles");
            let _ = writeln!(out);
            banner(&mut out, "LIVE API ENDPOINTS:");
            let _ = writeln!(out);
            let _ = writeln!(out, "1. Get Token:");
            let _ = writeln!(
                out,
                "   POST {}",
                endpoint_url(base_url, AUTH_TOKEN_ENDPOINT)
            );
            let body = serde_json::to_string(credentials).unwrap_or_default();
            let _ = writeln!(out, "   Body: {body}");
            let _ = writeln!(out);
            let _ = writeln!(out, "2. List Bundles:");
            let _ = writeln!(out, "   GET {}", endpoint_url(base_url, BUNDLES_ENDPOINT));
            let _ = writeln!(
                out,
                "   Header: Authorization: Bearer {}",
                token.prefix(TOKEN_DISPLAY_PREFIX_CHARS)
            );
        }
        ProbeResult::AuthFailed { message } => {
            let _ = writeln!(out, "{CROSS} Failed to get token: {message}");
        }
        ProbeResult::ListFailed {
            status_code,
            message,
        } => {
            let _ = writeln!(out, "{CROSS} Bundles error: {message}");
            if let Some(status) = status_code {
                let _ = writeln!(out, "Status: {status}");
                if status.is_auth_error() {
                    let _ = writeln!(out, "{TOKEN_REFUSED_HINT}");
                }
            }
        }
        ProbeResult::TransportError { stage, cause } => {
            let _ = writeln!(out, "{CROSS} Transport error during {stage}: {cause}");
        }
    }

    out
}

/// Full token details. Prints the whole token on purpose: this is the
/// "give me a token for Postman" view.
pub fn render_grant(grant: &TokenGrant) -> String {
    let mut out = String::new();
    let token = grant.access_token.as_str();

    banner(&mut out, "FULL JWT TOKEN:");
    let _ = writeln!(out, "{token}");
    let _ = writeln!(out, "{}", "=".repeat(BANNER_WIDTH));
    let _ = writeln!(out);
    let _ = writeln!(out, "Token Details:");
    let _ = writeln!(out, "  - User ID: {}", grant.user_id);
    let _ = writeln!(out, "  - Email: {}", grant.email);
    let _ = writeln!(
        out,
        "  - Expires In: {} seconds ({:.1} days)",
        grant.expires_in.as_secs(),
        grant.expires_in_days()
    );
    if let Some(token_type) = &grant.token_type {
        let _ = writeln!(out, "  - Token Type: {token_type}");
    }
    let _ = writeln!(out);
    banner(&mut out, "USE THIS TOKEN IN POSTMAN:");
    let _ = writeln!(out, "Authorization: Bearer {token}");
    let _ = writeln!(out, "{}", "=".repeat(BANNER_WIDTH));

    out
}

pub fn render_inspection(inspection: &JwtInspection) -> String {
    fn or_unknown(value: Option<impl ToString>) -> String {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| String::from("<absent>"))
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Token algorithm: {}",
        or_unknown(inspection.algorithm.as_deref())
    );
    let _ = writeln!(out, "Token user ID: {}", or_unknown(inspection.user_id));
    let _ = writeln!(
        out,
        "Token email: {}",
        or_unknown(inspection.email.as_deref())
    );
    let _ = writeln!(
        out,
        "Token type: {}",
        or_unknown(inspection.token_type.as_deref())
    );
    let _ = writeln!(out, "Token role: {}", or_unknown(inspection.role.as_deref()));
    if let Some(exp) = inspection.expires_at {
        let _ = writeln!(out, "Token expires at (unix): {exp}");
    }
    out
}

pub fn render_validation(validation: &TokenValidation) -> String {
    let mut out = String::new();
    let mark = if validation.valid { CHECK } else { CROSS };
    let _ = writeln!(out, "{mark} {}", validation.message);
    let _ = writeln!(out, "  - Valid: {}", validation.valid);
    let _ = writeln!(out, "  - Expired: {}", validation.expired);
    if let Some(user_id) = validation.user_id {
        let _ = writeln!(out, "  - User ID: {user_id}");
    }
    if let Some(email) = &validation.email {
        let _ = writeln!(out, "  - Email: {email}");
    }
    out
}

/// Machine-readable form of a [`ProbeResult`] for `--format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProbeReport {
    Succeeded {
        item_count: usize,
        token_prefix: String,
    },
    AuthFailed {
        message: String,
    },
    ListFailed {
        status_code: Option<u16>,
        message: String,
    },
    TransportError {
        stage: String,
        cause: String,
    },
}

impl From<&ProbeResult> for ProbeReport {
    fn from(result: &ProbeResult) -> Self {
        match result {
            ProbeResult::Succeeded { item_count, token } => ProbeReport::Succeeded {
                item_count: *item_count,
                token_prefix: token.prefix(TOKEN_DISPLAY_PREFIX_CHARS),
            },
            ProbeResult::AuthFailed { message } => ProbeReport::AuthFailed {
                message: message.clone(),
            },
            ProbeResult::ListFailed {
                status_code,
                message,
            } => ProbeReport::ListFailed {
                status_code: status_code.map(|s| s.as_u16()),
                message: message.clone(),
            },
            ProbeResult::TransportError { stage, cause } => ProbeReport::TransportError {
                stage: stage.to_string(),
                cause: cause.clone(),
            },
        }
    }
}

/// `--format json` output of `inspect`: the probe outcome plus the decoded token.
///
/// `jwt` is `null` when the probe failed or the token is not a decodable JWT.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    #[serde(flatten)]
    pub probe: ProbeReport,
    pub jwt: Option<JwtInspection>,
}
