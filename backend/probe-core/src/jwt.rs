//! Unverified JWT inspection for diagnostics.
//!
//! Decodes the header and payload of a compact JWS so a human can see what
//! the server put in the token. The signature is not checked; nothing here
//! should be used to make an authorization decision.

use crate::error::ProbeError;

use common::ErrorLocation;

use std::panic::Location;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const SEGMENT_SEPARATOR: char = '.';

#[derive(Debug, Default, Deserialize)]
struct JwtHeader {
    #[serde(default)]
    alg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JwtClaims {
    #[serde(default)]
    user_id: Option<u64>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default, rename = "type")]
    token_type: Option<String>,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    iat: Option<u64>,
    #[serde(default)]
    exp: Option<u64>,
}

/// Claims the ttelgo server puts into its access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JwtInspection {
    pub algorithm: Option<String>,
    pub user_id: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    /// `access` or `refresh`.
    pub token_type: Option<String>,
    pub subject: Option<String>,
    pub issued_at: Option<u64>,
    pub expires_at: Option<u64>,
    /// Full decoded payload, for claims not modelled above.
    pub claims: Value,
}

/// Decode header and payload of `token`.
///
/// # Errors
/// Returns [`ProbeError::Parse`] if the token has fewer than two segments, a
/// segment is not base64url, or a segment is not a JSON object.
#[track_caller]
pub fn inspect(token: &str) -> Result<JwtInspection, ProbeError> {
    let mut segments = token.trim().split(SEGMENT_SEPARATOR);

    let (header_segment, payload_segment) = match (segments.next(), segments.next()) {
        (Some(header), Some(payload)) if !header.is_empty() && !payload.is_empty() => {
            (header, payload)
        }
        _ => {
            return Err(ProbeError::Parse {
                message: String::from("JWT must have at least a header and a payload segment"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    let header_value = decode_segment(header_segment)?;
    let claims_value = decode_segment(payload_segment)?;

    let header: JwtHeader = serde_json::from_value(header_value)?;
    let claims: JwtClaims = serde_json::from_value(claims_value.clone())?;

    Ok(JwtInspection {
        algorithm: header.alg,
        user_id: claims.user_id,
        email: claims.email,
        role: claims.role,
        token_type: claims.token_type,
        subject: claims.sub,
        issued_at: claims.iat,
        expires_at: claims.exp,
        claims: claims_value,
    })
}

#[track_caller]
fn decode_segment(segment: &str) -> Result<Value, ProbeError> {
    // Some encoders pad anyway
    let bytes = URL_SAFE_NO_PAD.decode(segment.trim_end_matches('='))?;
    let value: Value = serde_json::from_slice(&bytes)?;

    if !value.is_object() {
        return Err(ProbeError::Parse {
            message: String::from("JWT segment is not a JSON object"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(value)
}
