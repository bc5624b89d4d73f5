pub mod builder;
pub mod result;

pub use builder::ProbeClientBuilder;
pub use result::{ProbeResult, ProbeStage};

use crate::error::ProbeError;
use crate::{AUTH_TOKEN_ENDPOINT, AUTH_VALIDATE_ENDPOINT, BUNDLES_ENDPOINT};
use crate::models::{
    ApiEnvelope, BundleListData, BundlePage, Credentials, TokenData, TokenGrant, TokenValidation,
    ValidationBody,
};

use common::{ErrorLocation, HttpStatusCode, RedactedToken};

use std::panic::Location;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

pub(crate) const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(10);
pub const DEFAULT_PAGE_SIZE: u32 = 2;
/// Characters of a response body kept for diagnostics.
pub const BODY_EXCERPT_CHARS: usize = 200;

const PAGE_SIZE_QUERY_KEY: &str = "size";
const TOKEN_QUERY_KEY: &str = "token";

/// Client for the ttelgo test-auth and bundle endpoints.
///
/// Holds no session state: every [`probe`](Self::probe) fetches a fresh token.
#[derive(Clone)]
pub struct ProbeClient {
    base_url: Url,
    client: Client,
    page_size: u32,
    timeout: Duration,
}

impl ProbeClient {
    /// Client with default timeout and page size.
    pub fn new(base_url: &str) -> Result<Self, ProbeError> {
        ProbeClientBuilder::new(base_url).build()
    }

    pub fn builder(base_url: impl Into<String>) -> ProbeClientBuilder {
        ProbeClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run the full round trip: token request, then one bundle page with
    /// that token. Never fails; every outcome is a [`ProbeResult`].
    pub async fn probe(&self, credentials: &Credentials) -> ProbeResult {
        let grant = match self.request_token(credentials).await {
            Ok(grant) => grant,
            Err(error) => {
                warn!("Token request failed: {error}");
                return ProbeResult::from_auth_error(error);
            }
        };

        debug!(
            "Token obtained for user {} ({} bytes, expires in {}s)",
            grant.user_id,
            grant.access_token.len(),
            grant.expires_in.as_secs()
        );

        let listing = self.list_bundles(&grant.access_token).await;
        match listing {
            Ok(page) => {
                info!("Bundle listing succeeded with {} bundles", page.len());
                ProbeResult::Succeeded {
                    item_count: page.len(),
                    token: grant.access_token,
                }
            }
            Err(error) => {
                warn!("Bundle listing failed: {error}");
                ProbeResult::from_list_error(error)
            }
        }
    }

    /// `POST /api/v1/auth/test/token`.
    ///
    /// # Errors
    /// - [`ProbeError::Validation`] if `credentials` break the server's rules;
    ///   nothing is sent in that case
    /// - [`ProbeError::Transport`] if the server cannot be reached in time
    /// - [`ProbeError::Rejected`] if the server answers `"success": false`
    /// - [`ProbeError::Status`] for a non-2xx status with an unparsable body
    /// - [`ProbeError::Parse`] if the body is not a token envelope
    pub async fn request_token(&self, credentials: &Credentials) -> Result<TokenGrant, ProbeError> {
        credentials.validate()?;
        let url = self.base_url.join(AUTH_TOKEN_ENDPOINT)?;
        debug!(
            "Requesting test token for user {} ({}) at {url}",
            credentials.user_id, credentials.role
        );

        let response = self.client.post(url).json(credentials).send().await?;
        let (status, body) = read_body(response).await?;
        // Body holds the token; status only
        debug!("Token endpoint answered HTTP {status}");

        let envelope: ApiEnvelope<Value> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(status_error(status, &body)),
            Err(e) => {
                return Err(ProbeError::Parse {
                    message: format!("Failed to parse token response: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        if !envelope.success {
            return Err(ProbeError::Rejected {
                status,
                message: envelope
                    .message
                    .unwrap_or_else(|| String::from("authentication rejected")),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let data = match envelope.data {
            Some(data) if !data.is_null() => data,
            _ => {
                return Err(ProbeError::Parse {
                    message: String::from("Token response reported success without data"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let token_data: TokenData = serde_json::from_value(data)?;
        if token_data.access_token.is_empty() {
            return Err(ProbeError::Parse {
                message: String::from("Token response carried an empty accessToken"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(TokenGrant::from(token_data))
    }

    /// `GET /api/v1/bundles?size={page_size}` with the token as bearer.
    ///
    /// # Errors
    /// - [`ProbeError::Status`] for any non-2xx status, carrying a body excerpt
    /// - [`ProbeError::Rejected`] if the body says `"success": false`
    pub async fn list_bundles(&self, token: &RedactedToken) -> Result<BundlePage, ProbeError> {
        let mut url = self.base_url.join(BUNDLES_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair(PAGE_SIZE_QUERY_KEY, &self.page_size.to_string());
        debug!("Listing bundles at {url}");

        let response = self
            .client
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let (status, body) = read_body(response).await?;
        debug!("Bundle listing answered HTTP {status}: {}", excerpt(&body));

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let envelope: ApiEnvelope<Value> =
            serde_json::from_str(&body).map_err(|e| bundle_parse_error(&e, &body))?;

        if !envelope.success {
            return Err(ProbeError::Rejected {
                status,
                message: envelope
                    .message
                    .unwrap_or_else(|| String::from("bundle listing rejected")),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let data: BundleListData = match envelope.data {
            Some(data) if !data.is_null() => {
                serde_json::from_value(data).map_err(|e| bundle_parse_error(&e, &body))?
            }
            _ => BundleListData::default(),
        };

        Ok(BundlePage::from(data))
    }

    /// `GET /api/v1/auth/test/validate?token=...`.
    ///
    /// # Errors
    /// Returns [`ProbeError::Status`] for non-2xx, [`ProbeError::Rejected`] for an
    /// enveloped `"success": false`, [`ProbeError::Parse`] otherwise.
    pub async fn validate_token(
        &self,
        token: &RedactedToken,
    ) -> Result<TokenValidation, ProbeError> {
        let mut url = self.base_url.join(AUTH_VALIDATE_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair(TOKEN_QUERY_KEY, token.as_str());
        debug!("Validating token ({} bytes)", token.len());

        let response = self.client.get(url).send().await?;
        let (status, body) = read_body(response).await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        match serde_json::from_str::<ValidationBody>(&body)? {
            ValidationBody::Bare(validation) => Ok(validation),
            ValidationBody::Enveloped(envelope) if !envelope.success => {
                Err(ProbeError::Rejected {
                    status,
                    message: envelope
                        .message
                        .unwrap_or_else(|| String::from("token validation rejected")),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            ValidationBody::Enveloped(envelope) => {
                envelope.data.ok_or_else(|| ProbeError::Parse {
                    message: String::from("Validation response reported success without data"),
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }
}

/// Probe `base_url` once with default timeout and page size.
///
/// An unusable `base_url` comes back as [`ProbeResult::TransportError`],
/// since no request could be sent.
pub async fn probe(base_url: &str, credentials: &Credentials) -> ProbeResult {
    match ProbeClient::new(base_url) {
        Ok(client) => client.probe(credentials).await,
        Err(error) => ProbeResult::from_auth_error(error),
    }
}

async fn read_body(response: Response) -> Result<(HttpStatusCode, String), ProbeError> {
    let status = HttpStatusCode::from(response.status().as_u16());
    let body = response.text().await?;
    Ok((status, body))
}

#[track_caller]
fn status_error(status: HttpStatusCode, body: &str) -> ProbeError {
    ProbeError::Status {
        status,
        message: format!("HTTP {status} - {}", excerpt(body)),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
fn bundle_parse_error(error: &serde_json::Error, body: &str) -> ProbeError {
    ProbeError::Parse {
        message: format!("Failed to parse bundle response: {error} - {}", excerpt(body)),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// First [`BODY_EXCERPT_CHARS`] characters of `body`, or a marker when empty.
pub fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return String::from("<empty body>");
    }
    trimmed.chars().take(BODY_EXCERPT_CHARS).collect()
}
