use crate::error::ProbeError;
use crate::probe_client::{DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_DURATION, ProbeClient};

use common::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use reqwest::Client;
use url::Url;

/// Builder for a validated [`ProbeClient`].
#[derive(Debug)]
pub struct ProbeClientBuilder {
    base_url: String,
    timeout: Duration,
    page_size: u32,
}

impl ProbeClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_DURATION,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Upper bound for each request, connect through body.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Value sent as `?size=` on the bundle listing.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[track_caller]
    pub fn build(self) -> Result<ProbeClient, ProbeError> {
        let trimmed = self.base_url.trim();

        if trimmed.is_empty() {
            return Err(ProbeError::InvalidUrl {
                message: String::from("Base URL cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Url::join drops the last path segment unless it ends in '/'
        let mut normalized = trimmed.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let base_url = Url::parse(&normalized)?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(ProbeError::InvalidUrl {
                message: format!("Base URL must be http or https: {trimmed}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.page_size == 0 {
            return Err(ProbeError::Validation {
                message: String::from("Page size must be at least 1"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.timeout.is_zero() {
            return Err(ProbeError::Validation {
                message: String::from("Timeout must be non-zero"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.timeout)
            .build()
            .map_err(|e| ProbeError::Client {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(ProbeClient {
            base_url,
            client,
            page_size: self.page_size,
            timeout: self.timeout,
        })
    }
}
