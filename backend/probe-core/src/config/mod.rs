use crate::error::ConfigError;
use crate::models::{Credentials, DEFAULT_EMAIL, DEFAULT_ROLE, DEFAULT_USER_ID};
use crate::probe_client::{DEFAULT_PAGE_SIZE, ProbeClient, ProbeClientBuilder};

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "probe.toml";
const CONFIG_DIR_NAME: &str = "ttelgo-probe";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_PAGE_SIZE: u32 = 100;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 60;

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CredentialsSection {
    #[serde(default = "default_user_id")]
    pub user_id: u64,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

impl Default for CredentialsSection {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            email: default_email(),
            role: default_role(),
        }
    }
}

/// Contents of `probe.toml`:
///
/// ```toml
/// [server]
/// base_url = "https://ttelgo.com"
/// timeout_secs = 10
/// page_size = 2
///
/// [credentials]
/// user_id = 1
/// email = "test@ttelgo.com"
/// role = "USER"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub credentials: CredentialsSection,
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
fn default_user_id() -> u64 {
    DEFAULT_USER_ID
}
fn default_email() -> String {
    DEFAULT_EMAIL.to_string()
}
fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ProbeConfig {
    /// `{platform config dir}/ttelgo-probe`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DirectoryNotFound`] on platforms without a config dir.
    #[track_caller]
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME))
            .ok_or_else(|| ConfigError::DirectoryNotFound {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("platform has no user config directory"),
            })
    }

    /// Load config from {config_dir}/probe.toml.
    ///
    /// # Returns
    ///
    /// Returns `Ok(ProbeConfig)` if loaded successfully or defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but is unreadable or invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: ProbeConfig = toml::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config TOML: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.server.base_url;
        if url.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "base_url cannot be empty string".to_string(),
            });
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid URL format: {}", url),
            });
        }

        if self.server.page_size == 0 || self.server.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid page size: {} (must be 1-{})",
                    self.server.page_size, MAX_PAGE_SIZE
                ),
            });
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.server.timeout_secs) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid timeout: {}s (must be {}-{})",
                    self.server.timeout_secs, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS
                ),
            });
        }

        if self.credentials.user_id == 0 {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "user_id must be positive".to_string(),
            });
        }

        if self.credentials.email.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "email cannot be empty".to_string(),
            });
        }

        if self.credentials.role.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "role cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.timeout_secs)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.credentials.user_id,
            self.credentials.email.clone(),
            self.credentials.role.clone(),
        )
    }

    /// Builder preloaded with the server section.
    pub fn client_builder(&self) -> ProbeClientBuilder {
        ProbeClient::builder(self.server.base_url.clone())
            .with_timeout(self.timeout())
            .with_page_size(self.server.page_size)
    }
}
