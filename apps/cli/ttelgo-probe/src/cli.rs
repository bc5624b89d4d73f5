use crate::error::CliError;
use crate::report::{
    InspectReport, ProbeReport, render_grant, render_inspection, render_probe, render_validation,
};

use common::ErrorLocation;

use probe_core::jwt::inspect;
use probe_core::{
    ProbeClient, ProbeConfig, ProbeResult, RedactedToken, TTELGO_LIVE_BASE_URL,
};

use std::io::Write;
use std::panic::Location;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "ttelgo-probe",
    version,
    about = "Get a test token from the ttelgo API and check that the bundle listing accepts it"
)]
pub struct App {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Args)]
pub struct GlobalOptions {
    /// API origin, e.g. http://localhost:8080
    #[arg(long, env = "TTELGO_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Probe the production API (overrides --base-url)
    #[arg(long, global = true)]
    pub live: bool,

    /// Bundles requested per page
    #[arg(long, global = true)]
    pub size: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[arg(long, global = true)]
    pub user_id: Option<u64>,

    #[arg(long, global = true)]
    pub email: Option<String>,

    #[arg(long, global = true)]
    pub role: Option<String>,

    /// Directory holding probe.toml
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Also write logs to ttelgo-probe.log in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Get a token and list one page of bundles (default)
    Probe,
    /// Print a full token for use in other tools, then probe with it
    Token,
    /// Probe and decode the token's JWT header and claims
    Inspect,
    /// Ask the server whether a token is still valid
    Validate {
        #[arg(long, env = "TTELGO_TOKEN")]
        token: String,
    },
}

impl GlobalOptions {
    /// Config file values with command-line overrides applied on top.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Config`] if the file is unreadable or the merged
    /// values fail validation.
    pub fn resolve_config(&self) -> Result<ProbeConfig, CliError> {
        let config_dir = match &self.config_dir {
            Some(dir) => Some(dir.clone()),
            None => match ProbeConfig::default_dir() {
                Ok(dir) => Some(dir),
                Err(e) => {
                    warn!("No config directory, using defaults: {e}");
                    None
                }
            },
        };

        let mut config = match config_dir {
            Some(dir) => ProbeConfig::load(&dir)?,
            None => ProbeConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.server.base_url = base_url.clone();
        }
        if self.live {
            config.server.base_url = TTELGO_LIVE_BASE_URL.to_string();
        }
        if let Some(size) = self.size {
            config.server.page_size = size;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.server.timeout_secs = timeout_secs;
        }
        if let Some(user_id) = self.user_id {
            config.credentials.user_id = user_id;
        }
        if let Some(email) = &self.email {
            config.credentials.email = email.clone();
        }
        if let Some(role) = &self.role {
            config.credentials.role = role.clone();
        }

        config.validate()?;
        debug!("Resolved config: {config:?}");
        Ok(config)
    }
}

/// Run the selected command, writing the report to `out`.
///
/// Returns whether the probe (or validation) succeeded; the caller maps
/// that to the exit code.
pub async fn run<W: Write>(app: &App, out: &mut W) -> Result<bool, CliError> {
    let config = app.options.resolve_config()?;
    let client = config.client_builder().build()?;
    let credentials = config.credentials();
    let format = app.options.format;

    info!(
        "Probing {} as user {} ({})",
        client.base_url(),
        credentials.user_id,
        credentials.role
    );

    let command = app.command.clone().unwrap_or(Command::Probe);
    match command {
        Command::Probe => {
            let result = client.probe(&credentials).await;
            emit_probe(out, format, &result, &config)?;
            Ok(result.is_success())
        }
        Command::Token => run_token(&client, &config, format, out).await,
        Command::Inspect => {
            let result = client.probe(&credentials).await;
            let inspection = result.token().and_then(|token| match inspect(token.as_str()) {
                Ok(inspection) => Some(inspection),
                Err(e) => {
                    warn!("Token is not a decodable JWT: {e}");
                    None
                }
            });

            match format {
                OutputFormat::Text => {
                    if let Some(inspection) = &inspection {
                        write_text(out, &render_inspection(inspection))?;
                    }
                    emit_probe(out, format, &result, &config)?;
                }
                OutputFormat::Json => write_json(
                    out,
                    &InspectReport {
                        probe: ProbeReport::from(&result),
                        jwt: inspection,
                    },
                )?,
            }
            Ok(result.is_success())
        }
        Command::Validate { token } => {
            let validation = client.validate_token(&RedactedToken::new(token)).await?;
            match format {
                OutputFormat::Text => write_text(out, &render_validation(&validation))?,
                OutputFormat::Json => write_json(out, &validation)?,
            }
            Ok(validation.valid && !validation.expired)
        }
    }
}

async fn run_token<W: Write>(
    client: &ProbeClient,
    config: &ProbeConfig,
    format: OutputFormat,
    out: &mut W,
) -> Result<bool, CliError> {
    let grant = match client.request_token(&config.credentials()).await {
        Ok(grant) => grant,
        Err(error) => {
            let result = ProbeResult::from_auth_error(error);
            emit_probe(out, format, &result, config)?;
            return Ok(false);
        }
    };

    if format == OutputFormat::Text {
        write_text(out, &render_grant(&grant))?;
        write_text(out, "\nTesting bundles endpoint with this token...\n")?;
    }

    let result = match client.list_bundles(&grant.access_token).await {
        Ok(page) => ProbeResult::Succeeded {
            item_count: page.len(),
            token: grant.access_token.clone(),
        },
        Err(error) => ProbeResult::from_list_error(error),
    };

    emit_probe(out, format, &result, config)?;
    Ok(result.is_success())
}

fn emit_probe<W: Write>(
    out: &mut W,
    format: OutputFormat,
    result: &ProbeResult,
    config: &ProbeConfig,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => write_text(
            out,
            &render_probe(result, &config.server.base_url, &config.credentials()),
        ),
        OutputFormat::Json => write_json(out, &ProbeReport::from(result)),
    }
}

#[track_caller]
fn write_text<W: Write>(out: &mut W, text: &str) -> Result<(), CliError> {
    out.write_all(text.as_bytes())
        .map_err(|e| CliError::Output {
            message: format!("Failed to write report: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
}

#[track_caller]
fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    write_text(out, &json)?;
    write_text(out, "\n")
}
