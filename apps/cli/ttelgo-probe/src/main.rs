use ttelgo_probe::cli::{App, run};
use ttelgo_probe::logger::{DEFAULT_LOG_LEVEL, initialize as LoggerInitialize};

use std::io::{Write, stderr, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, debug, error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Before parsing, so TTELGO_BASE_URL / TTELGO_TOKEN from .env reach clap
    let dotenv = dotenvy::dotenv();

    let app = App::parse();

    let level = if app.options.verbose {
        LevelFilter::Debug
    } else {
        DEFAULT_LOG_LEVEL
    };

    // Initialize logger FIRST
    if let Err(e) = LoggerInitialize(level, app.options.log_dir.as_deref()) {
        let _ = writeln!(stderr(), "Fatal: {e}");
        return ExitCode::FAILURE;
    }

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env loaded: {e}"),
    }

    let mut out = stdout();
    match run(&app, &mut out).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            let _ = writeln!(stderr(), "Fatal: {e}");
            ExitCode::FAILURE
        }
    }
}
