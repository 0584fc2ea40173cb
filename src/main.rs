//! fixzit-scope - scoped search, SLA and PII service
//!
//! Loads configuration, initializes logging and serves the HTTP API.

use anyhow::Context;
use clap::Parser;
use fixzit_scope::utils::logging::init_tracing;
use fixzit_scope::{Config, server};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "fixzit-scope", version, about)]
struct Args {
    /// YAML configuration file; defaults and environment variables are used when omitted
    #[arg(short, long, env = "FIXZIT_CONFIG")]
    config: Option<PathBuf>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display with causes, not Debug
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env().context("loading configuration from environment")?,
    };

    init_tracing(config.logging()).context("initializing logging")?;

    if args.check {
        tracing::info!("Configuration is valid");
        return Ok(());
    }

    server::run_server(config).await.context("running server")?;
    Ok(())
}
