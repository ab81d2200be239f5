//! routewise gateway binary
//!
//! Loads `.env`, reads the YAML configuration, installs logging and serves
//! until interrupted.

use anyhow::Context;
use clap::Parser;
use routewise::utils::logging::init_logging;
use routewise::{Config, Gateway};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// Command line interface for the routewise gateway
#[derive(Parser, Debug)]
#[command(name = "gateway")]
#[command(about = "Routing gateway for interchangeable LLM providers")]
#[command(version)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "ROUTEWISE_CONFIG")]
    config: Option<PathBuf>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::from_file(DEFAULT_CONFIG_PATH)
            .await
            .with_context(|| format!("loading {}", DEFAULT_CONFIG_PATH)),
        None => Config::from_env().context("building configuration from the environment"),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).await?;
    init_logging(config.logging())?;

    if cli.check {
        info!(
            providers = config.providers().len(),
            policy = config.router().policy.name(),
            "configuration is valid"
        );
        return Ok(());
    }

    info!(address = %config.server().address(), "routewise {}", routewise::VERSION);
    let gateway = Gateway::new(config)?;
    gateway.run().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
