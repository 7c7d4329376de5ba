//! Connect Four - registry host and local game.

#![warn(missing_docs)]

mod cli;
mod play;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use connect_four_server::{RegistryConfig, SessionRegistry};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = match cli.command {
        Command::Serve => "info",
        Command::Play => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => RegistryConfig::from_file(path)?,
        None => RegistryConfig::default(),
    };

    match cli.command {
        Command::Serve => run_server(config).await,
        Command::Play => play::run(SessionRegistry::new(config)).await,
    }
}

/// Hosts the registry until Ctrl-C, then stops the sweeper.
#[instrument(skip(config))]
async fn run_server(config: RegistryConfig) -> Result<()> {
    info!(
        timeout_secs = config.inactivity_timeout().as_secs(),
        sweep_secs = config.sweep_interval().as_secs(),
        "Starting session registry"
    );

    let registry = SessionRegistry::new(config);
    let sweeper = registry.spawn_sweeper(CancellationToken::new());

    info!("Registry ready - press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    info!(live_games = registry.len(), "Shutting down");
    sweeper.stop().await;
    Ok(())
}
