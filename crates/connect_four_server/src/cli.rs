//! Command-line interface for the connect_four binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Four-in-a-row session registry
#[derive(Parser, Debug)]
#[command(name = "connect_four")]
#[command(about = "Four-in-a-row game engine with a concurrent session registry", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML registry config (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the registry and its eviction sweeper until Ctrl-C
    Serve,

    /// Play a local two-player game in the terminal
    Play,
}
