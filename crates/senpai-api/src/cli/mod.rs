//! CLI argument definitions and command implementations.

pub mod status;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Anime-character chat service: REST API plus admin tooling.
#[derive(Debug, Parser)]
#[command(name = "senpai", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit machine-readable JSON where supported
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the REST API server
    Serve {
        /// Address to bind (overrides config.toml)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config.toml)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show database and service status
    Status,

    /// Generate shell completions
    Completions { shell: Shell },
}
