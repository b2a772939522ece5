//! CLI argument definitions using clap
//!
//! Commands:
//! - league-roster serve --config <path>
//! - league-roster list --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// League roster server
#[derive(Parser, Debug)]
#[command(name = "league-roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed the store and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./roster.json")]
        config: PathBuf,

        /// Overrides `http.port` from the config file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one listing read from stdin and exit
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./roster.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
