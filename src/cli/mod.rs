//! CLI module for the roster server
//!
//! Provides command-line interface for:
//! - serve: Seed the store and run the HTTP API
//! - list: One-shot listing over stdin/stdout

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{list, list_once, run, run_command, serve};
pub use config::AppConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_request, read_request, write_error, write_response};
