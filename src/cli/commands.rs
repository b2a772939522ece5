//! CLI command implementations
//!
//! `serve` runs until the listener fails. `list` answers one listing
//! request and exits; listing errors are reported in the JSON output,
//! everything else as a [`CliError`].

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::http_server::HttpServer;
use crate::observability::{log_event, Event, Logger, Severity};
use crate::query::{ListPlayersParams, ListingEngine, PlayerPage, QueryResult};
use crate::store::LeagueStore;

use super::args::{Cli, Command};
use super::config::AppConfig;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::List { config } => list(&config),
    }
}

/// Seed the store and serve the HTTP API
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = AppConfig::load(config_path)?;
    Logger::set_min_severity(config.log_level);
    log_event(
        Event::ConfigLoaded,
        &[("path", &config_path.display().to_string())],
    );

    if let Some(port) = port {
        config.http.port = port;
    }

    let store = Arc::new(config.open_store()?);
    let server = HttpServer::with_config(config.http.clone(), store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server.start().await.map_err(|e| {
            log_event(Event::ServerFailed, &[("error", &e.to_string())]);
            CliError::boot_failed(format!("HTTP server failed: {}", e))
        })
    })
}

/// Run one listing read from stdin and print the page
pub fn list(config_path: &Path) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;

    // stdout is reserved for the response
    Logger::set_min_severity(config.log_level.max(Severity::Error));

    let store = Arc::new(config.open_store()?);
    let raw = read_request()?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    match rt.block_on(list_once(store, &raw)) {
        Ok(page) => write_response(page),
        Err(e) => write_error(e.code(), &e.to_string()),
    }
}

/// Parse `raw` and run the listing once
pub async fn list_once<S: LeagueStore>(
    store: Arc<S>,
    raw: &HashMap<String, String>,
) -> QueryResult<PlayerPage> {
    let params = ListPlayersParams::parse(raw)?;
    ListingEngine::new(store).list_players(&params).await
}
