//! Configuration file
//!
//! ```json
//! {
//!   "data_file": "./seed.json",
//!   "log_level": "info",
//!   "http": { "host": "0.0.0.0", "port": 4000, "request_timeout_secs": 30 }
//! }
//! ```
//!
//! Every field is optional. Without `data_file` the store starts empty.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::{log_event, Event, Severity};
use crate::store::MemoryStore;

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// JSON file holding the `players`, `clubteams`, `countries` and
    /// `positions` collections
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Lowest severity written to the log
    #[serde(default)]
    pub log_level: Severity,

    #[serde(default)]
    pub http: HttpServerConfig,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        if self.http.request_timeout_secs == 0 {
            return Err(CliError::config_error(
                "http.request_timeout_secs must be > 0",
            ));
        }

        Ok(())
    }

    /// Store seeded from `data_file`, or an empty one
    pub fn open_store(&self) -> CliResult<MemoryStore> {
        let Some(path) = &self.data_file else {
            return Ok(MemoryStore::new());
        };

        let store = MemoryStore::load(path)?;
        let collections = store.snapshot()?;
        log_event(
            Event::StoreSeeded,
            &[
                ("clubteams", &collections.clubteams.len().to_string()),
                ("countries", &collections.countries.len().to_string()),
                ("players", &collections.players.len().to_string()),
                ("positions", &collections.positions.len().to_string()),
            ],
        );

        Ok(store)
    }
}
