//! Configuration for chief-index

use std::path::PathBuf;

use chief_indexer::IndexerConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Handler configuration
    #[serde(default)]
    pub indexer: IndexerConfig,

    /// Replay inputs and outputs
    #[serde(default)]
    pub replay: ReplayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Replay configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// JSON-lines file of governance events
    #[serde(default)]
    pub events: Option<PathBuf>,

    /// JSON fixture answering ledger reads
    #[serde(default)]
    pub ledger: Option<PathBuf>,

    /// Include every stored entity in the report
    #[serde(default)]
    pub dump: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Layer defaults, an optional file and `CHIEF_` environment variables.
    ///
    /// Nested keys use a double underscore, e.g. `CHIEF_INDEXER__REPLAY_GUARD=false`.
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CHIEF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
