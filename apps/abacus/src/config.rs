//! Configuration: built-in defaults, YAML file, `ABACUS_`-prefixed
//! environment variables, then CLI flags, in that precedence order.

use crate::cli::Cli;
use crate::Result;
use abacus_api::{DEFAULT_BASE_URL, REQUEST_TIMEOUT};
use anyhow::Context as _;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Evaluation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT.as_secs(),
        }
    }
}

/// History persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/history.json"),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the log file written while the TUI owns the terminal.
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: PathBuf::from("logs"),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration, layering the YAML file and environment over the
    /// built-in defaults. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("ABACUS_").split("_"))
            .extract()
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        Ok(config)
    }

    /// Fold CLI flags over the loaded values. Flags win over file and
    /// environment.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.url {
            self.api.url = url.clone();
        }
        if cli.verbose {
            self.logging.level = "debug".to_string();
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout)
    }
}
