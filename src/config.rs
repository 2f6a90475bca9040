use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variables mapped onto configuration keys
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("EXPLORER_BASE_URL", "explorer.base_url"),
    ("EXPLORER_TIMEOUT_SECONDS", "explorer.timeout_seconds"),
    ("EXPLORER_MAX_RETRIES", "explorer.max_retries"),
    ("EXPLORER_INITIAL_BACKOFF_MS", "explorer.initial_backoff_ms"),
    ("EXPLORER_BACKOFF_MULTIPLIER", "explorer.backoff_multiplier"),
    ("EXPLORER_MAX_BACKOFF_SECONDS", "explorer.max_backoff_seconds"),
    ("EXPLORER_CONCURRENT_REQUESTS", "explorer.concurrent_requests"),
    ("OUTPUT_DIRECTORY", "output.directory"),
];

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub explorer: ExplorerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Block explorer configuration for fetching transactions by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Base of the BlockCypher-compatible API (`{base_url}/txs/{txid}`)
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
    pub concurrent_requests: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.blockcypher.com/v1/btc/main".to_string(),
            timeout_seconds: 30,
            max_retries: 5,
            initial_backoff_ms: 500,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 30,
            concurrent_requests: 3,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write `<txid>.json` files here instead of printing to stdout
    pub directory: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = ExplorerConfig::default();
        let mut builder = Config::builder()
            .set_default("explorer.base_url", defaults.base_url)?
            .set_default("explorer.timeout_seconds", defaults.timeout_seconds)?
            .set_default("explorer.max_retries", defaults.max_retries as i64)?
            .set_default("explorer.initial_backoff_ms", defaults.initial_backoff_ms)?
            .set_default("explorer.backoff_multiplier", defaults.backoff_multiplier)?
            .set_default("explorer.max_backoff_seconds", defaults.max_backoff_seconds)?
            .set_default(
                "explorer.concurrent_requests",
                defaults.concurrent_requests as i64,
            )?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false));

        // EXPLORER_* / OUTPUT_* environment variables take precedence
        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, env::var(var).ok())?;
        }

        let config = builder.build()?;
        config.try_deserialize()
    }
}
