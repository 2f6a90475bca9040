//! CLI subcommands
//!
//! Shared plumbing: explorer configuration with flag overrides, and emitting
//! a decoded document to stdout or an output directory.

pub mod arc4;
pub mod batch;
pub mod data;
pub mod decode;

use crate::config::{AppConfig, ExplorerConfig};
use crate::decoder::{DecodedTransaction, OutputManager};
use crate::errors::AppResult;
use std::path::PathBuf;
use tracing::info;

/// Explorer flags shared by the fetching commands
#[derive(clap::Args, Clone, Debug, Default)]
pub struct ExplorerArgs {
    /// Explorer API base URL (overrides config.toml)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (overrides config.toml)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Retry limit for transient failures (overrides config.toml)
    #[arg(long)]
    pub max_retries: Option<usize>,
}

impl ExplorerArgs {
    pub fn apply(&self, mut config: ExplorerConfig) -> ExplorerConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = timeout;
        }
        if let Some(max_retries) = self.max_retries {
            config.max_retries = max_retries;
        }
        config
    }
}

/// Resolve the output directory: flag first, then configuration
pub fn output_dir(flag: &Option<PathBuf>, config: &AppConfig) -> Option<PathBuf> {
    flag.clone().or_else(|| config.output.directory.clone())
}

/// Print `decoded` as pretty JSON, or write it to `<output_dir>/<txid>.json`
pub fn emit(decoded: &DecodedTransaction, output_dir: Option<PathBuf>) -> AppResult<()> {
    match output_dir {
        Some(dir) => {
            let path = OutputManager::new(dir).write_decoded(decoded)?;
            info!("Wrote {}", path.display());
            println!("{}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(decoded)?),
    }
    Ok(())
}
