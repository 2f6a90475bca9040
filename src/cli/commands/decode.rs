use super::{emit, output_dir, ExplorerArgs};
use crate::config::AppConfig;
use crate::decoder::decode_transaction;
use crate::errors::AppResult;
use crate::explorer::ExplorerClient;
use crate::types::ExplorerTransaction;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args)]
pub struct DecodeCommand {
    /// Transaction ID to fetch and decode
    pub txid: String,

    /// Write <txid>.json here instead of printing
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub explorer: ExplorerArgs,
}

impl DecodeCommand {
    pub async fn run(&self) -> AppResult<()> {
        let config = AppConfig::load()?;
        let client = ExplorerClient::new(self.explorer.apply(config.explorer.clone()))?;

        info!("Fetching transaction {}", self.txid);
        let transaction = client.get_transaction(&self.txid).await?;
        let decoded = decode_transaction(&transaction);

        emit(&decoded, output_dir(&self.output_dir, &config))
    }
}

#[derive(Args)]
pub struct DecodeFileCommand {
    /// Explorer transaction document (JSON)
    pub path: PathBuf,

    /// Write <txid>.json here instead of printing
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl DecodeFileCommand {
    pub fn run(&self) -> AppResult<()> {
        let config = AppConfig::load()?;
        let transaction = load_transaction(&self.path)?;
        let decoded = decode_transaction(&transaction);

        emit(&decoded, output_dir(&self.output_dir, &config))
    }
}

/// Read an explorer transaction document from disk
pub fn load_transaction(path: &Path) -> AppResult<ExplorerTransaction> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
