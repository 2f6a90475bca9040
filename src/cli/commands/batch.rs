use super::{emit, output_dir, ExplorerArgs};
use crate::config::AppConfig;
use crate::decoder::decode_transaction;
use crate::errors::{AppError, AppResult};
use crate::explorer::ExplorerClient;
use clap::Args;
use futures::stream::{self, StreamExt};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Args)]
pub struct BatchCommand {
    /// File containing TXIDs (one per line), or stdin if omitted
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Concurrent fetch limit (defaults to explorer.concurrent_requests)
    #[arg(long)]
    pub parallel: Option<usize>,

    /// Write one <txid>.json per transaction here instead of printing
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub explorer: ExplorerArgs,
}

impl BatchCommand {
    pub async fn run(&self) -> AppResult<()> {
        let config = AppConfig::load()?;
        let mut explorer_config = self.explorer.apply(config.explorer.clone());
        if let Some(parallel) = self.parallel {
            explorer_config.concurrent_requests = parallel;
        }
        let parallel = explorer_config.concurrent_requests.max(1);

        let txids = match &self.file {
            Some(path) => read_txids(BufReader::new(fs::File::open(path)?)),
            None => read_txids(BufReader::new(std::io::stdin())),
        };
        if txids.is_empty() {
            return Err(AppError::InvalidData("No TXIDs provided".to_string()));
        }

        let client = ExplorerClient::new(explorer_config)?;
        info!(
            "Decoding {} transactions, {} at a time",
            txids.len(),
            client.get_concurrent_limit()
        );
        let output_dir = output_dir(&self.output_dir, &config);

        let results: Vec<(String, AppResult<()>)> = stream::iter(txids)
            .map(|txid| {
                let client = client.clone();
                let output_dir = output_dir.clone();
                async move {
                    let result = match client.get_transaction(&txid).await {
                        Ok(transaction) => emit(&decode_transaction(&transaction), output_dir),
                        Err(e) => Err(e.into()),
                    };
                    (txid, result)
                }
            })
            .buffer_unordered(parallel)
            .collect()
            .await;

        let mut failed = 0;
        for (txid, result) in &results {
            if let Err(e) = result {
                failed += 1;
                error!("{}: {}", txid, e);
            }
        }

        let stats = client.get_cache_stats();
        info!(
            "Batch complete: {} success, {} failed ({} cache hits, {} request errors)",
            results.len() - failed,
            failed,
            stats.hits,
            client.get_error_count()
        );

        if failed > 0 {
            return Err(AppError::InvalidData(format!(
                "{} of {} transactions failed",
                failed,
                results.len()
            )));
        }
        Ok(())
    }
}

/// Non-empty, trimmed lines; `#` starts a comment
pub fn read_txids<R: BufRead>(reader: R) -> Vec<String> {
    reader
        .lines()
        .map_while(Result::ok)
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}
