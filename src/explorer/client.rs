use crate::config::ExplorerConfig;
use crate::errors::{FetchError, FetchResult};
use crate::explorer::{calculate_next_backoff, execute_with_timeout, CacheStats, TransactionCache};
use crate::types::{is_valid_txid, ExplorerTransaction};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Explorer URL for one transaction, with enough inputs and outputs inlined
/// to cover every data-carrying output
pub fn transaction_url(base_url: &str, txid: &str) -> String {
    format!(
        "{}/txs/{}?instart=0&outstart=0&limit=200",
        base_url.trim_end_matches('/'),
        txid
    )
}

/// Async block explorer client with retry logic and caching
///
/// Clones share the HTTP connection pool, the request limit and the cache.
#[derive(Clone)]
pub struct ExplorerClient {
    http: reqwest::Client,
    config: ExplorerConfig,
    semaphore: Arc<Semaphore>,
    error_count: Arc<AtomicU64>,
    cache: TransactionCache,
}

impl ExplorerClient {
    pub fn new(config: ExplorerConfig) -> FetchResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("counterparty-decoder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(
            "Explorer client for {} ({} concurrent requests)",
            config.base_url, config.concurrent_requests
        );

        Ok(Self {
            http,
            semaphore: Arc::new(Semaphore::new(config.concurrent_requests.max(1))),
            config,
            error_count: Arc::new(AtomicU64::new(0)),
            cache: TransactionCache::new(),
        })
    }

    /// Fetch a transaction document with retry logic and caching
    pub async fn get_transaction(&self, txid: &str) -> FetchResult<ExplorerTransaction> {
        if !is_valid_txid(txid) {
            return Err(FetchError::InvalidTxid {
                txid: txid.to_string(),
            });
        }

        if let Some(cached) = self.cache.get(txid) {
            return Ok(cached);
        }

        let transaction = self.get_transaction_with_retry(txid).await?;
        self.cache.put(txid.to_string(), transaction.clone());
        Ok(transaction)
    }

    pub fn get_error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    pub fn get_cache_stats(&self) -> CacheStats {
        self.cache.get_stats()
    }

    pub fn get_concurrent_limit(&self) -> usize {
        self.config.concurrent_requests
    }

    async fn get_transaction_with_retry(&self, txid: &str) -> FetchResult<ExplorerTransaction> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| FetchError::Http(format!("Failed to acquire semaphore: {}", e)))?;

        let url = transaction_url(&self.config.base_url, txid);
        let max_attempts = self.config.max_retries.max(1);
        let mut attempts = 0;
        let mut backoff = Duration::from_millis(self.config.initial_backoff_ms);

        while attempts < max_attempts {
            let result = match execute_with_timeout(self.config.timeout_seconds, self.fetch(&url, txid)).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout {
                    timeout_seconds: self.config.timeout_seconds,
                    operation: format!("get_transaction({})", txid),
                }),
            };

            match result {
                Ok(transaction) => {
                    if attempts > 0 {
                        debug!(
                            "Successfully retrieved transaction {} after {} attempts",
                            txid,
                            attempts + 1
                        );
                    }
                    return Ok(transaction);
                }
                Err(e) if !e.is_transient() => {
                    self.error_count.fetch_add(1, Ordering::Relaxed);
                    debug!("Transaction {} not retryable: {}", txid, e);
                    return Err(e);
                }
                Err(e) => {
                    attempts += 1;
                    self.error_count.fetch_add(1, Ordering::Relaxed);
                    if attempts >= max_attempts {
                        warn!(
                            "Fetch of {} failed (attempt {}/{}): {}",
                            txid, attempts, max_attempts, e
                        );
                        break;
                    }
                    warn!(
                        "Fetch of {} failed (attempt {}/{}): {}. Retrying in {:?}",
                        txid, attempts, max_attempts, e, backoff
                    );
                    sleep(backoff).await;
                    backoff = calculate_next_backoff(
                        backoff,
                        self.config.backoff_multiplier,
                        self.config.max_backoff_seconds,
                    );
                }
            }
        }

        Err(FetchError::MaxRetriesExceeded {
            operation: format!("get_transaction({})", txid),
        })
    }

    async fn fetch(&self, url: &str, txid: &str) -> FetchResult<ExplorerTransaction> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let transaction: ExplorerTransaction =
            serde_json::from_slice(&body).map_err(|e| FetchError::Deserialisation(e.to_string()))?;

        if !transaction.hash.eq_ignore_ascii_case(txid) {
            return Err(FetchError::HashMismatch {
                requested: txid.to_string(),
                returned: transaction.hash,
            });
        }
        Ok(transaction)
    }
}
