//! Block explorer integration
//!
//! - **Client** - Async BlockCypher-compatible client with retry logic
//! - **Cache** - In-memory cache of fetched transaction documents
//! - **Retry** - Exponential backoff and timeout helpers
//!
//! The decoder never calls this module; it only consumes the documents it
//! returns.

pub mod cache;
pub mod client;
pub mod retry;

pub use cache::{CacheStats, TransactionCache, DEFAULT_CACHE_CAPACITY};
pub use client::{transaction_url, ExplorerClient};
pub use crate::types::is_valid_txid;
pub use retry::{calculate_next_backoff, execute_with_timeout};
