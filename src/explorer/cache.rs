use crate::types::ExplorerTransaction;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Documents kept before the oldest is evicted
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Thread-safe cache of explorer documents, keyed by txid
///
/// Holds at most `capacity` documents; inserting past that evicts the oldest.
#[derive(Clone)]
pub struct TransactionCache {
    inner: Arc<Mutex<CacheInner>>,
}

struct CacheInner {
    entries: HashMap<String, ExplorerTransaction>,
    order: VecDeque<String>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl TransactionCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                capacity: capacity.max(1),
                hits: 0,
                misses: 0,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // Entries are inserted whole, so a poisoned map is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, txid: &str) -> Option<ExplorerTransaction> {
        let mut inner = self.lock();
        match inner.entries.get(txid).cloned() {
            Some(transaction) => {
                inner.hits += 1;
                debug!("Cache hit for transaction: {}", txid);
                Some(transaction)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    pub fn put(&self, txid: String, transaction: ExplorerTransaction) {
        let mut inner = self.lock();
        if inner.entries.insert(txid.clone(), transaction).is_some() {
            return;
        }
        inner.order.push_back(txid);
        while inner.order.len() > inner.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
                debug!("Evicted transaction {} from cache", oldest);
            }
        }
    }

    pub fn get_stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TransactionCache {
    fn default() -> Self {
        Self::new()
    }
}
