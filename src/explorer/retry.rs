//! Retry logic utilities for explorer requests

use std::future::Future;
use std::time::Duration;
use tokio::time::error::Elapsed;
use tokio::time::timeout;

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Example
/// ```
/// use std::time::Duration;
/// use counterparty_decoder::explorer::calculate_next_backoff;
///
/// let backoff = Duration::from_millis(500);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_millis(1000));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// Run `operation` with a deadline of `timeout_seconds`
///
/// The outer `Err` means the deadline elapsed; the operation's own result is
/// passed through untouched.
pub async fn execute_with_timeout<F>(timeout_seconds: u64, operation: F) -> Result<F::Output, Elapsed>
where
    F: Future,
{
    timeout(Duration::from_secs(timeout_seconds), operation).await
}
