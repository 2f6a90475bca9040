//! Currency formatting utilities for satoshi amounts

/// Satoshis per Bitcoin
pub const SATS_PER_BTC: u64 = 100_000_000;

/// Format a satoshi amount as a BTC string with 8 decimals
///
/// Integer arithmetic keeps every digit exact.
///
/// # Examples
/// ```
/// use counterparty_decoder::utils::currency::sats_to_btc;
///
/// assert_eq!(sats_to_btc(5471), "0.00005471");
/// assert_eq!(sats_to_btc(28125351850), "281.25351850");
/// ```
pub fn sats_to_btc(sats: u64) -> String {
    format!("{}.{:08}", sats / SATS_PER_BTC, sats % SATS_PER_BTC)
}
