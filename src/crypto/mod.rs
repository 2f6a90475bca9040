//! Cryptographic primitives used by the Counterparty wire format
//!
//! - `arc4`: RC4 keystream keyed by the first input's previous transaction id,
//!   used to de-obfuscate null-data and multisig payloads
//! - `sha256`: SHA-256 and the double-SHA256 checksum used by base58check addresses
pub mod arc4;
pub mod sha256;

pub use arc4::CipherKey;
pub use sha256::{checksum, double_sha256, sha256};
