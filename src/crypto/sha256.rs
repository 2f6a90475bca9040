//! SHA-256 helpers built on the `sha2` crate

use sha2::{Digest, Sha256};

/// Length of the base58check checksum in bytes
pub const CHECKSUM_LEN: usize = 4;

/// Single SHA-256 digest of `data`
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 applied twice, as used for Bitcoin checksums
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// First four bytes of `double_sha256(data)`
///
/// # Examples
/// ```
/// use counterparty_decoder::crypto::checksum;
///
/// let payload = hex::decode("0062e907b15cbf27d5425399ebf6f0fb50ebb88f18").unwrap();
/// assert_eq!(hex::encode(checksum(&payload)), "c29b7d93");
/// ```
pub fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = double_sha256(data);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}
