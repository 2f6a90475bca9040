//! ARC4 de-obfuscation of Counterparty payloads
//!
//! Counterparty encrypts data carried in null-data outputs and in modern
//! multisig outputs with RC4. The key is the transaction id referenced by the
//! transaction's first input, hex-decoded to its 32 raw bytes. ARC4 is
//! symmetric, so applying the keystream twice yields the original bytes.
//!
//! ```rust
//! use counterparty_decoder::crypto::arc4::{self, CipherKey};
//!
//! let key = CipherKey::from_txid(
//!     "abcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890",
//! ).unwrap();
//! let obfuscated = arc4::apply(&key, b"CNTRPRTY");
//! assert_eq!(arc4::apply(&key, &obfuscated), b"CNTRPRTY");
//! ```

use crate::decoder::error::{DecodeError, DecodeResult};
use rc4::{consts::U32, Key, KeyInit, Rc4, StreamCipher};

/// Key length in bytes (a transaction id)
pub const KEY_LEN: usize = 32;

/// RC4 key derived from the first input's previous transaction id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherKey([u8; KEY_LEN]);

impl CipherKey {
    /// Build a key from a 64-character transaction id
    pub fn from_txid(txid_hex: &str) -> DecodeResult<Self> {
        let bytes = hex::decode(txid_hex).map_err(|_| DecodeError::InvalidHex {
            context: "cipher key",
        })?;
        Self::from_bytes(&bytes)
    }

    /// Build a key from raw bytes, which must be exactly 32 bytes long
    pub fn from_bytes(bytes: &[u8]) -> DecodeResult<Self> {
        let key: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| DecodeError::InvalidKeyLength(bytes.len()))?;
        Ok(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// Apply the RC4 keystream to `data`
///
/// Encryption and decryption are the same operation.
pub fn apply(key: &CipherKey, data: &[u8]) -> Vec<u8> {
    let mut cipher = Rc4::new(Key::<U32>::from_slice(key.as_bytes()));
    let mut result = data.to_vec();
    cipher.apply_keystream(&mut result);
    result
}

/// Apply the RC4 keystream to a hex string, returning hex
pub fn apply_hex(key: &CipherKey, data_hex: &str) -> DecodeResult<String> {
    let data = hex::decode(data_hex).map_err(|_| DecodeError::InvalidHex {
        context: "cipher input",
    })?;
    Ok(hex::encode(apply(key, &data)))
}
