//! Decoder-specific error types

/// Result type for decoder operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Ways a Counterparty payload can fail to decode
///
/// A transaction that carries no `CNTRPRTY` data is not an error; the decode
/// functions report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Unsupported message type {id} at block height {block_height}")]
    UnsupportedMessageType { id: u32, block_height: u64 },

    #[error("Payload truncated while reading {field}")]
    TruncatedPayload { field: &'static str },

    #[error("Unknown address version byte 0x{0:02x}")]
    UnknownAddressVersion(u8),

    #[error("Invalid subasset encoding: {0}")]
    InvalidSubassetEncoding(String),

    #[error("Invalid hex in {context}")]
    InvalidHex { context: &'static str },

    #[error("Cipher key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("Address encoding failed: {0}")]
    AddressEncoding(String),
}
