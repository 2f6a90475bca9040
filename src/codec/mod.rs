//! Counterparty value encodings
//!
//! - `asset`: numeric asset id to ticker name
//! - `address`: 21-byte version + hash blobs to base58check / bech32 addresses
//! - `subasset`: big-integer subasset names over the 68-symbol alphabet

pub mod address;
pub mod asset;
pub mod subasset;

pub use address::{from_blob, DecodedAddress, ADDRESS_BLOB_LEN};
pub use asset::{asset_name, FIRST_NUMERIC_ASSET_ID, NUMERIC_OR_SUBASSET};
pub use subasset::{subasset_from_bytes, subasset_from_int};
