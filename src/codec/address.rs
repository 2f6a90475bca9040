//! Address blobs embedded in Counterparty messages
//!
//! Enhanced sends, sweeps and dispensers carry destinations as 21 bytes: a
//! version byte followed by a 20-byte hash. `0x00` (P2PKH) and `0x05` (P2SH)
//! map to base58check, `0x80` marks a segwit v0 key hash encoded as bech32.

use crate::crypto::checksum;
use crate::decoder::error::{DecodeError, DecodeResult};
use bitcoin::bech32::{hrp, segwit};
use serde::Serialize;

/// Length of an encoded address blob
pub const ADDRESS_BLOB_LEN: usize = 21;

pub const P2PKH_VERSION: u8 = 0x00;
pub const P2SH_VERSION: u8 = 0x05;
pub const SEGWIT_V0_VERSION: u8 = 0x80;

/// A decoded destination address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedAddress {
    pub version: u8,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub hash: [u8; 20],
    pub address: String,
}

/// Decode a 21-byte version + hash blob into a textual address
pub fn from_blob(blob: &[u8]) -> DecodeResult<DecodedAddress> {
    let blob: &[u8; ADDRESS_BLOB_LEN] = blob
        .try_into()
        .map_err(|_| DecodeError::TruncatedPayload { field: "address" })?;

    let version = blob[0];
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&blob[1..]);

    let address = match version {
        P2PKH_VERSION | P2SH_VERSION => to_base58check(blob),
        SEGWIT_V0_VERSION => segwit::encode_v0(hrp::BC, &hash)
            .map_err(|e| DecodeError::AddressEncoding(e.to_string()))?,
        other => return Err(DecodeError::UnknownAddressVersion(other)),
    };

    Ok(DecodedAddress {
        version,
        hash,
        address,
    })
}

/// Base58check: payload followed by the double-SHA256 checksum
fn to_base58check(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    bitcoin::base58::encode(&data)
}
