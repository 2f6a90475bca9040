//! Payload extraction from transaction outputs
//!
//! Counterparty hides its payload in one of two mutually exclusive ways:
//! RC4-obfuscated null-data outputs, or fake public keys in bare multisig
//! outputs. The 71-byte multisig form is the original plaintext encoding; the
//! 105-byte form obfuscates two 31-byte key bodies per output. Fragments are
//! reassembled in output order.

use crate::crypto::arc4::{self, CipherKey};
use crate::types::{Encoding, ExplorerOutput, ExplorerTransaction, ScriptType, COUNTERPARTY_PREFIX};
use serde::Serialize;
use tracing::debug;

/// Script length of a plaintext 1-of-2 data multisig
pub const LEGACY_MULTISIG_SCRIPT_LEN: usize = 71;

/// Script length of an obfuscated 1-of-3 data multisig
pub const MULTISIG_SCRIPT_LEN: usize = 105;

// Plaintext multisig: length byte, then the chunk
const LEGACY_LENGTH_OFFSET: usize = 36;

// Obfuscated multisig: two 31-byte bodies of the data pubkeys (sign byte skipped)
const FIRST_KEY_BODY: std::ops::Range<usize> = 3..34;
const SECOND_KEY_BODY: std::ops::Range<usize> = 37..68;

/// One accepted chunk of payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub vout: usize,
    pub encoding: Encoding,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub data: Vec<u8>,
    /// Whether the chunk went through the RC4 keystream
    pub deobfuscated: bool,
}

/// Result of walking a transaction's outputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Reassembled payload; may be empty or lack the prefix
    pub payload: Vec<u8>,
    /// First address of output 0 when it pays to a public key hash
    pub dust_recipient: Option<String>,
    /// Encoding of the last accepted fragment
    pub encoding: Option<Encoding>,
    pub fragments: Vec<Fragment>,
}

impl Extraction {
    pub fn payload_hex(&self) -> String {
        hex::encode(&self.payload)
    }

    pub fn has_prefix(&self) -> bool {
        self.payload.starts_with(COUNTERPARTY_PREFIX)
    }

    fn push(&mut self, vout: usize, encoding: Encoding, data: Vec<u8>) {
        debug!(
            "Output {}: accepted {} byte fragment ({:?})",
            vout,
            data.len(),
            encoding
        );
        self.payload.extend_from_slice(&data);
        self.encoding = Some(encoding);
        self.fragments.push(Fragment {
            vout,
            encoding,
            data,
            deobfuscated: encoding.is_obfuscated(),
        });
    }
}

/// Walks outputs and reassembles the embedded payload
///
/// The cipher key is the transaction id spent by the first input. When it is
/// missing or malformed, obfuscated outputs are skipped.
pub struct ScriptExtractor {
    key: Option<CipherKey>,
}

impl ScriptExtractor {
    pub fn new(key: Option<CipherKey>) -> Self {
        Self { key }
    }

    pub fn for_transaction(tx: &ExplorerTransaction) -> Self {
        let key = match tx.first_input_txid() {
            Some(txid) => match CipherKey::from_txid(txid) {
                Ok(key) => Some(key),
                Err(e) => {
                    debug!("Transaction {}: unusable cipher key: {}", tx.hash, e);
                    None
                }
            },
            None => {
                debug!("Transaction {}: no input to key the cipher", tx.hash);
                None
            }
        };
        Self::new(key)
    }

    pub fn extract(&self, tx: &ExplorerTransaction) -> Extraction {
        let mut extraction = Extraction {
            dust_recipient: dust_recipient(tx),
            ..Default::default()
        };

        for (vout, output) in tx.outputs.iter().enumerate() {
            match output.script_type {
                ScriptType::NullData => self.null_data(vout, output, &mut extraction),
                ScriptType::PayToMultiPubkeyHash => self.multisig(vout, output, &mut extraction),
                _ => {}
            }
        }

        extraction
    }

    fn null_data(&self, vout: usize, output: &ExplorerOutput, extraction: &mut Extraction) {
        let Some(key) = &self.key else {
            debug!("Output {}: null-data skipped, no cipher key", vout);
            return;
        };
        let Some(data) = output_bytes(vout, output.data_hex.as_deref()) else {
            return;
        };

        let decrypted = arc4::apply(key, &data);
        if decrypted.starts_with(COUNTERPARTY_PREFIX) {
            extraction.push(vout, Encoding::OpReturn, decrypted);
        } else {
            debug!("Output {}: null-data without Counterparty prefix", vout);
        }
    }

    fn multisig(&self, vout: usize, output: &ExplorerOutput, extraction: &mut Extraction) {
        let Some(script) = output_bytes(vout, output.script.as_deref()) else {
            return;
        };

        match script.len() {
            LEGACY_MULTISIG_SCRIPT_LEN => legacy_multisig(vout, &script, extraction),
            MULTISIG_SCRIPT_LEN => self.obfuscated_multisig(vout, &script, extraction),
            other => debug!("Output {}: {} byte multisig carries no data", vout, other),
        }
    }

    fn obfuscated_multisig(&self, vout: usize, script: &[u8], extraction: &mut Extraction) {
        let Some(key) = &self.key else {
            debug!("Output {}: multisig skipped, no cipher key", vout);
            return;
        };

        let mut chunk = Vec::with_capacity(62);
        chunk.extend_from_slice(&script[FIRST_KEY_BODY]);
        chunk.extend_from_slice(&script[SECOND_KEY_BODY]);
        let decrypted = arc4::apply(key, &chunk);

        let fragment = length_prefixed(&decrypted, 0);
        let fragment_prefixed = fragment.starts_with(COUNTERPARTY_PREFIX);

        if fragment_prefixed && extraction.has_prefix() {
            // Continuation chunks repeat the prefix
            let data = fragment[COUNTERPARTY_PREFIX.len()..].to_vec();
            extraction.push(vout, Encoding::Multisig, data);
        } else if fragment_prefixed {
            extraction.push(vout, Encoding::Multisig, fragment.to_vec());
        } else {
            debug!("Output {}: multisig chunk without Counterparty prefix", vout);
        }
    }
}

/// Extract the payload of `tx` with the key from its first input
pub fn extract(tx: &ExplorerTransaction) -> Extraction {
    ScriptExtractor::for_transaction(tx).extract(tx)
}

fn dust_recipient(tx: &ExplorerTransaction) -> Option<String> {
    tx.outputs
        .first()
        .filter(|output| output.script_type == ScriptType::PayToPubkeyHash)
        .and_then(|output| output.first_address())
        .map(str::to_string)
}

fn legacy_multisig(vout: usize, script: &[u8], extraction: &mut Extraction) {
    let fragment = length_prefixed(script, LEGACY_LENGTH_OFFSET);
    if fragment.starts_with(COUNTERPARTY_PREFIX) || extraction.has_prefix() {
        extraction.push(vout, Encoding::LegacyMultisig, fragment.to_vec());
    } else {
        debug!("Output {}: plaintext multisig outside a Counterparty payload", vout);
    }
}

/// Bytes following the length byte at `offset`, clamped to the buffer
fn length_prefixed(data: &[u8], offset: usize) -> &[u8] {
    let Some(&len) = data.get(offset) else {
        return &[];
    };
    let start = offset + 1;
    let end = (start + len as usize).min(data.len());
    &data[start..end]
}

fn output_bytes(vout: usize, hex_data: Option<&str>) -> Option<Vec<u8>> {
    let hex_data = hex_data?;
    match hex::decode(hex_data) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!("Output {}: invalid script hex: {}", vout, e);
            None
        }
    }
}
