//! Block-explorer transaction documents
//!
//! The decoder consumes the BlockCypher `txs/{hash}` response shape. Only the
//! fields the decoder reads are modelled; anything else in the document is
//! ignored during deserialisation.

use serde::{Deserialize, Serialize};

/// Transaction id length in hex characters
const TXID_HEX_LEN: usize = 64;

/// Whether `txid` is a 64-character hex transaction id
pub fn is_valid_txid(txid: &str) -> bool {
    txid.len() == TXID_HEX_LEN && txid.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Output script classification as reported by the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptType {
    PayToPubkeyHash,
    PayToMultiPubkeyHash,
    NullData,
    #[serde(other)]
    Other,
}

/// A transaction as returned by the explorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerTransaction {
    pub hash: String,
    /// -1 while the transaction is unconfirmed
    #[serde(default = "unconfirmed_height")]
    pub block_height: i64,
    #[serde(default)]
    pub fees: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub vsize: u64,
    /// ISO-8601 confirmation time
    #[serde(default)]
    pub confirmed: Option<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
    #[serde(default)]
    pub inputs: Vec<ExplorerInput>,
    #[serde(default)]
    pub outputs: Vec<ExplorerOutput>,
}

fn unconfirmed_height() -> i64 {
    -1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerInput {
    #[serde(default)]
    pub prev_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerOutput {
    #[serde(default)]
    pub value: u64,
    pub script_type: ScriptType,
    /// Full output script, hex
    #[serde(default)]
    pub script: Option<String>,
    /// Pushed data of a null-data output, hex
    #[serde(default)]
    pub data_hex: Option<String>,
    #[serde(default)]
    pub addresses: Option<Vec<String>>,
}

impl ExplorerOutput {
    pub fn first_address(&self) -> Option<&str> {
        self.addresses
            .as_ref()
            .and_then(|addrs| addrs.first())
            .map(String::as_str)
    }
}

impl ExplorerTransaction {
    /// Transaction id spent by the first input; keys the payload cipher
    pub fn first_input_txid(&self) -> Option<&str> {
        self.inputs.first().and_then(|input| input.prev_hash.as_deref())
    }

    /// First address reported for the transaction (the source)
    pub fn source_address(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }

    pub fn first_output_value(&self) -> Option<u64> {
        self.outputs.first().map(|output| output.value)
    }

    /// Height used to pick wire-format variants
    ///
    /// Unconfirmed transactions are decoded against the current formats.
    pub fn format_height(&self) -> u64 {
        u64::try_from(self.block_height).unwrap_or(u64::MAX)
    }
}
