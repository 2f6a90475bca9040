//! Decoded transaction documents
//!
//! The JSON shape mirrors the decoder API: a `tx` summary of the Bitcoin side
//! and a `cntrprty` section that is `null` when the transaction carries no
//! Counterparty payload.

use super::extraction::Extraction;
use super::message::{DecodedMessage, MessageHeader};
use crate::types::{CounterpartyMessage, Encoding, ExplorerTransaction, COUNTERPARTY_PREFIX};
use crate::utils::currency::sats_to_btc;
use crate::utils::text::printable_ascii;
use serde::Serialize;

/// Bitcoin-side summary of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxSummary {
    pub hash: String,
    pub from_addr: Option<String>,
    pub confirmed: Option<String>,
    pub size: u64,
    pub vsize: u64,
    pub fees: u64,
    pub fees_btc: String,
    /// Output-0 dust recipient
    pub recipient: Option<String>,
    pub first_send_sat: Option<u64>,
    pub first_send_btc: Option<String>,
}

impl TxSummary {
    pub fn new(tx: &ExplorerTransaction, recipient: Option<String>) -> Self {
        let first_send_sat = tx.first_output_value();
        Self {
            hash: tx.hash.clone(),
            from_addr: tx.source_address().map(str::to_string),
            confirmed: tx.confirmed.clone(),
            size: tx.size,
            vsize: tx.vsize,
            fees: tx.fees,
            fees_btc: sats_to_btc(tx.fees),
            recipient,
            first_send_sat,
            first_send_btc: first_send_sat.map(sats_to_btc),
        }
    }
}

/// Counterparty section of a decoded transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterpartyEnvelope {
    pub encoding: Option<Encoding>,
    /// Message body after the prefix and type id, hex
    pub cp_msg: String,
    pub raw_ascii: String,
    pub prefix_hex: String,
    pub prefix: String,
    pub id_hex: Option<String>,
    pub id: Option<u32>,
    pub msg_type: Option<&'static str>,
    pub msg_decoded: Option<CounterpartyMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_error: Option<String>,
}

impl CounterpartyEnvelope {
    /// Envelope for a payload that starts with the prefix
    ///
    /// `cp_msg` holds everything after the prefix until a header is attached.
    pub(crate) fn new(extraction: &Extraction) -> Self {
        let split = COUNTERPARTY_PREFIX.len().min(extraction.payload.len());
        let (prefix, body) = extraction.payload.split_at(split);
        Self {
            encoding: extraction.encoding,
            cp_msg: hex::encode(body),
            raw_ascii: printable_ascii(&extraction.payload),
            prefix_hex: hex::encode(prefix),
            prefix: printable_ascii(prefix),
            id_hex: None,
            id: None,
            msg_type: None,
            msg_decoded: None,
            decode_error: None,
        }
    }

    /// Narrow `cp_msg` to the fields that follow the type id
    pub(crate) fn with_body(mut self, fields: &[u8]) -> Self {
        self.cp_msg = hex::encode(fields);
        self
    }

    pub(crate) fn with_header(mut self, header: &MessageHeader) -> Self {
        self.id_hex = Some(header.id_hex.clone());
        self.id = Some(header.id);
        self.msg_type = header.message_type().map(|t| t.name());
        self
    }

    pub(crate) fn with_message(self, decoded: DecodedMessage) -> Self {
        let mut envelope = self.with_header(&decoded.header);
        envelope.msg_decoded = Some(decoded.message);
        envelope
    }

    pub(crate) fn with_error(mut self, error: impl ToString) -> Self {
        self.decode_error = Some(error.to_string());
        self
    }

    pub fn is_decoded(&self) -> bool {
        self.msg_decoded.is_some()
    }
}

/// Result of decoding one transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedTransaction {
    pub tx: TxSummary,
    pub cntrprty: Option<CounterpartyEnvelope>,
}

impl DecodedTransaction {
    pub fn message(&self) -> Option<&CounterpartyMessage> {
        self.cntrprty
            .as_ref()
            .and_then(|envelope| envelope.msg_decoded.as_ref())
    }

    pub fn decode_error(&self) -> Option<&str> {
        self.cntrprty
            .as_ref()
            .and_then(|envelope| envelope.decode_error.as_deref())
    }
}
