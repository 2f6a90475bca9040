//! Counterparty transaction decoder
//!
//! Decoding runs in two stages:
//! - `extraction`: walk the outputs, de-obfuscate and reassemble the payload
//! - `message`: check the `CNTRPRTY` prefix, read the type id and decode the body
//!
//! `decode_transaction` ties both together and produces the JSON document
//! served for a transaction.

pub mod document;
pub mod error;
pub mod extraction;
pub mod message;
pub mod output;
pub mod reader;

pub use document::{CounterpartyEnvelope, DecodedTransaction, TxSummary};
pub use error::{DecodeError, DecodeResult};
pub use extraction::{extract, Extraction, Fragment, ScriptExtractor};
pub use message::{
    decode_body, decode_data, decode_message, decode_payload, parse_header, DecodeContext,
    DecodedMessage, MessageHeader,
};
pub use output::{OutputError, OutputManager};

use crate::types::{ExplorerTransaction, COUNTERPARTY_PREFIX};
use tracing::{debug, info, warn};

/// Decode the Counterparty message carried by `tx`, if any
///
/// Never fails: a transaction without the prefix gets `cntrprty: null`, and a
/// payload that does not decode keeps its envelope with `decode_error` set.
pub fn decode_transaction(tx: &ExplorerTransaction) -> DecodedTransaction {
    let extraction = extract(tx);
    let summary = TxSummary::new(tx, extraction.dust_recipient.clone());

    if !extraction.has_prefix() {
        debug!("Transaction {}: no Counterparty data", tx.hash);
        return DecodedTransaction {
            tx: summary,
            cntrprty: None,
        };
    }

    let ctx = DecodeContext {
        block_height: tx.format_height(),
        dust_recipient: extraction.dust_recipient.clone(),
    };
    let envelope = CounterpartyEnvelope::new(&extraction);
    let body = &extraction.payload[COUNTERPARTY_PREFIX.len()..];

    let envelope = match parse_header(body) {
        Ok((header, fields)) => match message::decode_fields(header.id, fields, &ctx) {
            Ok(message) => {
                info!(
                    "Transaction {}: decoded {} ({} fragments)",
                    tx.hash,
                    message.message_type().name(),
                    extraction.fragments.len()
                );
                envelope
                    .with_body(fields)
                    .with_message(DecodedMessage { header, message })
            }
            Err(e) => {
                warn!("Transaction {}: {}", tx.hash, e);
                envelope.with_body(fields).with_header(&header).with_error(e)
            }
        },
        Err(e) => {
            warn!(
                "Transaction {}: {} (payload {})",
                tx.hash,
                e,
                extraction.payload_hex()
            );
            envelope.with_error(e)
        }
    };

    DecodedTransaction {
        tx: summary,
        cntrprty: Some(envelope),
    }
}

/// Decode `tx` and return only the message, propagating decode failures
///
/// `Ok(None)` means the transaction carries no Counterparty payload.
pub fn decode_transaction_message(tx: &ExplorerTransaction) -> DecodeResult<Option<DecodedMessage>> {
    let extraction = extract(tx);
    let ctx = DecodeContext {
        block_height: tx.format_height(),
        dust_recipient: extraction.dust_recipient,
    };
    decode_payload(&extraction.payload, &ctx)
}
