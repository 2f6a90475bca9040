//! Counterparty Transaction Decoder - Type System
//!
//! - `transaction`: block-explorer transaction documents (decoder input)
//! - `counterparty`: protocol constants, message types and decoded messages

pub mod counterparty;
pub mod transaction;

pub use counterparty::{
    CounterpartyMessage, Encoding, MessageType, COUNTERPARTY_PREFIX,
    ISSUANCE_FORMAT_CHANGE_HEIGHT,
};
pub use transaction::{is_valid_txid, ExplorerInput, ExplorerOutput, ExplorerTransaction, ScriptType};
