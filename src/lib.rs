//! Counterparty Transaction Decoder
//!
//! Recovers the Counterparty message embedded in a Bitcoin transaction: the
//! payload is pulled out of null-data or multisig outputs, de-obfuscated with
//! RC4, checked for the `CNTRPRTY` prefix and decoded per message type.
//!
//! ```rust
//! use counterparty_decoder::decoder::decode_message;
//! use counterparty_decoder::types::CounterpartyMessage;
//!
//! let payload = "434e5452505254590000000000000000000000000000000005f5e100";
//! let decoded = decode_message(payload, 800_000).unwrap().unwrap();
//! match decoded.message {
//!     CounterpartyMessage::ClassicSend { asset_name, quantity, .. } => {
//!         assert_eq!(asset_name, "BTC");
//!         assert_eq!(quantity, 100_000_000);
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod decoder;
pub mod errors;
pub mod explorer;
pub mod types;
pub mod utils;
