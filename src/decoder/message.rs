//! Counterparty message decoding
//!
//! Parses a reassembled payload (prefix, type id, body) into a
//! [`CounterpartyMessage`]. Layouts follow counterparty-core's
//! `lib/messages/*.py` pack formats; all integers are big-endian.

use super::error::{DecodeError, DecodeResult};
use super::reader::PayloadReader;
use crate::codec::{asset_name, from_blob, subasset_from_bytes, ADDRESS_BLOB_LEN};
use crate::types::{
    CounterpartyMessage, MessageType, COUNTERPARTY_PREFIX, ISSUANCE_FORMAT_CHANGE_HEIGHT,
};
use crate::utils::currency::sats_to_btc;
use crate::utils::text::decode_text;
use crate::utils::time::timestamp_to_iso;
use tracing::debug;

/// Order hash length in a Btcpay order match id
const ORDER_HASH_LEN: usize = 32;

/// Transaction context a message body is interpreted against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeContext {
    /// Selects between wire-format variants (issuance)
    pub block_height: u64,
    /// Output-0 address that classic sends, Btcpays and issuance transfers pay
    pub dust_recipient: Option<String>,
}

impl DecodeContext {
    pub fn at_height(block_height: u64) -> Self {
        Self {
            block_height,
            dust_recipient: None,
        }
    }
}

/// Message type id as it appeared on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub id: u32,
    /// Raw id bytes, hex (one byte, or four when the first is zero)
    pub id_hex: String,
}

impl MessageHeader {
    /// Known message type for this id, if any
    pub fn message_type(&self) -> Option<MessageType> {
        MessageType::from_id(self.id)
    }
}

/// A fully decoded message
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    pub header: MessageHeader,
    pub message: CounterpartyMessage,
}

impl DecodedMessage {
    pub fn message_type(&self) -> MessageType {
        self.message.message_type()
    }
}

/// Read the message type id from the front of a prefix-less body
///
/// A leading zero byte introduces a 4-byte id that includes that byte;
/// anything else is a 1-byte id.
pub fn parse_header(data: &[u8]) -> DecodeResult<(MessageHeader, &[u8])> {
    let mut reader = PayloadReader::new(data);
    let id_bytes = match reader.peek_u8() {
        Some(0) => reader.read_bytes(4, "message type")?,
        Some(_) => reader.read_bytes(1, "message type")?,
        None => {
            return Err(DecodeError::TruncatedPayload {
                field: "message type",
            })
        }
    };

    let id = id_bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b));
    let header = MessageHeader {
        id,
        id_hex: hex::encode(id_bytes),
    };

    Ok((header, reader.read_remaining()))
}

/// Decode a full payload (prefix included)
///
/// Returns `Ok(None)` when the payload does not start with `CNTRPRTY`.
pub fn decode_payload(payload: &[u8], ctx: &DecodeContext) -> DecodeResult<Option<DecodedMessage>> {
    let Some(data) = payload.strip_prefix(COUNTERPARTY_PREFIX) else {
        return Ok(None);
    };
    decode_body(data, ctx).map(Some)
}

/// Decode a hex payload (prefix included) at `block_height`
pub fn decode_message(payload_hex: &str, block_height: u64) -> DecodeResult<Option<DecodedMessage>> {
    let payload = hex::decode(payload_hex).map_err(|_| DecodeError::InvalidHex {
        context: "payload",
    })?;
    decode_payload(&payload, &DecodeContext::at_height(block_height))
}

/// Decode a message body that has already had its prefix removed
///
/// This is the shape Counterparty ledger databases store in their
/// `messages.data` column.
pub fn decode_data(data_hex: &str, block_height: u64) -> DecodeResult<DecodedMessage> {
    let data = hex::decode(data_hex).map_err(|_| DecodeError::InvalidHex {
        context: "message data",
    })?;
    decode_body(&data, &DecodeContext::at_height(block_height))
}

/// Decode a prefix-less body: type id followed by the message fields
pub fn decode_body(data: &[u8], ctx: &DecodeContext) -> DecodeResult<DecodedMessage> {
    let (header, body) = parse_header(data)?;
    let message = decode_fields(header.id, body, ctx)?;
    debug!(
        "Decoded message type {} ({}) with {} body bytes",
        header.id,
        message.message_type().name(),
        body.len()
    );
    Ok(DecodedMessage { header, message })
}

/// Decode the fields of message type `id`
pub fn decode_fields(id: u32, body: &[u8], ctx: &DecodeContext) -> DecodeResult<CounterpartyMessage> {
    let unsupported = DecodeError::UnsupportedMessageType {
        id,
        block_height: ctx.block_height,
    };
    let message_type = MessageType::from_id(id).ok_or_else(|| unsupported.clone())?;
    let legacy_format = ctx.block_height < ISSUANCE_FORMAT_CHANGE_HEIGHT;
    let mut reader = PayloadReader::new(body);

    match message_type {
        MessageType::ClassicSend => classic_send(&mut reader, ctx),
        MessageType::EnhancedSend => enhanced_send(&mut reader),
        MessageType::Sweep => sweep(&mut reader),
        MessageType::DexOrder => dex_order(&mut reader),
        MessageType::Btcpay => btcpay(&mut reader, ctx),
        MessageType::Dispenser => dispenser(&mut reader),
        MessageType::Issuance if legacy_format => legacy_issuance(&mut reader, ctx),
        MessageType::Issuance => issuance(&mut reader, ctx),
        MessageType::IssuanceSubasset if legacy_format => Err(unsupported),
        MessageType::IssuanceSubasset => issuance_subasset(&mut reader, ctx),
        MessageType::Broadcast => broadcast(&mut reader),
        MessageType::Dividend => dividend(&mut reader),
    }
}

/// Format: >QQ
fn classic_send(reader: &mut PayloadReader, ctx: &DecodeContext) -> DecodeResult<CounterpartyMessage> {
    let asset = reader.read_u64("asset")?;
    let quantity = reader.read_u64("quantity")?;

    Ok(CounterpartyMessage::ClassicSend {
        recipient: ctx.dust_recipient.clone(),
        asset,
        asset_name: asset_name(asset),
        quantity,
    })
}

/// Format: >QQ21s + memo
fn enhanced_send(reader: &mut PayloadReader) -> DecodeResult<CounterpartyMessage> {
    let asset = reader.read_u64("asset")?;
    let quantity = reader.read_u64("quantity")?;
    let recipient_blob = reader.read_bytes(ADDRESS_BLOB_LEN, "recipient")?;
    let recipient = from_blob(recipient_blob)?;
    let memo = reader.read_remaining();

    Ok(CounterpartyMessage::EnhancedSend {
        recipient: recipient.address,
        recipient_hex: hex::encode(recipient_blob),
        asset,
        asset_name: asset_name(asset),
        quantity,
        memo: decode_text(memo),
        memo_hex: hex::encode(memo),
    })
}

/// Format: >21sB + memo
fn sweep(reader: &mut PayloadReader) -> DecodeResult<CounterpartyMessage> {
    let recipient_blob = reader.read_bytes(ADDRESS_BLOB_LEN, "recipient")?;
    let recipient = from_blob(recipient_blob)?;
    let flag = reader.read_u8("flags")?;
    let memo = reader.read_remaining();

    Ok(CounterpartyMessage::Sweep {
        recipient: recipient.address,
        recipient_hex: hex::encode(recipient_blob),
        flag,
        memo: decode_text(memo),
        memo_hex: hex::encode(memo),
    })
}

/// Format: >QQQQH
///
/// Trailing fee fields of later protocol versions are not read.
fn dex_order(reader: &mut PayloadReader) -> DecodeResult<CounterpartyMessage> {
    let give_asset = reader.read_u64("give asset")?;
    let give_quantity = reader.read_u64("give quantity")?;
    let get_asset = reader.read_u64("get asset")?;
    let get_quantity = reader.read_u64("get quantity")?;
    let expiration = reader.read_u16("expiration")?;

    Ok(CounterpartyMessage::DexOrder {
        give_asset,
        give_asset_name: asset_name(give_asset),
        give_quantity,
        get_asset,
        get_asset_name: asset_name(get_asset),
        get_quantity,
        expiration,
    })
}

/// Format: >32s32s
fn btcpay(reader: &mut PayloadReader, ctx: &DecodeContext) -> DecodeResult<CounterpartyMessage> {
    let order_0 = reader.read_bytes(ORDER_HASH_LEN, "order match id")?;
    let order_1 = reader.read_bytes(ORDER_HASH_LEN, "order match id")?;

    Ok(CounterpartyMessage::Btcpay {
        order_0: hex::encode(order_0),
        order_1: hex::encode(order_1),
        recipient: ctx.dust_recipient.clone(),
    })
}

/// Format: >QQQQB + optional dispense address
fn dispenser(reader: &mut PayloadReader) -> DecodeResult<CounterpartyMessage> {
    let asset = reader.read_u64("asset")?;
    let give_quantity = reader.read_u64("give quantity")?;
    let escrow_quantity = reader.read_u64("escrow quantity")?;
    let mainchain_rate = reader.read_u64("mainchain rate")?;
    let status = reader.read_u8("status")?;
    let address_blob = reader.read_remaining();

    // Only dispensers opened on behalf of another address carry one
    let dispense_address = if address_blob.len() == ADDRESS_BLOB_LEN {
        match from_blob(address_blob) {
            Ok(address) => Some(address.address),
            Err(e) => {
                debug!("Dispenser address not decodable: {}", e);
                None
            }
        }
    } else {
        None
    };

    Ok(CounterpartyMessage::Dispenser {
        asset,
        asset_name: asset_name(asset),
        give_quantity,
        escrow_quantity,
        mainchain_rate,
        mainchain_rate_btc: sats_to_btc(mainchain_rate),
        status,
        dispense_address_hex: hex::encode(address_blob),
        dispense_address,
    })
}

/// Format: >QQ??If + length-prefixed description
fn legacy_issuance(
    reader: &mut PayloadReader,
    ctx: &DecodeContext,
) -> DecodeResult<CounterpartyMessage> {
    let asset = reader.read_u64("asset")?;
    let quantity = reader.read_u64("quantity")?;
    let divisible = reader.read_bool("divisible")?;
    let callable = reader.read_bool("callable")?;
    let call_date = reader.read_u32("call date")?;
    let call_price = reader.read_u32("call price")?;
    let description_length = reader.read_u8("description length")?;
    let description = reader.read_remaining();

    Ok(CounterpartyMessage::LegacyIssuance {
        transfer_to: ctx.dust_recipient.clone(),
        asset,
        asset_name: asset_name(asset),
        quantity,
        divisible,
        callable,
        call_date,
        call_price,
        description_length,
        description: decode_text(description),
    })
}

/// Format: >QQ??? + description
fn issuance(reader: &mut PayloadReader, ctx: &DecodeContext) -> DecodeResult<CounterpartyMessage> {
    let asset = reader.read_u64("asset")?;
    let quantity = reader.read_u64("quantity")?;
    let divisible = reader.read_bool("divisible")?;
    let lock = reader.read_bool("lock")?;
    let reset = reader.read_bool("reset")?;
    let description = reader.read_remaining();

    Ok(CounterpartyMessage::Issuance {
        transfer_to: ctx.dust_recipient.clone(),
        asset,
        asset_name: asset_name(asset),
        quantity,
        divisible,
        lock,
        reset,
        description: decode_text(description),
    })
}

/// Format: >QQ???B + compacted subasset name + description
fn issuance_subasset(
    reader: &mut PayloadReader,
    ctx: &DecodeContext,
) -> DecodeResult<CounterpartyMessage> {
    let asset = reader.read_u64("asset")?;
    let quantity = reader.read_u64("quantity")?;
    let divisible = reader.read_bool("divisible")?;
    let lock = reader.read_bool("lock")?;
    let reset = reader.read_bool("reset")?;
    let subasset_length = reader.read_u8("subasset length")?;
    let subasset = reader.read_bytes(subasset_length as usize, "subasset name")?;
    let subasset_longname = subasset_from_bytes(subasset)?;
    let description = reader.read_remaining();

    Ok(CounterpartyMessage::IssuanceSubasset {
        transfer_to: ctx.dust_recipient.clone(),
        asset,
        asset_name: asset_name(asset),
        quantity,
        divisible,
        lock,
        reset,
        subasset_length,
        subasset_longname,
        description: decode_text(description),
    })
}

/// Format: >IdI + text, optionally length-prefixed
fn broadcast(reader: &mut PayloadReader) -> DecodeResult<CounterpartyMessage> {
    let timestamp = reader.read_u32("timestamp")?;
    let value = reader.read_u64("value")?;
    let fee_fraction = reader.read_u32("fee fraction")?;
    let rest = reader.read_remaining();

    // Newer broadcasts prefix the text with its length; older ones do not
    let (text_length, text) = match rest.split_first() {
        Some((&len, text)) if len as usize == text.len() => (Some(len), text),
        _ => (None, rest),
    };

    Ok(CounterpartyMessage::Broadcast {
        timestamp,
        timestamp_iso: timestamp_to_iso(i64::from(timestamp)),
        value,
        fee_fraction,
        text_length,
        text: decode_text(text),
    })
}

/// Format: >QQQ
fn dividend(reader: &mut PayloadReader) -> DecodeResult<CounterpartyMessage> {
    let quantity_per_unit = reader.read_u64("quantity per unit")?;
    let asset = reader.read_u64("asset")?;
    let dividend_asset = reader.read_u64("dividend asset")?;

    Ok(CounterpartyMessage::Dividend {
        quantity_per_unit,
        asset,
        asset_name: asset_name(asset),
        dividend_asset,
        dividend_asset_name: asset_name(dividend_asset),
    })
}
