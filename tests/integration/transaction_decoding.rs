//! Decoding whole explorer documents across all payload encodings

use crate::common::*;
use byteorder::{BigEndian, WriteBytesExt};
use counterparty_decoder::decoder::{decode_transaction, decode_transaction_message, DecodeError};
use counterparty_decoder::types::{CounterpartyMessage, Encoding, MessageType, COUNTERPARTY_PREFIX};

#[test]
fn test_op_return_classic_send_document() {
    let tx = transaction(
        &txid(1),
        CURRENT_HEIGHT,
        vec![
            p2pkh_output(DUST_ADDRESS, 5430),
            null_data_output(&payload(0, &classic_send_body(1, 250_000_000))),
        ],
    );

    let decoded = decode_transaction(&tx);
    let json = serde_json::to_value(&decoded).unwrap();

    assert_eq!(json["tx"]["hash"], txid(1));
    assert_eq!(json["tx"]["from_addr"], SOURCE_ADDRESS);
    assert_eq!(json["tx"]["fees"], 12345);
    assert_eq!(json["tx"]["fees_btc"], "0.00012345");
    assert_eq!(json["tx"]["recipient"], DUST_ADDRESS);
    assert_eq!(json["tx"]["first_send_sat"], 5430);
    assert_eq!(json["tx"]["first_send_btc"], "0.00005430");

    let cp = &json["cntrprty"];
    assert_eq!(cp["encoding"], "op_return");
    assert_eq!(cp["prefix_hex"], "434e545250525459");
    assert_eq!(cp["prefix"], "CNTRPRTY");
    assert_eq!(cp["id_hex"], "00000000");
    assert_eq!(cp["id"], 0);
    assert_eq!(cp["cp_msg"], hex::encode(classic_send_body(1, 250_000_000)));
    assert_eq!(cp["msg_type"], "Classic Send");
    assert_eq!(cp["msg_decoded"]["asset_name"], "XCP");
    assert_eq!(cp["msg_decoded"]["q"], 250_000_000u64);
    assert_eq!(cp["msg_decoded"]["recipient"], DUST_ADDRESS);
    assert!(cp.get("decode_error").is_none());
    assert!(cp["raw_ascii"].as_str().unwrap().starts_with("CNTRPRTY????"));
}

#[test]
fn test_transaction_without_counterparty_data() {
    let tx = transaction(
        &txid(2),
        CURRENT_HEIGHT,
        vec![
            p2pkh_output(DUST_ADDRESS, 100_000),
            null_data_output(b"omni and other protocols"),
        ],
    );

    let decoded = decode_transaction(&tx);
    assert!(decoded.cntrprty.is_none());
    assert_eq!(decoded.tx.recipient.as_deref(), Some(DUST_ADDRESS));

    let json = serde_json::to_value(&decoded).unwrap();
    assert!(json["cntrprty"].is_null());
    assert_eq!(decode_transaction_message(&tx).unwrap(), None);
}

#[test]
fn test_multisig_issuance_across_outputs() {
    let description = "A long enough description to need several multisig outputs, ペペ included";
    let body = issuance_body(PEPECASH, 1_000_000_000, description);
    let data = payload(20, &body);
    let outputs = multisig_outputs(&data);
    assert!(outputs.len() > 1);

    let tx = transaction(&txid(3), CURRENT_HEIGHT, outputs);
    let decoded = decode_transaction(&tx);
    let envelope = decoded.cntrprty.as_ref().unwrap();

    assert_eq!(envelope.encoding, Some(Encoding::Multisig));
    assert_eq!(envelope.cp_msg, hex::encode(&body));
    assert_eq!(
        decoded.message(),
        Some(&CounterpartyMessage::Issuance {
            transfer_to: None,
            asset: PEPECASH,
            asset_name: "PEPECASH".to_string(),
            quantity: 1_000_000_000,
            divisible: true,
            lock: false,
            reset: false,
            description: description.to_string(),
        })
    );
}

#[test]
fn test_legacy_multisig_broadcast() {
    let text = "BLOCKSCAN VERIFY-ADDRESS 8g7whp5w2b9jz2d";
    let mut body = Vec::new();
    body.write_u32::<BigEndian>(1_400_000_000).unwrap();
    body.write_f64::<BigEndian>(1.0).unwrap();
    body.write_u32::<BigEndian>(0).unwrap();
    body.extend_from_slice(text.as_bytes());
    let data = payload(30, &body);

    let mut outputs = vec![p2pkh_output(SOURCE_ADDRESS, 5430)];
    outputs.extend(legacy_multisig_outputs(&data));
    let tx = transaction(&txid(4), 310_000, outputs);

    let decoded = decode_transaction(&tx);
    let envelope = decoded.cntrprty.as_ref().unwrap();
    assert_eq!(envelope.encoding, Some(Encoding::LegacyMultisig));
    assert_eq!(envelope.msg_type, Some("Broadcast"));

    let message = decoded.message().unwrap();
    assert_eq!(message.broadcast_value(), Some(1.0));
    match message {
        CounterpartyMessage::Broadcast {
            timestamp_iso,
            text_length,
            text: decoded_text,
            ..
        } => {
            assert_eq!(timestamp_iso, "2014-05-13T16:53:20.000Z");
            assert_eq!(*text_length, None);
            assert_eq!(decoded_text, text);
        }
        other => panic!("unexpected message {:?}", other),
    }
}

#[test]
fn test_enhanced_send_to_bech32_recipient() {
    let mut body = Vec::new();
    body.write_u64::<BigEndian>(PEPECASH).unwrap();
    body.write_u64::<BigEndian>(42).unwrap();
    body.extend_from_slice(&hex::decode("80751e76e8199196d454941c45d1b3a323f1433bd6").unwrap());
    body.extend_from_slice(b"thanks");

    let tx = transaction(
        &txid(5),
        CURRENT_HEIGHT,
        vec![null_data_output(&payload(2, &body))],
    );
    let json = serde_json::to_value(decode_transaction(&tx)).unwrap();
    let message = &json["cntrprty"]["msg_decoded"];

    assert_eq!(json["tx"]["recipient"], serde_json::Value::Null);
    assert_eq!(message["recipient"], "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
    assert_eq!(message["recipient_hex"], "80751e76e8199196d454941c45d1b3a323f1433bd6");
    assert_eq!(message["asset_name"], "PEPECASH");
    assert_eq!(message["memo"], "thanks");
    assert_eq!(message["memo_hex"], "7468616e6b73");
}

#[test]
fn test_subasset_issuance_document() {
    let subasset = hex::decode("609d91d5b72e6ee70bdd4c6cbb").unwrap();
    let mut body = Vec::new();
    body.write_u64::<BigEndian>(95_428_956_661_682_200).unwrap();
    body.write_u64::<BigEndian>(1).unwrap();
    body.extend_from_slice(&[0, 0, 0]);
    body.push(subasset.len() as u8);
    body.extend_from_slice(&subasset);

    let tx = transaction(
        &txid(6),
        CURRENT_HEIGHT,
        vec![
            p2pkh_output(DUST_ADDRESS, 5430),
            null_data_output(&payload(21, &body)),
        ],
    );
    let json = serde_json::to_value(decode_transaction(&tx)).unwrap();
    let message = &json["cntrprty"]["msg_decoded"];

    assert_eq!(json["cntrprty"]["msg_type"], "Issuance (Subasset)");
    assert_eq!(message["asset_name"], "numerical-or-subasset");
    assert_eq!(message["subasset"], "JPJA.sub_asset@1!");
    assert_eq!(message["len_subasset"], 13);
    assert_eq!(message["transfer_to"], DUST_ADDRESS);
    assert_eq!(message["descr"], "");
}

#[test]
fn test_truncated_payload_keeps_envelope() {
    // Classic send cut off inside the quantity
    let data = payload(0, &classic_send_body(1, 5)[..12]);
    let tx = transaction(&txid(7), CURRENT_HEIGHT, vec![null_data_output(&data)]);

    let decoded = decode_transaction(&tx);
    let envelope = decoded.cntrprty.as_ref().unwrap();
    assert_eq!(envelope.id, Some(0));
    assert_eq!(envelope.msg_type, Some(MessageType::ClassicSend.name()));
    assert_eq!(envelope.cp_msg, hex::encode(&classic_send_body(1, 5)[..12]));
    assert!(!envelope.is_decoded());
    assert_eq!(
        decoded.decode_error(),
        Some("Payload truncated while reading quantity")
    );

    assert_eq!(
        decode_transaction_message(&tx).unwrap_err(),
        DecodeError::TruncatedPayload { field: "quantity" }
    );
}

#[test]
fn test_truncated_type_id_keeps_post_prefix_bytes() {
    // A leading zero announces a 4-byte id but only two bytes follow
    let mut data = COUNTERPARTY_PREFIX.to_vec();
    data.extend_from_slice(&[0x00, 0x00]);
    let tx = transaction(&txid(0x0c), CURRENT_HEIGHT, vec![null_data_output(&data)]);

    let decoded = decode_transaction(&tx);
    let envelope = decoded.cntrprty.as_ref().unwrap();
    assert_eq!(envelope.prefix, "CNTRPRTY");
    assert_eq!(envelope.cp_msg, "0000");
    assert_eq!(envelope.id, None);
    assert_eq!(
        decoded.decode_error(),
        Some("Payload truncated while reading message type")
    );
}

#[test]
fn test_subasset_issuance_before_activation_is_unsupported() {
    let data = payload(21, &issuance_body(PEPECASH, 1, ""));
    let tx = transaction(&txid(8), LEGACY_HEIGHT, vec![null_data_output(&data)]);

    let decoded = decode_transaction(&tx);
    assert_eq!(
        decoded.decode_error(),
        Some("Unsupported message type 21 at block height 700000")
    );
    assert!(matches!(
        decode_transaction_message(&tx),
        Err(DecodeError::UnsupportedMessageType { id: 21, .. })
    ));
}

#[test]
fn test_unconfirmed_transaction_uses_current_issuance_format() {
    let data = payload(20, &issuance_body(PEPECASH, 1, "fresh"));
    let tx = transaction(&txid(9), -1, vec![null_data_output(&data)]);

    let decoded = decode_transaction(&tx);
    assert!(matches!(
        decoded.message(),
        Some(CounterpartyMessage::Issuance { .. })
    ));
}

#[test]
fn test_unknown_message_type_has_no_name() {
    let data = payload(0x63, &[1, 2, 3]);
    let tx = transaction(&txid(10), CURRENT_HEIGHT, vec![null_data_output(&data)]);

    let json = serde_json::to_value(decode_transaction(&tx)).unwrap();
    assert_eq!(json["cntrprty"]["id"], 0x63);
    assert!(json["cntrprty"]["msg_type"].is_null());
    assert!(json["cntrprty"]["msg_decoded"].is_null());
    assert_eq!(
        json["cntrprty"]["decode_error"],
        "Unsupported message type 99 at block height 800000"
    );
}

#[test]
fn test_btcpay_pays_dust_recipient() {
    let mut body = vec![0x11; 32];
    body.extend_from_slice(&[0x22; 32]);
    let tx = transaction(
        &txid(11),
        CURRENT_HEIGHT,
        vec![
            p2pkh_output(DUST_ADDRESS, 1_000_000),
            null_data_output(&payload(11, &body)),
        ],
    );

    let decoded = decode_transaction(&tx);
    let message = decoded.message().unwrap();
    assert_eq!(
        message.order_match_id(),
        Some(format!("{}_{}", "11".repeat(32), "22".repeat(32)))
    );
    match message {
        CounterpartyMessage::Btcpay { recipient, .. } => {
            assert_eq!(recipient.as_deref(), Some(DUST_ADDRESS))
        }
        other => panic!("unexpected message {:?}", other),
    }
}
