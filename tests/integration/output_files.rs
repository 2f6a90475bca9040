//! Writing decoded documents and reading explorer documents from disk

use crate::common::*;
use counterparty_decoder::cli::commands::decode::load_transaction;
use counterparty_decoder::decoder::{decode_transaction, OutputError, OutputManager};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_decoded_document_round_trips_through_disk() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let hash = txid(0xb1);

    let input_path = dir.path().join("input.json");
    let document = explorer_document(
        &hash,
        CURRENT_HEIGHT,
        vec![
            p2pkh_output(DUST_ADDRESS, 5430),
            null_data_output(&payload(0, &classic_send_body(0, 100_000_000))),
        ],
    );
    fs::write(&input_path, serde_json::to_string_pretty(&document)?)?;

    let transaction = load_transaction(&input_path)?;
    let decoded = decode_transaction(&transaction);

    let manager = OutputManager::new(dir.path().join("decoded"));
    let written = manager.write_decoded(&decoded)?;
    assert_eq!(written, dir.path().join("decoded").join(format!("{}.json", hash)));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&written)?)?;
    assert_eq!(json["tx"]["hash"], hash);
    assert_eq!(json["cntrprty"]["msg_decoded"]["asset_name"], "BTC");
    assert_eq!(json["cntrprty"]["msg_decoded"]["q"], 100_000_000u64);
    Ok(())
}

#[test]
fn test_load_rejects_non_json() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("broken.json");
    fs::write(&path, "not json")?;

    let err = load_transaction(&path).unwrap_err();
    assert!(err.to_string().starts_with("Invalid data: JSON error"));
    Ok(())
}

#[test]
fn test_non_txid_hash_is_not_used_as_file_name() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let output_dir = dir.path().join("decoded");
    let decoded = decode_transaction(&transaction(
        "../escaped",
        CURRENT_HEIGHT,
        vec![null_data_output(&payload(0, &classic_send_body(1, 1)))],
    ));

    let manager = OutputManager::new(output_dir.clone());
    let err = manager.write_decoded(&decoded).unwrap_err();
    assert!(matches!(err, OutputError::InvalidHash(ref hash) if hash == "../escaped"));
    assert!(!dir.path().join("escaped.json").exists());
    assert!(!output_dir.exists());
    Ok(())
}
