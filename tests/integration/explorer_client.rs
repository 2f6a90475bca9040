//! Explorer client against a scripted local HTTP server

use crate::common::explorer_server::{ExplorerServer, ScriptedResponse};
use crate::common::*;
use counterparty_decoder::config::ExplorerConfig;
use counterparty_decoder::decoder::decode_transaction;
use counterparty_decoder::errors::FetchError;
use counterparty_decoder::explorer::ExplorerClient;

fn client_for(server: &ExplorerServer, max_retries: usize) -> ExplorerClient {
    ExplorerClient::new(ExplorerConfig {
        base_url: server.base_url.clone(),
        timeout_seconds: 5,
        max_retries,
        initial_backoff_ms: 1,
        backoff_multiplier: 2.0,
        max_backoff_seconds: 1,
        concurrent_requests: 2,
    })
    .unwrap()
}

fn send_document(hash: &str) -> serde_json::Value {
    explorer_document(
        hash,
        CURRENT_HEIGHT,
        vec![
            p2pkh_output(DUST_ADDRESS, 5430),
            null_data_output(&payload(0, &classic_send_body(1, 10))),
        ],
    )
}

#[tokio::test]
async fn test_fetch_and_decode() {
    let hash = txid(0xa1);
    let server = ExplorerServer::start(vec![ScriptedResponse::ok(&send_document(&hash))])
        .await
        .unwrap();
    let client = client_for(&server, 3);

    let transaction = client.get_transaction(&hash).await.unwrap();
    assert_eq!(transaction.hash, hash);
    assert_eq!(transaction.first_input_txid(), Some(KEY_TXID));

    let decoded = decode_transaction(&transaction);
    assert_eq!(decoded.cntrprty.unwrap().msg_type, Some("Classic Send"));
}

#[tokio::test]
async fn test_second_fetch_served_from_cache() {
    let hash = txid(0xa2);
    let server = ExplorerServer::start(vec![ScriptedResponse::ok(&send_document(&hash))])
        .await
        .unwrap();
    let client = client_for(&server, 3);

    client.get_transaction(&hash).await.unwrap();
    client.get_transaction(&hash).await.unwrap();

    assert_eq!(server.request_count(), 1);
    assert_eq!(client.get_cache_stats().hits, 1);
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let hash = txid(0xa3);
    let server = ExplorerServer::start(vec![
        ScriptedResponse::status(503),
        ScriptedResponse::status(429),
        ScriptedResponse::ok(&send_document(&hash)),
    ])
    .await
    .unwrap();
    let client = client_for(&server, 5);

    let transaction = client.get_transaction(&hash).await.unwrap();
    assert_eq!(transaction.hash, hash);
    assert_eq!(server.request_count(), 3);
    assert_eq!(client.get_error_count(), 2);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = ExplorerServer::start(vec![ScriptedResponse::status(404)])
        .await
        .unwrap();
    let client = client_for(&server, 5);

    let err = client.get_transaction(&txid(0xa4)).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
    assert_eq!(server.request_count(), 1);
}

#[tokio::test]
async fn test_retry_limit() {
    let server = ExplorerServer::start(vec![ScriptedResponse::status(500)])
        .await
        .unwrap();
    let client = client_for(&server, 3);

    let err = client.get_transaction(&txid(0xa5)).await.unwrap_err();
    assert!(matches!(err, FetchError::MaxRetriesExceeded { .. }));
    assert_eq!(server.request_count(), 3);
}

#[tokio::test]
async fn test_malformed_document() {
    let server = ExplorerServer::start(vec![ScriptedResponse {
        status: 200,
        body: r#"{"outputs": "not a list"}"#.to_string(),
    }])
    .await
    .unwrap();
    let client = client_for(&server, 3);

    let err = client.get_transaction(&txid(0xa6)).await.unwrap_err();
    assert!(matches!(err, FetchError::Deserialisation(_)));
    assert_eq!(server.request_count(), 1);
}

#[tokio::test]
async fn test_document_for_another_transaction_is_rejected() {
    let server = ExplorerServer::start(vec![ScriptedResponse::ok(&send_document(&txid(0xb0)))])
        .await
        .unwrap();
    let client = client_for(&server, 3);

    let err = client.get_transaction(&txid(0xa7)).await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::HashMismatch { ref returned, .. } if *returned == txid(0xb0)
    ));
    assert_eq!(server.request_count(), 1);

    // Rejected documents are not cached
    assert!(client.get_transaction(&txid(0xa7)).await.is_err());
    assert_eq!(server.request_count(), 2);
    assert_eq!(client.get_cache_stats().hits, 0);
}

#[tokio::test]
async fn test_last_failure_returns_without_backoff() {
    let server = ExplorerServer::start(vec![ScriptedResponse::status(503)])
        .await
        .unwrap();
    let client = ExplorerClient::new(ExplorerConfig {
        base_url: server.base_url.clone(),
        timeout_seconds: 5,
        max_retries: 1,
        initial_backoff_ms: 30_000,
        backoff_multiplier: 2.0,
        max_backoff_seconds: 30,
        concurrent_requests: 1,
    })
    .unwrap();

    let err = tokio::time::timeout(
        std::time::Duration::from_secs(5),
        client.get_transaction(&txid(0xa8)),
    )
    .await
    .expect("gave up without sleeping")
    .unwrap_err();
    assert!(matches!(err, FetchError::MaxRetriesExceeded { .. }));
    assert_eq!(server.request_count(), 1);
}
