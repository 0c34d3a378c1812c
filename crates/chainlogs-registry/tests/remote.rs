//! `SigRegistryClient` against a mock HTTP registry.

#![cfg(feature = "remote")]

use std::time::Duration;

use chainlogs_core::{error::TransportError, source::SignatureSource};
use chainlogs_registry::{SigRegistryClient, SignatureResolver};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRANSFER: &str = "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

const TRANSFER_RECORDS: &str = r#"[
    {
        "signature": "Transfer(address,address,uint256)",
        "abi": {
            "anonymous": false,
            "inputs": [
                { "indexed": true,  "name": "_from",  "type": "address" },
                { "indexed": true,  "name": "_to",    "type": "address" },
                { "indexed": false, "name": "_value", "type": "uint256" }
            ],
            "name": "Transfer",
            "type": "event"
        }
    }
]"#;

fn client(server: &MockServer) -> SigRegistryClient {
    SigRegistryClient::new(server.uri(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn lookup_requests_event_signatures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{TRANSFER}")))
        .and(query_param("event", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRANSFER_RECORDS))
        .expect(1)
        .mount(&server)
        .await;

    let records = client(&server).lookup_event(TRANSFER).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].abi.name, "Transfer");
    assert_eq!(records[0].abi.indexed_count(), 2);
}

#[tokio::test]
async fn unknown_topic_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let records = client(&server).lookup_event(TRANSFER).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn server_error_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(&server).lookup_event(TRANSFER).await.unwrap_err();
    assert!(matches!(err, TransportError::Status { status: 503, .. }));
}

#[tokio::test]
async fn malformed_envelope_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"error":"nope"}"#))
        .mount(&server)
        .await;

    let err = client(&server).lookup_event(TRANSFER).await.unwrap_err();
    assert!(matches!(err, TransportError::Deserialization(_)));
}

#[tokio::test]
async fn resolver_hits_registry_once_per_topic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{TRANSFER}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(TRANSFER_RECORDS))
        .expect(1)
        .mount(&server)
        .await;

    let mut resolver = SignatureResolver::new(client(&server));
    for _ in 0..3 {
        let abi = resolver.resolve(TRANSFER).await.unwrap();
        assert_eq!(abi.unwrap().name, "Transfer");
    }
    assert_eq!(resolver.lookups(), 1);
}
