//! HTTP client for the public signature registry.
//!
//! `GET {base}/{topic}?event=true` answers with a JSON array of candidate
//! records, each carrying an `abi` object; an empty array means unknown.
//!
//! # Feature Flag
//! Requires the `remote` feature (on by default; pulls in `reqwest`).

use std::time::Duration;

use async_trait::async_trait;
use chainlogs_core::{abi::SignatureRecord, error::TransportError, source::SignatureSource};
use reqwest::Client;

/// Public signature registry used when nothing else is configured.
pub const DEFAULT_REGISTRY_URL: &str = "https://sig.api.vechain.energy";

/// `SignatureSource` backed by the signature registry's REST API.
#[derive(Debug, Clone)]
pub struct SigRegistryClient {
    client: Client,
    base_url: String,
}

impl SigRegistryClient {
    /// Create a client for `base_url` with the given per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("chainlogs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SignatureSource for SigRegistryClient {
    async fn lookup_event(&self, topic: &str) -> Result<Vec<SignatureRecord>, TransportError> {
        let url = format!("{}/{topic}", self.base_url);
        tracing::trace!(%url, "querying signature registry");

        let resp = self
            .client
            .get(&url)
            .query(&[("event", "true")])
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn url(&self) -> &str {
        &self.base_url
    }
}
