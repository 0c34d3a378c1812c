//! HTTP `LogSource` for a VeChainThor node, backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use chainlogs_core::{
    error::TransportError,
    event::RawLog,
    source::{LogSource, Order, PageRequest},
};
use serde::Serialize;

/// Public mainnet node used when `NODE_URL` is not set.
pub const DEFAULT_NODE_URL: &str = "https://mainnet.veblocks.net";

/// Body of `POST /logs/event`.
#[derive(Debug, Serialize)]
struct EventLogQuery<'a> {
    options: QueryOptions,
    #[serde(rename = "criteriaSet")]
    criteria_set: [Criteria<'a>; 1],
    order: Order,
}

#[derive(Debug, Serialize)]
struct QueryOptions {
    offset: u64,
    limit: u64,
}

#[derive(Debug, Serialize)]
struct Criteria<'a> {
    address: &'a str,
}

/// Thor node client for event-log queries.
#[derive(Debug, Clone)]
pub struct ThorNodeClient {
    client: reqwest::Client,
    url: String,
}

impl ThorNodeClient {
    /// Create a client for the node at `url` with the given per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("chainlogs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LogSource for ThorNodeClient {
    async fn fetch_page(
        &self,
        address: &str,
        page: &PageRequest,
    ) -> Result<Vec<RawLog>, TransportError> {
        let url = format!("{}/logs/event", self.url);
        let body = EventLogQuery {
            options: QueryOptions {
                offset: page.offset,
                limit: page.limit,
            },
            criteria_set: [Criteria { address }],
            order: page.order,
        };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                url,
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_body_shape() {
        let body = EventLogQuery {
            options: QueryOptions {
                offset: 200,
                limit: 100,
            },
            criteria_set: [Criteria {
                address: "0x0000000000000000000000000000456e65726779",
            }],
            order: Order::Desc,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "options": { "offset": 200, "limit": 100 },
                "criteriaSet": [{ "address": "0x0000000000000000000000000000456e65726779" }],
                "order": "desc"
            })
        );
    }
}
