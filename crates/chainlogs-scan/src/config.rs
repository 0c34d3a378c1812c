//! Scan configuration.

use std::time::Duration;

use chainlogs_node::{DEFAULT_NODE_URL, DEFAULT_PAGE_SIZE};
use chainlogs_registry::{MissPolicy, DEFAULT_REGISTRY_URL};
use serde::{Deserialize, Serialize};

/// How each decoded event is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Name (type name value, ...)`
    #[default]
    Text,
    /// One serialized `DecodedEvent` per line
    Json,
}

/// Resolved settings for one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Thor node base URL
    #[serde(default = "default_node_url")]
    pub node_url: String,
    /// Signature registry base URL
    #[serde(default = "default_registry_url")]
    pub registry_url: String,
    /// Entries requested per log query
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Stop after this many queries (None = until the first empty page)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u64>,
    /// Cache topics the registry does not know for the rest of the run
    #[serde(default)]
    pub remember_misses: bool,
    /// Per-request HTTP timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_node_url() -> String { DEFAULT_NODE_URL.to_string() }
fn default_registry_url() -> String { DEFAULT_REGISTRY_URL.to_string() }
fn default_page_size() -> u64 { DEFAULT_PAGE_SIZE }
fn default_timeout_secs() -> u64 { 30 }

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            node_url: default_node_url(),
            registry_url: default_registry_url(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            remember_misses: false,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Text,
        }
    }
}

impl ScanConfig {
    pub fn miss_policy(&self) -> MissPolicy {
        if self.remember_misses {
            MissPolicy::Remember
        } else {
            MissPolicy::Requery
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg: ScanConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ScanConfig::default());
        assert_eq!(cfg.node_url, "https://mainnet.veblocks.net");
        assert_eq!(cfg.registry_url, "https://sig.api.vechain.energy");
        assert_eq!(cfg.page_size, 100);
        assert_eq!(cfg.miss_policy(), MissPolicy::Requery);
    }

    #[test]
    fn overrides() {
        let cfg: ScanConfig = serde_json::from_str(
            r#"{ "node_url": "http://localhost:8669", "max_pages": 5,
                 "remember_misses": true, "timeout_secs": 3, "format": "json" }"#,
        )
        .unwrap();
        assert_eq!(cfg.node_url, "http://localhost:8669");
        assert_eq!(cfg.max_pages, Some(5));
        assert_eq!(cfg.miss_policy(), MissPolicy::Remember);
        assert_eq!(cfg.timeout(), Duration::from_secs(3));
        assert_eq!(cfg.format, OutputFormat::Json);
    }
}
