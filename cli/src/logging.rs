//! Tracing initialisation. Diagnostics go to stderr; stdout carries only
//! decoded events.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events `--verbose` turns up to debug.
const PIPELINE_CRATES: [&str; 4] = [
    "chainlogs-node",
    "chainlogs-registry",
    "chainlogs-scan",
    "chainlogs",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: crate name → level
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Debug output for the pipeline crates, dependencies stay at `level`.
    pub fn verbose(mut self) -> Self {
        for name in PIPELINE_CRATES {
            self.components.insert(name.to_string(), "debug".to_string());
        }
        self
    }

    /// Filter directives, e.g. `info,chainlogs_node=debug`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }
}

/// Install the global subscriber. `RUST_LOG`, when set, wins over `config`.
pub fn init_tracing(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.directives()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_plain_info() {
        assert_eq!(LogConfig::default().directives(), "info");
    }

    #[test]
    fn verbose_raises_pipeline_crates_only() {
        let directives = LogConfig::default().verbose().directives();
        assert!(directives.starts_with("info,"));
        assert!(directives.contains("chainlogs_node=debug"));
        assert!(directives.contains("chainlogs_registry=debug"));
        assert!(directives.contains("chainlogs_scan=debug"));
        assert!(!directives.contains("reqwest"));
    }
}
