//! ChainLogs CLI: prints the decoded event history of one contract.
//!
//! ```text
//! chainlogs <ADDRESS> [--json] [--max-pages N] [--remember-misses] [-v]
//! ```
//!
//! Decoded events go to stdout, newest first, one per line. Diagnostics go
//! to stderr.

use anyhow::{Context, Result};
use chainlogs_evm::EventDecoder;
use chainlogs_node::{LogPager, ThorNodeClient, DEFAULT_NODE_URL, DEFAULT_PAGE_SIZE};
use chainlogs_registry::{SigRegistryClient, SignatureResolver, DEFAULT_REGISTRY_URL};
use chainlogs_scan::{Orchestrator, OutputFormat, ScanConfig};
use clap::Parser;
use std::io;

mod logging;

use logging::LogConfig;

#[derive(Parser, Debug)]
#[command(
    name = "chainlogs",
    about = "Decode and print the event history of a VeChainThor contract",
    long_about = "
Walks every event log emitted by ADDRESS, newest first, resolves each event
signature through a public signature registry and prints one line per event:

  Transfer (address from 0x..., address to 0x..., uint256 value 1000)

Events whose signature is unknown to the registry are skipped with a warning.

ENVIRONMENT VARIABLES:
  NODE_URL           Thor node base URL
  SIG_REGISTRY_URL   Signature registry base URL
  RUST_LOG           Log filter, overrides -v
",
    version
)]
struct Cli {
    /// Contract address whose logs to scan
    address: String,

    /// Thor node base URL
    #[arg(long, env = "NODE_URL", default_value = DEFAULT_NODE_URL)]
    node_url: String,

    /// Signature registry base URL
    #[arg(long, env = "SIG_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    registry_url: String,

    /// Stop after this many log queries (default: until the first empty page)
    #[arg(long)]
    max_pages: Option<u64>,

    /// Do not query the registry again for a topic it did not know
    #[arg(long)]
    remember_misses: bool,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Debug logging for the scan pipeline
    #[arg(short, long)]
    verbose: bool,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

impl Cli {
    fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            node_url: self.node_url.clone(),
            registry_url: self.registry_url.clone(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: self.max_pages,
            remember_misses: self.remember_misses,
            timeout_secs: self.timeout_secs,
            format: if self.json { OutputFormat::Json } else { OutputFormat::Text },
        }
    }

    fn log_config(&self) -> LogConfig {
        let config = LogConfig {
            json: self.log_json,
            ..LogConfig::default()
        };
        if self.verbose {
            config.verbose()
        } else {
            config
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_config());

    let config = cli.scan_config();
    let node = ThorNodeClient::new(&config.node_url, config.timeout())
        .context("failed to build node client")?;
    let registry = SigRegistryClient::new(&config.registry_url, config.timeout())
        .context("failed to build signature registry client")?;

    let pager = LogPager::new(node, &cli.address)
        .with_page_size(config.page_size)
        .with_max_pages(config.max_pages);
    let resolver = SignatureResolver::new(registry).with_miss_policy(config.miss_policy());
    let mut orchestrator =
        Orchestrator::new(pager, resolver, EventDecoder::new()).with_format(config.format);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = orchestrator
        .run(&mut out)
        .await
        .with_context(|| format!("scan of {} failed", cli.address))?;

    tracing::info!(
        pages = summary.pages,
        entries = summary.entries,
        decoded = summary.decoded,
        unresolved = summary.unresolved,
        unknown_topics = summary.unresolved_topics.len(),
        "scan complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn address_is_required() {
        let err = Cli::try_parse_from(["chainlogs"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn flags_map_onto_scan_config() {
        let cli = Cli::try_parse_from([
            "chainlogs",
            "0x0000000000000000000000000000456e65726779",
            "--node-url",
            "http://localhost:8669",
            "--max-pages",
            "3",
            "--remember-misses",
            "--json",
            "--timeout-secs",
            "5",
        ])
        .unwrap();
        let config = cli.scan_config();

        assert_eq!(config.node_url, "http://localhost:8669");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.max_pages, Some(3));
        assert!(config.remember_misses);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn plain_run_uses_text_and_no_cap() {
        let cli = Cli::try_parse_from(["chainlogs", "0xabc"]).unwrap();
        let config = cli.scan_config();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.max_pages, None);
        assert!(!config.remember_misses);
        assert_eq!(cli.log_config().directives(), "info");
    }

    #[test]
    fn verbose_flag() {
        let cli = Cli::try_parse_from(["chainlogs", "-v", "0xabc"]).unwrap();
        assert!(cli.log_config().directives().contains("chainlogs_scan=debug"));
    }
}
