//! # chainlogs-scan
//!
//! Drives one scan: pages through an address's logs with [`LogPager`],
//! resolves each discriminator topic with [`SignatureResolver`], decodes the
//! log with [`EventDecoder`] and writes one line per decoded event.
//!
//! Unknown topics are skipped and counted. Every other failure ends the scan.
//!
//! [`LogPager`]: chainlogs_node::LogPager
//! [`SignatureResolver`]: chainlogs_registry::SignatureResolver
//! [`EventDecoder`]: chainlogs_evm::EventDecoder

pub mod config;
pub mod orchestrator;

pub use config::{OutputFormat, ScanConfig};
pub use orchestrator::{Orchestrator, ScanError, ScanSummary};
