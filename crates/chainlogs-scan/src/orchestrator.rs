//! The scan loop.

use std::io::{self, Write};

use chainlogs_core::{
    error::DecodeError,
    event::{DecodedEvent, RawLog},
    source::{LogSource, SignatureSource},
};
use chainlogs_evm::EventDecoder;
use chainlogs_node::{LogPager, PagerError};
use chainlogs_registry::{ResolveError, SignatureResolver};
use futures::TryStreamExt;
use serde::Serialize;
use thiserror::Error;

use crate::config::OutputFormat;

/// A failure that ends the scan. Lines already written stay written.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    LogQuery(#[from] PagerError),

    #[error(transparent)]
    SignatureLookup(#[from] ResolveError),

    /// The log's topics or data disagree with its resolved description.
    #[error("malformed {event} log in tx {tx_id}: {source}")]
    MalformedLog {
        event: String,
        tx_id: String,
        #[source]
        source: DecodeError,
    },

    /// The resolved description itself cannot be decoded against.
    #[error("unsupported {event} description for topic {topic}: {source}")]
    UnsupportedEvent {
        event: String,
        topic: String,
        #[source]
        source: DecodeError,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Counters for a finished scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Log queries issued, the final empty one included
    pub pages: u64,
    /// Log entries seen
    pub entries: u64,
    /// Entries decoded and written
    pub decoded: u64,
    /// Entries skipped for lack of a signature
    pub unresolved: u64,
    /// Distinct unknown topics, first-seen order
    pub unresolved_topics: Vec<String>,
}

/// Pager, resolver and decoder wired together for one address.
pub struct Orchestrator<L, S> {
    pager: LogPager<L>,
    resolver: SignatureResolver<S>,
    decoder: EventDecoder,
    format: OutputFormat,
}

impl<L: LogSource, S: SignatureSource> Orchestrator<L, S> {
    pub fn new(pager: LogPager<L>, resolver: SignatureResolver<S>, decoder: EventDecoder) -> Self {
        Self {
            pager,
            resolver,
            decoder,
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Walk the whole history, writing one line per decoded event to `out`.
    ///
    /// Entries are handled strictly in page, then in-page, order. An entry
    /// whose topic the registry does not know is skipped; any other failure
    /// returns immediately and no further entries are processed.
    pub async fn run<W: Write>(&mut self, out: &mut W) -> Result<ScanSummary, ScanError> {
        tracing::info!(
            address = %self.pager.address(),
            node = %self.pager.source().url(),
            registry = %self.resolver.source().url(),
            "scanning event logs"
        );

        let mut summary = ScanSummary::default();
        {
            let entries = self.pager.entries();
            futures::pin_mut!(entries);

            while let Some(log) = entries.try_next().await? {
                summary.entries += 1;
                match Self::process(&mut self.resolver, &self.decoder, &log).await? {
                    Some(event) => {
                        write_event(out, self.format, &event)?;
                        summary.decoded += 1;
                    }
                    None => {
                        summary.unresolved += 1;
                        if let Some(topic) = log.topic0() {
                            if !summary.unresolved_topics.iter().any(|t| t == topic) {
                                summary.unresolved_topics.push(topic.to_string());
                            }
                        }
                    }
                }
            }
        }
        out.flush()?;

        summary.pages = self.pager.pages_fetched();
        Ok(summary)
    }

    /// Resolve and decode one entry. `Ok(None)` means skip it.
    async fn process(
        resolver: &mut SignatureResolver<S>,
        decoder: &EventDecoder,
        log: &RawLog,
    ) -> Result<Option<DecodedEvent>, ScanError> {
        let Some(topic) = log.topic0() else {
            tracing::warn!(tx_id = %log.meta.tx_id, "log has no topics, skipping");
            return Ok(None);
        };

        let Some(abi) = resolver.resolve(topic).await? else {
            return Ok(None);
        };

        match decoder.decode(log, &abi) {
            Ok(event) => Ok(Some(event)),
            Err(source) if source.is_malformed_log() => Err(ScanError::MalformedLog {
                event: abi.name.clone(),
                tx_id: log.meta.tx_id.clone(),
                source,
            }),
            Err(source) => Err(ScanError::UnsupportedEvent {
                event: abi.name.clone(),
                topic: topic.to_string(),
                source,
            }),
        }
    }

    pub fn resolver(&self) -> &SignatureResolver<S> {
        &self.resolver
    }
}

fn write_event<W: Write>(out: &mut W, format: OutputFormat, event: &DecodedEvent) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", event.render()),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, event).map_err(io::Error::from)?;
            writeln!(out)
        }
    }
}
