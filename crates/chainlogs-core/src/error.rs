//! Error types shared by the ChainLogs pipeline.

use thiserror::Error;

/// Failure reaching the ledger node or the signature registry.
///
/// Never retried: every variant aborts the scan.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, timeout, etc.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Status { url: String, status: u16, body: String },

    /// The response envelope could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

/// Errors raised while decoding a raw log against an event description.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unknown parameter type '{tag}'")]
    UnknownType { tag: String },

    #[error("Log has no discriminator topic")]
    MissingDiscriminator,

    #[error("Topic count mismatch for {event}: expected {expected} indexed topics, got {actual}")]
    TopicCountMismatch {
        event: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid hex in {what}: {reason}")]
    InvalidHex { what: String, reason: String },

    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },

    #[error("Value count mismatch: {expected} inputs, {actual} values")]
    ValueCountMismatch { expected: usize, actual: usize },

    #[error("Value for '{name}' does not match type {expected}")]
    ValueTypeMismatch { name: String, expected: String },
}

impl DecodeError {
    /// Returns `true` if the log's topic/data shape disagrees with its description.
    pub fn is_malformed_log(&self) -> bool {
        matches!(
            self,
            Self::TopicCountMismatch { .. }
                | Self::MissingDiscriminator
                | Self::InvalidHex { .. }
                | Self::AbiDecodeFailed { .. }
        )
    }
}
