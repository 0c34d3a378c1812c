//! Raw and decoded log types.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::types::FieldValue;

/// Ledger metadata attached to a log. Carried through, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMeta {
    #[serde(rename = "blockID", default)]
    pub block_id: String,
    #[serde(rename = "blockNumber", default)]
    pub block_number: u64,
    #[serde(rename = "blockTimestamp", default)]
    pub block_timestamp: u64,
    #[serde(rename = "txID", default)]
    pub tx_id: String,
    #[serde(rename = "txOrigin", default)]
    pub tx_origin: String,
    #[serde(rename = "clauseIndex", default)]
    pub clause_index: u32,
}

/// A raw event log as returned by the node's `/logs/event` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLog {
    /// Emitting contract
    #[serde(default)]
    pub address: String,
    /// topics[0] discriminates the event; topics[1..] carry indexed params
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed params, 0x-prefixed hex
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub meta: LogMeta,
}

impl RawLog {
    /// The discriminator topic, if present.
    pub fn topic0(&self) -> Option<&str> {
        self.topics.first().map(String::as_str)
    }

    /// Decoded bytes of the data blob.
    pub fn data_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        decode_hex("data", &self.data)
    }

    /// Decoded bytes of the topic at `index`.
    pub fn topic_bytes(&self, index: usize) -> Result<Option<Vec<u8>>, DecodeError> {
        self.topics
            .get(index)
            .map(|t| decode_hex(&format!("topics[{index}]"), t))
            .transpose()
    }
}

fn decode_hex(what: &str, s: &str) -> Result<Vec<u8>, DecodeError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| DecodeError::InvalidHex {
        what: what.to_string(),
        reason: e.to_string(),
    })
}

/// One decoded input: declared type tag, name, and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub value: FieldValue,
}

/// A decoded event, fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedEvent {
    pub name: String,
    pub fields: Vec<DecodedField>,
    pub meta: LogMeta,
}

impl DecodedEvent {
    /// Console form: `Name (type name value, ...)`.
    pub fn render(&self) -> String {
        let parts: Vec<_> = self
            .fields
            .iter()
            .map(|f| format!("{} {} {}", f.ty, f.name, f.value))
            .collect();
        format!("{} ({})", self.name, parts.join(", "))
    }

    /// Get a field value by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}
