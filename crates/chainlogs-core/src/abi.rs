//! Event-interface descriptions as served by the signature registry.

use serde::{Deserialize, Serialize};
use tiny_keccak::{Hasher, Keccak};

use crate::error::DecodeError;
use crate::types::ParamType;

/// One input parameter of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParam {
    pub name: String,
    /// Solidity type tag, e.g. `"uint256"`
    #[serde(rename = "type")]
    pub ty: String,
    /// Encoded into a topic rather than the data blob
    #[serde(default)]
    pub indexed: bool,
    /// Tuple members; empty for every other type
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<EventParam>,
}

impl EventParam {
    /// Parse the type tag into a [`ParamType`].
    pub fn param_type(&self) -> Result<ParamType, DecodeError> {
        ParamType::parse(&self.ty, &self.components)
    }
}

/// The interface of one event kind: its name and ordered inputs.
///
/// Trusted as-is: the indexed flags must match how the log was emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAbi {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<EventParam>,
    /// Anonymous events carry no discriminator topic
    #[serde(default)]
    pub anonymous: bool,
}

impl EventAbi {
    /// Canonical signature, e.g. `Transfer(address,address,uint256)`.
    pub fn signature(&self) -> Result<String, DecodeError> {
        let types = self
            .inputs
            .iter()
            .map(|p| p.param_type().map(|t| t.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}({})", self.name, types.join(",")))
    }

    /// keccak256 of the canonical signature, 0x-prefixed lowercase hex.
    pub fn topic_hash(&self) -> Result<String, DecodeError> {
        let mut hasher = Keccak::v256();
        let mut output = [0u8; 32];
        hasher.update(self.signature()?.as_bytes());
        hasher.finalize(&mut output);
        Ok(format!("0x{}", hex::encode(output)))
    }

    /// Number of inputs carried in topics.
    pub fn indexed_count(&self) -> usize {
        self.inputs.iter().filter(|p| p.indexed).count()
    }
}

/// A single candidate returned by the signature registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub abi: EventAbi,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}
