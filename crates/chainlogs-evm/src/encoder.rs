//! Log encoder: the inverse of [`EventDecoder`](crate::EventDecoder).
//!
//! Builds the topics and data blob a contract would emit for an event, from
//! alloy `DynSolValue` inputs in declaration order. Used to synthesise logs.
//!
//! # Usage
//! ```ignore
//! let log = EventEncoder::new().encode(&abi, &[
//!     DynSolValue::Address(from),
//!     DynSolValue::Address(to),
//!     DynSolValue::Uint(U256::from(1_000u64), 256),
//! ])?;
//! ```

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::keccak256;
use chainlogs_core::{
    abi::EventAbi,
    error::DecodeError,
    event::{LogMeta, RawLog},
};

use crate::decoder::EventDecoder;

/// Stateless log encoder.
#[derive(Debug, Default, Clone)]
pub struct EventEncoder;

impl EventEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode `values` as a log of `abi`.
    ///
    /// Indexed reference types are replaced by a keccak256 hash, as emitted by
    /// Solidity: raw contents for `string`/`bytes`, the in-place encoding of
    /// the members for arrays and tuples.
    pub fn encode(&self, abi: &EventAbi, values: &[DynSolValue]) -> Result<RawLog, DecodeError> {
        if values.len() != abi.inputs.len() {
            return Err(DecodeError::ValueCountMismatch {
                expected: abi.inputs.len(),
                actual: values.len(),
            });
        }

        let mut topics = Vec::with_capacity(abi.indexed_count() + 1);
        if !abi.anonymous {
            topics.push(abi.topic_hash()?);
        }
        let mut data_values = Vec::new();

        for (param, value) in abi.inputs.iter().zip(values) {
            let ty = param.param_type()?;
            if !EventDecoder::to_dyn(&ty).matches(value) {
                return Err(DecodeError::ValueTypeMismatch {
                    name: param.name.clone(),
                    expected: ty.to_string(),
                });
            }

            if !param.indexed {
                data_values.push(value.clone());
            } else if ty.is_reference() {
                let hash = keccak256(indexed_preimage(value));
                topics.push(format!("0x{}", hex::encode(hash)));
            } else {
                topics.push(format!("0x{}", hex::encode(value.abi_encode())));
            }
        }

        let data = if data_values.is_empty() {
            Vec::new()
        } else {
            DynSolValue::Tuple(data_values).abi_encode_params()
        };

        Ok(RawLog {
            address: String::new(),
            topics,
            data: format!("0x{}", hex::encode(data)),
            meta: LogMeta::default(),
        })
    }
}

/// Bytes hashed into the topic of an indexed reference value.
fn indexed_preimage(value: &DynSolValue) -> Vec<u8> {
    match value {
        DynSolValue::String(s) => s.as_bytes().to_vec(),
        DynSolValue::Bytes(b) => b.clone(),
        _ => {
            let mut out = Vec::new();
            encode_in_place(value, &mut out);
            out
        }
    }
}

/// Members of arrays and tuples, each padded to whole words, no offsets or
/// length prefixes. Nested arrays and tuples are inlined, not hashed.
fn encode_in_place(value: &DynSolValue, out: &mut Vec<u8>) {
    match value {
        DynSolValue::String(s) => push_padded(s.as_bytes(), out),
        DynSolValue::Bytes(b) => push_padded(b, out),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) | DynSolValue::Tuple(items) => {
            for item in items {
                encode_in_place(item, out);
            }
        }
        other => out.extend_from_slice(&other.abi_encode()),
    }
}

fn push_padded(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(bytes);
    let rem = bytes.len() % 32;
    if rem != 0 {
        out.resize(out.len() + 32 - rem, 0);
    }
}
