//! `EventDecoder`: splits a raw log into typed, named fields.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use chainlogs_core::{
    abi::{EventAbi, EventParam},
    error::DecodeError,
    event::{DecodedEvent, DecodedField, RawLog},
    types::{FieldValue, ParamType},
};

use crate::normalizer;

/// Stateless log decoder.
#[derive(Debug, Default, Clone)]
pub struct EventDecoder;

impl EventDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Build the alloy `DynSolType` for a ChainLogs `ParamType`.
    pub(crate) fn to_dyn(ty: &ParamType) -> DynSolType {
        match ty {
            ParamType::Address => DynSolType::Address,
            ParamType::Bool => DynSolType::Bool,
            ParamType::Uint(bits) => DynSolType::Uint(*bits),
            ParamType::Int(bits) => DynSolType::Int(*bits),
            ParamType::FixedBytes(n) => DynSolType::FixedBytes(*n),
            ParamType::Bytes => DynSolType::Bytes,
            ParamType::String => DynSolType::String,
            ParamType::Array(elem) => DynSolType::Array(Box::new(Self::to_dyn(elem))),
            ParamType::FixedArray(elem, len) => {
                DynSolType::FixedArray(Box::new(Self::to_dyn(elem)), *len)
            }
            ParamType::Tuple(items) => DynSolType::Tuple(items.iter().map(Self::to_dyn).collect()),
        }
    }

    /// Decode `log` according to `abi`, one field per input in declaration order.
    ///
    /// Fails when the log's topics or data do not fit the description.
    pub fn decode(&self, log: &RawLog, abi: &EventAbi) -> Result<DecodedEvent, DecodeError> {
        let params: Vec<(&EventParam, ParamType)> = abi
            .inputs
            .iter()
            .map(|p| p.param_type().map(|t| (p, t)))
            .collect::<Result<_, _>>()?;

        // topics[0] is the discriminator unless the event is anonymous
        let first_indexed = if abi.anonymous {
            0
        } else {
            if log.topics.is_empty() {
                return Err(DecodeError::MissingDiscriminator);
            }
            1
        };
        let expected = abi.indexed_count();
        let actual = log.topics.len() - first_indexed;
        if actual != expected {
            return Err(DecodeError::TopicCountMismatch {
                event: abi.name.clone(),
                expected,
                actual,
            });
        }

        let data_types: Vec<DynSolType> = params
            .iter()
            .filter(|(p, _)| !p.indexed)
            .map(|(_, t)| Self::to_dyn(t))
            .collect();
        let mut data_values = self.decode_data(log, data_types)?.into_iter();

        let mut topic_idx = first_indexed;
        let mut fields = Vec::with_capacity(params.len());
        for (param, ty) in &params {
            let value = if param.indexed {
                let value = self.decode_topic(log, topic_idx, ty)?;
                topic_idx += 1;
                value
            } else {
                data_values
                    .next()
                    .map(normalizer::normalize)
                    .ok_or_else(|| DecodeError::AbiDecodeFailed {
                        reason: format!("data exhausted before '{}'", param.name),
                    })?
            };
            fields.push(DecodedField {
                name: param.name.clone(),
                ty: param.ty.clone(),
                value,
            });
        }

        Ok(DecodedEvent {
            name: abi.name.clone(),
            fields,
            meta: log.meta.clone(),
        })
    }

    /// Decode the data blob as an ABI parameter sequence.
    fn decode_data(
        &self,
        log: &RawLog,
        types: Vec<DynSolType>,
    ) -> Result<Vec<DynSolValue>, DecodeError> {
        if types.is_empty() {
            return Ok(Vec::new());
        }
        let raw = log.data_bytes()?;
        let decoded = DynSolType::Tuple(types)
            .abi_decode_params(&raw)
            .map_err(|e| DecodeError::AbiDecodeFailed {
                reason: format!("data: {e}"),
            })?;
        match decoded {
            DynSolValue::Tuple(vals) => Ok(vals),
            other => Ok(vec![other]),
        }
    }

    /// Decode one indexed parameter from its topic word.
    ///
    /// Reference types (string, bytes, arrays, tuples) are stored as the
    /// keccak256 of their encoding; the value itself is unrecoverable.
    fn decode_topic(
        &self,
        log: &RawLog,
        index: usize,
        ty: &ParamType,
    ) -> Result<FieldValue, DecodeError> {
        let bytes = log
            .topic_bytes(index)?
            .ok_or_else(|| DecodeError::AbiDecodeFailed {
                reason: format!("missing topics[{index}]"),
            })?;
        if bytes.len() != 32 {
            return Err(DecodeError::AbiDecodeFailed {
                reason: format!("topics[{index}] is {} bytes, expected 32", bytes.len()),
            });
        }

        if ty.is_reference() {
            return Ok(FieldValue::TopicHash(format!("0x{}", hex::encode(&bytes))));
        }

        Self::to_dyn(ty)
            .abi_decode(&bytes)
            .map(normalizer::normalize)
            .map_err(|e| DecodeError::AbiDecodeFailed {
                reason: format!("topics[{index}]: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer_abi() -> EventAbi {
        serde_json::from_str(
            r#"{
                "name": "Transfer",
                "inputs": [
                    { "indexed": true,  "name": "_from",  "type": "address" },
                    { "indexed": true,  "name": "_to",    "type": "address" },
                    { "indexed": false, "name": "_value", "type": "uint256" }
                ]
            }"#,
        )
        .unwrap()
    }

    fn transfer_log() -> RawLog {
        RawLog {
            address: "0x0000000000000000000000000000456e65726779".into(),
            topics: vec![
                "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef".into(),
                "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045".into(),
                "0x000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b".into(),
            ],
            data: "0x0000000000000000000000000000000000000000000000000000000002faf080".into(),
            meta: Default::default(),
        }
    }

    #[test]
    fn decodes_erc20_transfer() {
        let ev = EventDecoder::new().decode(&transfer_log(), &transfer_abi()).unwrap();
        assert_eq!(
            ev.render(),
            "Transfer (address _from 0xd8da6bf26964af9d7eed9e03e53415d37aa96045, \
             address _to 0xab5801a7d398351b8be11c439e05c5b3259aec9b, uint256 _value 50000000)"
        );
    }

    #[test]
    fn missing_indexed_topic_is_malformed() {
        let mut log = transfer_log();
        log.topics.pop();
        let err = EventDecoder::new().decode(&log, &transfer_abi()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TopicCountMismatch { expected: 2, actual: 1, .. }
        ));
        assert!(err.is_malformed_log());
    }

    #[test]
    fn extra_topic_is_malformed() {
        let mut log = transfer_log();
        log.topics.push(format!("0x{}", "00".repeat(32)));
        let err = EventDecoder::new().decode(&log, &transfer_abi()).unwrap_err();
        assert!(matches!(err, DecodeError::TopicCountMismatch { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn short_data_is_malformed() {
        let mut log = transfer_log();
        log.data = "0x0000".into();
        let err = EventDecoder::new().decode(&log, &transfer_abi()).unwrap_err();
        assert!(matches!(err, DecodeError::AbiDecodeFailed { .. }));
    }

    #[test]
    fn no_topics_at_all() {
        let mut log = transfer_log();
        log.topics.clear();
        let err = EventDecoder::new().decode(&log, &transfer_abi()).unwrap_err();
        assert!(matches!(err, DecodeError::MissingDiscriminator));
    }

    #[test]
    fn unknown_type_rejected() {
        let mut abi = transfer_abi();
        abi.inputs[2].ty = "fixed128x18".into();
        let err = EventDecoder::new().decode(&transfer_log(), &abi).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownType { .. }));
    }

    #[test]
    fn anonymous_event_uses_every_topic() {
        let mut abi = transfer_abi();
        abi.anonymous = true;
        let mut log = transfer_log();
        log.topics.remove(0);
        let ev = EventDecoder::new().decode(&log, &abi).unwrap();
        assert_eq!(
            ev.field("_to"),
            Some(&FieldValue::Address("0xab5801a7d398351b8be11c439e05c5b3259aec9b".into()))
        );
    }
}
