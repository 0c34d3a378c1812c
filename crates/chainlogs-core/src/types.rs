//! Event parameter type system and decoded field values.
//!
//! The registry describes parameter types as Solidity type strings
//! (`"uint256"`, `"address[]"`, `"tuple"` ...). They are parsed once into the
//! closed [`ParamType`] enum; anything outside it is rejected up front instead
//! of being guessed at during decode.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::abi::EventParam;
use crate::error::DecodeError;

/// Every parameter type ChainLogs knows how to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// 20-byte account address
    Address,
    Bool,
    /// Unsigned integer, width in bits (8..=256, multiple of 8)
    Uint(usize),
    /// Signed integer, width in bits (8..=256, multiple of 8)
    Int(usize),
    /// bytes1 .. bytes32
    FixedBytes(usize),
    /// Variable-length byte string
    Bytes,
    String,
    /// `T[]`
    Array(Box<ParamType>),
    /// `T[N]`
    FixedArray(Box<ParamType>, usize),
    /// Struct, components in declaration order
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Parse a registry type tag. `components` is only consulted for tuples.
    pub fn parse(tag: &str, components: &[EventParam]) -> Result<Self, DecodeError> {
        let tag = tag.trim();
        let unknown = || DecodeError::UnknownType { tag: tag.to_string() };

        if let Some(stripped) = tag.strip_suffix(']') {
            let open = stripped.rfind('[').ok_or_else(unknown)?;
            let inner = Self::parse(&stripped[..open], components)?;
            let size = &stripped[open + 1..];
            return if size.is_empty() {
                Ok(Self::Array(Box::new(inner)))
            } else {
                let len = size.parse::<usize>().map_err(|_| unknown())?;
                if len == 0 {
                    return Err(unknown());
                }
                Ok(Self::FixedArray(Box::new(inner), len))
            };
        }

        match tag {
            "address" => Ok(Self::Address),
            "bool" => Ok(Self::Bool),
            "string" => Ok(Self::String),
            "bytes" => Ok(Self::Bytes),
            "uint" => Ok(Self::Uint(256)),
            "int" => Ok(Self::Int(256)),
            "tuple" => {
                if components.is_empty() {
                    return Err(unknown());
                }
                components
                    .iter()
                    .map(|c| Self::parse(&c.ty, &c.components))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self::Tuple)
            }
            _ => {
                if let Some(bits) = tag.strip_prefix("uint") {
                    parse_int_width(bits).map(Self::Uint).ok_or_else(unknown)
                } else if let Some(bits) = tag.strip_prefix("int") {
                    parse_int_width(bits).map(Self::Int).ok_or_else(unknown)
                } else if let Some(len) = tag.strip_prefix("bytes") {
                    match len.parse::<usize>() {
                        Ok(n) if (1..=32).contains(&n) => Ok(Self::FixedBytes(n)),
                        _ => Err(unknown()),
                    }
                } else {
                    Err(unknown())
                }
            }
        }
    }

    /// Reference types are stored as the keccak256 of their encoding when
    /// indexed, so only the hash can be recovered from the topic.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Self::Bytes | Self::String | Self::Array(_) | Self::FixedArray(..) | Self::Tuple(_)
        )
    }
}

fn parse_int_width(bits: &str) -> Option<usize> {
    let bits = bits.parse::<usize>().ok()?;
    (bits > 0 && bits <= 256 && bits % 8 == 0).then_some(bits)
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Bool => write!(f, "bool"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::Int(bits) => write!(f, "int{bits}"),
            Self::FixedBytes(n) => write!(f, "bytes{n}"),
            Self::Bytes => write!(f, "bytes"),
            Self::String => write!(f, "string"),
            Self::Array(elem) => write!(f, "{elem}[]"),
            Self::FixedArray(elem, len) => write!(f, "{elem}[{len}]"),
            Self::Tuple(items) => {
                let parts: Vec<_> = items.iter().map(|t| t.to_string()).collect();
                write!(f, "({})", parts.join(","))
            }
        }
    }
}

/// A decoded value, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Lowercase, 0x-prefixed
    Address(String),
    Bool(bool),
    /// Decimal string; uint256 does not fit any native integer
    Uint(String),
    /// Decimal string, may carry a leading `-`
    Int(String),
    /// Serialized as 0x-prefixed hex, like the text form
    #[serde(with = "hex_bytes")]
    Bytes(Vec<u8>),
    Str(String),
    /// Indexed reference type: only the keccak256 hash is on-chain
    TopicHash(String),
    List(Vec<FieldValue>),
    Tuple(Vec<FieldValue>),
}

mod hex_bytes {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.strip_prefix("0x").unwrap_or(&s)).map_err(D::Error::custom)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(a) => write!(f, "{a}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Uint(v) | Self::Int(v) => write!(f, "{v}"),
            Self::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Self::Str(s) => write!(f, "{s}"),
            Self::TopicHash(h) => write!(f, "{h}"),
            Self::List(items) => {
                let parts: Vec<_> = items.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Self::Tuple(items) => {
                let parts: Vec<_> = items.iter().map(|x| x.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, ty: &str) -> EventParam {
        EventParam {
            name: name.into(),
            ty: ty.into(),
            indexed: false,
            components: vec![],
        }
    }

    #[test]
    fn parse_elementary_tags() {
        assert_eq!(ParamType::parse("address", &[]).unwrap(), ParamType::Address);
        assert_eq!(ParamType::parse("uint", &[]).unwrap(), ParamType::Uint(256));
        assert_eq!(ParamType::parse("int24", &[]).unwrap(), ParamType::Int(24));
        assert_eq!(ParamType::parse("bytes32", &[]).unwrap(), ParamType::FixedBytes(32));
        assert_eq!(ParamType::parse("bytes", &[]).unwrap(), ParamType::Bytes);
    }

    #[test]
    fn parse_arrays() {
        assert_eq!(
            ParamType::parse("address[]", &[]).unwrap(),
            ParamType::Array(Box::new(ParamType::Address))
        );
        assert_eq!(
            ParamType::parse("uint8[3][]", &[]).unwrap(),
            ParamType::Array(Box::new(ParamType::FixedArray(
                Box::new(ParamType::Uint(8)),
                3
            )))
        );
    }

    #[test]
    fn parse_tuple_uses_components() {
        let comps = vec![param("a", "address"), param("b", "uint128")];
        let ty = ParamType::parse("tuple[]", &comps).unwrap();
        assert_eq!(ty.to_string(), "(address,uint128)[]");
    }

    #[test]
    fn unknown_tags_rejected() {
        for tag in ["uint7", "uint264", "bytes33", "bytes0", "fixed128x18", "tuple", "address[0]", "]"] {
            let err = ParamType::parse(tag, &[]).unwrap_err();
            assert!(matches!(err, DecodeError::UnknownType { .. }), "{tag}");
        }
    }

    #[test]
    fn reference_types() {
        assert!(ParamType::String.is_reference());
        assert!(ParamType::Array(Box::new(ParamType::Bool)).is_reference());
        assert!(!ParamType::FixedBytes(32).is_reference());
        assert!(!ParamType::Uint(256).is_reference());
    }

    #[test]
    fn bytes_serialize_as_hex() {
        let value = FieldValue::Bytes(vec![0xca, 0xfe]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "bytes", "value": "0xcafe" }));
        assert_eq!(json["value"], value.to_string());

        let back: FieldValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn field_value_display() {
        assert_eq!(FieldValue::Bytes(vec![0xde, 0xad]).to_string(), "0xdead");
        assert_eq!(
            FieldValue::List(vec![FieldValue::Bool(true), FieldValue::Uint("7".into())]).to_string(),
            "[true, 7]"
        );
    }
}
