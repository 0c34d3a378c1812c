//! Converts alloy-core `DynSolValue` → ChainLogs `FieldValue`.

use alloy_core::dyn_abi::DynSolValue;
use chainlogs_core::types::FieldValue;

/// Convert a decoded `DynSolValue` into a `FieldValue`.
pub fn normalize(val: DynSolValue) -> FieldValue {
    match val {
        DynSolValue::Bool(b) => FieldValue::Bool(b),
        DynSolValue::Int(i, _bits) => FieldValue::Int(i.to_string()),
        DynSolValue::Uint(u, _bits) => FieldValue::Uint(u.to_string()),
        // Only the first `size` bytes of the word are meaningful
        DynSolValue::FixedBytes(word, size) => FieldValue::Bytes(word[..size].to_vec()),
        DynSolValue::Bytes(b) => FieldValue::Bytes(b),
        DynSolValue::String(s) => FieldValue::Str(s),
        DynSolValue::Address(a) => FieldValue::Address(format!("{a:#x}")),
        DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) => {
            FieldValue::List(vals.into_iter().map(normalize).collect())
        }
        DynSolValue::Tuple(vals) => FieldValue::Tuple(vals.into_iter().map(normalize).collect()),
        DynSolValue::Function(f) => FieldValue::Bytes(f.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, I256, U256};

    #[test]
    fn normalize_uint256_max() {
        let v = normalize(DynSolValue::Uint(U256::MAX, 256));
        assert_eq!(
            v,
            FieldValue::Uint(
                "115792089237316195423570985008687907853269984665640564039457584007913129639935".into()
            )
        );
    }

    #[test]
    fn normalize_negative_int() {
        let v = normalize(DynSolValue::Int("-42".parse::<I256>().unwrap(), 24));
        assert_eq!(v, FieldValue::Int("-42".into()));
    }

    #[test]
    fn normalize_address_lowercase() {
        let addr: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".parse().unwrap();
        let v = normalize(DynSolValue::Address(addr));
        assert_eq!(
            v,
            FieldValue::Address("0xd8da6bf26964af9d7eed9e03e53415d37aa96045".into())
        );
    }

    #[test]
    fn normalize_fixed_bytes_truncates_to_size() {
        let mut word = B256::ZERO;
        word[0] = 0xab;
        word[1] = 0xcd;
        let v = normalize(DynSolValue::FixedBytes(word, 2));
        assert_eq!(v, FieldValue::Bytes(vec![0xab, 0xcd]));
    }
}
