//! Literal-to-value conversion driven by type descriptors

use alloy_primitives::{Address, I256, Sign, U256};

use super::error::AbiError;
use super::lexer;
use super::num;
use super::types::TypeDescriptor;
use crate::address;

/// A converted argument, mirroring the shape of its `TypeDescriptor`.
///
/// Lives only for the duration of one encode call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Address(Address),
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),
    /// Exactly as wide as the `FixedBytes(N)` descriptor it was built for.
    FixedBytes(Vec<u8>),
    Uint(U256),
    Int(I256),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
}

/// Convert a raw literal into the typed value for `ty`.
///
/// Array literals prefer the bracketed form `[a,b,c]`; a literal that is
/// not a well-formed bracket list falls back to a bare top-level comma
/// split for CLI convenience. Use brackets when elements are themselves
/// lists, the fallback cannot tell one bracketed element from the outer
/// array.
pub fn convert(ty: &TypeDescriptor, literal: &str) -> Result<Value, AbiError> {
    let s = literal.trim();

    match ty {
        TypeDescriptor::Address => convert_address(s),

        TypeDescriptor::Bool => match s.to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Ok(Value::Bool(true)),
            "false" | "f" | "0" => Ok(Value::Bool(false)),
            _ => Err(AbiError::InvalidBool(literal.to_string())),
        },

        TypeDescriptor::String => Ok(Value::String(trim_optional_quotes(s).to_string())),

        TypeDescriptor::Bytes => Ok(Value::Bytes(bytes_literal(s)?)),

        TypeDescriptor::FixedBytes(n) => {
            let bytes = bytes_literal(s)?;
            if bytes.len() != *n {
                return Err(AbiError::SizeMismatch {
                    expected: *n,
                    got: bytes.len(),
                    literal: literal.to_string(),
                });
            }
            Ok(Value::FixedBytes(bytes))
        }

        TypeDescriptor::Uint(_) => {
            let parsed = num::parse_integer(s, true)?;
            Ok(Value::Uint(parsed.magnitude))
        }

        TypeDescriptor::Int(_) => {
            let parsed = num::parse_integer(s, false)?;
            let sign = if parsed.negative {
                Sign::Negative
            } else {
                Sign::Positive
            };
            let value = I256::checked_from_sign_and_abs(sign, parsed.magnitude)
                .ok_or_else(|| AbiError::IntegerOverflow(literal.to_string()))?;
            Ok(Value::Int(value))
        }

        TypeDescriptor::Slice(elem) => {
            let items = list_items(s)?;
            let values = convert_elements(elem, &items)?;
            Ok(Value::Array(values))
        }

        TypeDescriptor::Array(elem, n) => {
            let items = list_items(s)?;
            if items.len() != *n {
                return Err(AbiError::ArityMismatch {
                    what: "fixed array",
                    expected: *n,
                    got: items.len(),
                });
            }
            let values = convert_elements(elem, &items)?;
            Ok(Value::Array(values))
        }

        TypeDescriptor::Tuple(fields) => {
            let items = lexer::paren_list(s).map_err(|_| {
                AbiError::MalformedInput(format!("tuple literal must be '(...)': {literal:?}"))
            })?;
            if items.len() != fields.len() {
                return Err(AbiError::ArityMismatch {
                    what: "tuple",
                    expected: fields.len(),
                    got: items.len(),
                });
            }
            let values = fields
                .iter()
                .zip(items.iter())
                .enumerate()
                .map(|(i, (field, item))| convert(field, item).map_err(|e| e.for_field(i)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Tuple(values))
        }
    }
}

fn convert_address(s: &str) -> Result<Value, AbiError> {
    // TRON base58check form first, then plain 20-byte hex
    if s.len() == 34 && s.starts_with('T') {
        return address::decode_base58(s)
            .map(Value::Address)
            .ok_or_else(|| AbiError::InvalidAddress(s.to_string()));
    }
    let hex_part = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AbiError::InvalidAddress(s.to_string()));
    }
    let bytes = hex::decode(hex_part).map_err(|_| AbiError::InvalidAddress(s.to_string()))?;
    Ok(Value::Address(Address::from_slice(&bytes)))
}

fn convert_elements(elem: &TypeDescriptor, items: &[String]) -> Result<Vec<Value>, AbiError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| convert(elem, item).map_err(|e| e.for_element(i)))
        .collect()
}

fn list_items(s: &str) -> Result<Vec<String>, AbiError> {
    match lexer::bracket_list(s) {
        Ok(items) => Ok(items),
        // bare comma-list fallback
        Err(_) => lexer::split_top_level(s),
    }
}

fn bytes_literal(s: &str) -> Result<Vec<u8>, AbiError> {
    if let Some(hex_part) = s.strip_prefix("0x") {
        return hex::decode(hex_part).map_err(|_| AbiError::InvalidHex(s.to_string()));
    }
    Ok(trim_optional_quotes(s).as_bytes().to_vec())
}

/// Strip one layer of matching quotes, if present.
pub fn trim_optional_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2 {
        let bytes = s.as_bytes();
        let first = bytes[0];
        let last = bytes[s.len() - 1];
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(s: &str) -> TypeDescriptor {
        TypeDescriptor::parse(s).unwrap()
    }

    #[test]
    fn test_convert_address() {
        let v = convert(&ty("address"), "0x1111111111111111111111111111111111111111").unwrap();
        assert_eq!(v, Value::Address(Address::from([0x11; 20])));
        // prefixless and mixed case also accepted
        assert!(convert(&ty("address"), "1111111111111111111111111111111111111111").is_ok());
        assert!(convert(&ty("address"), "0xAbCd111111111111111111111111111111111111").is_ok());

        assert!(matches!(
            convert(&ty("address"), "0x1234"),
            Err(AbiError::InvalidAddress(_))
        ));
        assert!(matches!(
            convert(&ty("address"), "hello"),
            Err(AbiError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_convert_tron_address() {
        // base58check of 0x41 ++ zero address
        let zero = Address::ZERO;
        let encoded = crate::address::encode_base58(&zero);
        assert_eq!(convert(&ty("address"), &encoded).unwrap(), Value::Address(zero));
    }

    #[test]
    fn test_convert_bool() {
        assert_eq!(convert(&ty("bool"), "true").unwrap(), Value::Bool(true));
        assert_eq!(convert(&ty("bool"), "FALSE").unwrap(), Value::Bool(false));
        assert_eq!(convert(&ty("bool"), "1").unwrap(), Value::Bool(true));
        assert!(matches!(
            convert(&ty("bool"), "yes"),
            Err(AbiError::InvalidBool(_))
        ));
    }

    #[test]
    fn test_convert_string_strips_quotes() {
        assert_eq!(
            convert(&ty("string"), "\"hello\"").unwrap(),
            Value::String("hello".to_string())
        );
        assert_eq!(
            convert(&ty("string"), "world").unwrap(),
            Value::String("world".to_string())
        );
    }

    #[test]
    fn test_convert_bytes() {
        assert_eq!(
            convert(&ty("bytes"), "0xdeadbeef").unwrap(),
            Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef])
        );
        // non-hex literals are raw text bytes
        assert_eq!(
            convert(&ty("bytes"), "abc").unwrap(),
            Value::Bytes(b"abc".to_vec())
        );
        assert!(matches!(
            convert(&ty("bytes"), "0xzz"),
            Err(AbiError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_convert_fixed_bytes() {
        assert_eq!(
            convert(&ty("bytes4"), "0xdeadbeef").unwrap(),
            Value::FixedBytes(vec![0xde, 0xad, 0xbe, 0xef])
        );
        assert_eq!(
            convert(&ty("bytes3"), "abc").unwrap(),
            Value::FixedBytes(b"abc".to_vec())
        );
        assert!(matches!(
            convert(&ty("bytes4"), "0xdead"),
            Err(AbiError::SizeMismatch { expected: 4, got: 2, .. })
        ));
    }

    #[test]
    fn test_convert_integers() {
        assert_eq!(
            convert(&ty("uint256"), "1e18").unwrap(),
            Value::Uint(U256::from(10u64).pow(U256::from(18u8)))
        );
        assert_eq!(
            convert(&ty("int256"), "-5").unwrap(),
            Value::Int(I256::unchecked_from(-5))
        );
        assert!(matches!(
            convert(&ty("uint8"), "-1"),
            Err(AbiError::NegativeUnsigned(_))
        ));
        // no per-width range check: uint8 accepts 1000
        assert_eq!(
            convert(&ty("uint8"), "1000").unwrap(),
            Value::Uint(U256::from(1000u64))
        );
    }

    #[test]
    fn test_convert_array_bracketed() {
        let v = convert(&ty("uint256[]"), "[1,2,3]").unwrap();
        assert_eq!(
            v,
            Value::Array(vec![
                Value::Uint(U256::from(1u64)),
                Value::Uint(U256::from(2u64)),
                Value::Uint(U256::from(3u64)),
            ])
        );
        assert_eq!(convert(&ty("uint256[]"), "[]").unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn test_convert_array_bare_fallback() {
        let v = convert(&ty("uint256[]"), "1,2,3").unwrap();
        assert_eq!(
            v,
            Value::Array(vec![
                Value::Uint(U256::from(1u64)),
                Value::Uint(U256::from(2u64)),
                Value::Uint(U256::from(3u64)),
            ])
        );
    }

    #[test]
    fn test_convert_fixed_array_arity() {
        assert!(convert(&ty("uint256[2]"), "[1,2]").is_ok());
        assert!(matches!(
            convert(&ty("uint256[2]"), "[1,2,3]"),
            Err(AbiError::ArityMismatch { expected: 2, got: 3, .. })
        ));
    }

    #[test]
    fn test_convert_tuple() {
        let v = convert(
            &ty("(address,uint256)"),
            "(0x1111111111111111111111111111111111111111,7)",
        )
        .unwrap();
        assert_eq!(
            v,
            Value::Tuple(vec![
                Value::Address(Address::from([0x11; 20])),
                Value::Uint(U256::from(7u64)),
            ])
        );

        assert!(matches!(
            convert(&ty("(address,uint256)"), "0x11,7"),
            Err(AbiError::MalformedInput(_))
        ));
        assert!(matches!(
            convert(&ty("(address,uint256)"), "(0x1111111111111111111111111111111111111111)"),
            Err(AbiError::ArityMismatch { .. })
        ));
    }

    #[test]
    fn test_convert_nested_composite() {
        let v = convert(
            &ty("(address,uint256)[]"),
            "[(0x1111111111111111111111111111111111111111,1),(0x2222222222222222222222222222222222222222,2)]",
        )
        .unwrap();
        match v {
            Value::Array(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(items[0], Value::Tuple(_)));
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_element_errors_carry_index() {
        let err = convert(&ty("uint256[]"), "[1,notanumber]").unwrap_err();
        assert!(matches!(err, AbiError::Element { index: 1, .. }));
    }
}
