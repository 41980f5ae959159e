//! Call-data assembly: selector hashing and head/tail packing
//!
//! Static values sit inline in 32-byte slots; dynamic values contribute an
//! offset word to the head and their payload to the tail, both in
//! declaration order. Nested dynamic composites recurse with their own
//! head/tail region.

use alloy_primitives::{keccak256, U256};

use super::error::AbiError;
use super::signature::FunctionSignature;
use super::types::TypeDescriptor;
use super::value::{self, Value};

const WORD: usize = 32;

/// Build full call data for `eth_call`-style invocations.
///
/// `input` is either `"transfer(address,uint256)"` or a full Solidity
/// declaration; `args` are the raw literals, one per parameter. The result
/// is `0x`-prefixed lowercase hex: selector followed by the packed
/// arguments.
pub fn encode_call_data(input: &str, args: &[String]) -> Result<String, AbiError> {
    let sig = FunctionSignature::parse(input)?;
    if sig.params.len() != args.len() {
        return Err(AbiError::ArityMismatch {
            what: "argument list",
            expected: sig.params.len(),
            got: args.len(),
        });
    }

    let values = sig
        .params
        .iter()
        .zip(args.iter())
        .enumerate()
        .map(|(i, (ty, arg))| {
            value::convert(ty, arg).map_err(|e| AbiError::Argument {
                index: i,
                ty: ty.canonical(),
                source: Box::new(e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut data = selector_bytes(&sig).to_vec();
    data.extend_from_slice(&encode_params(&sig.params, &values)?);
    Ok(format!("0x{}", hex::encode(data)))
}

/// 4-byte selector for the given signature or declaration, `0x`-prefixed.
pub fn selector(input: &str) -> Result<String, AbiError> {
    let sig = FunctionSignature::parse(input)?;
    Ok(format!("0x{}", hex::encode(selector_bytes(&sig))))
}

/// First four bytes of keccak-256 over the canonical signature.
pub fn selector_bytes(sig: &FunctionSignature) -> [u8; 4] {
    let hash = keccak256(sig.canonical().as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Pack a parameter list (no selector), i.e. tuple encoding of the values.
pub fn encode_params(types: &[TypeDescriptor], values: &[Value]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::PackingFailure(format!(
            "{} types vs {} values",
            types.len(),
            values.len()
        )));
    }
    encode_tuple(types, values)
}

fn encode_tuple(types: &[TypeDescriptor], values: &[Value]) -> Result<Vec<u8>, AbiError> {
    let head_size: usize = types.iter().map(TypeDescriptor::head_size).sum();
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (ty, val) in types.iter().zip(values.iter()) {
        if ty.is_dynamic() {
            head.extend_from_slice(&uint_word(head_size + tail.len()));
            tail.extend_from_slice(&encode_value(ty, val)?);
        } else {
            head.extend_from_slice(&encode_value(ty, val)?);
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

fn encode_value(ty: &TypeDescriptor, val: &Value) -> Result<Vec<u8>, AbiError> {
    match (ty, val) {
        (TypeDescriptor::Address, Value::Address(addr)) => {
            let mut word = [0u8; WORD];
            word[12..].copy_from_slice(addr.as_slice());
            Ok(word.to_vec())
        }

        (TypeDescriptor::Bool, Value::Bool(b)) => {
            let mut word = [0u8; WORD];
            word[31] = u8::from(*b);
            Ok(word.to_vec())
        }

        (TypeDescriptor::Uint(_), Value::Uint(n)) => Ok(n.to_be_bytes::<WORD>().to_vec()),

        (TypeDescriptor::Int(_), Value::Int(n)) => Ok(n.to_be_bytes::<WORD>().to_vec()),

        (TypeDescriptor::FixedBytes(n), Value::FixedBytes(bytes)) => {
            if bytes.len() != *n {
                return Err(AbiError::PackingFailure(format!(
                    "bytes{n} value holds {} bytes",
                    bytes.len()
                )));
            }
            let mut word = [0u8; WORD];
            word[..bytes.len()].copy_from_slice(bytes);
            Ok(word.to_vec())
        }

        (TypeDescriptor::Bytes, Value::Bytes(bytes)) => Ok(length_prefixed(bytes)),

        (TypeDescriptor::String, Value::String(s)) => Ok(length_prefixed(s.as_bytes())),

        (TypeDescriptor::Slice(elem), Value::Array(items)) => {
            let mut out = uint_word(items.len()).to_vec();
            let types = vec![(**elem).clone(); items.len()];
            out.extend_from_slice(&encode_tuple(&types, items)?);
            Ok(out)
        }

        (TypeDescriptor::Array(elem, n), Value::Array(items)) => {
            if items.len() != *n {
                return Err(AbiError::PackingFailure(format!(
                    "fixed array of {n} holds {} items",
                    items.len()
                )));
            }
            let types = vec![(**elem).clone(); items.len()];
            encode_tuple(&types, items)
        }

        (TypeDescriptor::Tuple(fields), Value::Tuple(items)) => {
            if items.len() != fields.len() {
                return Err(AbiError::PackingFailure(format!(
                    "tuple of {} holds {} fields",
                    fields.len(),
                    items.len()
                )));
            }
            encode_tuple(fields, items)
        }

        (ty, val) => Err(AbiError::PackingFailure(format!(
            "value {val:?} does not match type {ty}"
        ))),
    }
}

fn length_prefixed(bytes: &[u8]) -> Vec<u8> {
    let padded = bytes.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&uint_word(bytes.len()));
    out.extend_from_slice(bytes);
    out.resize(WORD + padded, 0);
    out
}

fn uint_word(n: usize) -> [u8; WORD] {
    U256::from(n).to_be_bytes::<WORD>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn test_selector_transfer() {
        assert_eq!(selector("transfer(address,uint256)").unwrap(), "0xa9059cbb");
        assert_eq!(selector("balanceOf(address)").unwrap(), "0x70a08231");
        assert_eq!(selector("approve(address,uint256)").unwrap(), "0x095ea7b3");
        assert_eq!(selector("totalSupply()").unwrap(), "0x18160ddd");
    }

    #[test]
    fn test_selector_from_declaration() {
        assert_eq!(
            selector("function transfer(address to, uint256 amount) external returns (bool)")
                .unwrap(),
            "0xa9059cbb"
        );
    }

    #[test]
    fn test_encode_transfer() {
        let data = encode_call_data(
            "transfer(address,uint256)",
            &[
                "0x1111111111111111111111111111111111111111".to_string(),
                "1e18".to_string(),
            ],
        )
        .unwrap();
        assert_eq!(
            data,
            "0xa9059cbb\
             0000000000000000000000001111111111111111111111111111111111111111\
             0000000000000000000000000000000000000000000000000de0b6b3a7640000"
        );
    }

    #[test]
    fn test_encode_no_args_is_selector_only() {
        let data = encode_call_data("totalSupply()", &[]).unwrap();
        assert_eq!(data, "0x18160ddd");
    }

    #[test]
    fn test_encode_declaration_equivalence() {
        let args = vec![
            "0x1111111111111111111111111111111111111111".to_string(),
            "1000000000000000000".to_string(),
        ];
        let bare = encode_call_data("transfer(address,uint256)", &args).unwrap();
        let decl = encode_call_data(
            "function transfer(address to, uint256 amount) external returns (bool)",
            &args,
        )
        .unwrap();
        assert_eq!(bare, decl);
    }

    #[test]
    fn test_encode_arity_mismatch() {
        let err = encode_call_data(
            "transfer(address,uint256)",
            &["0x1111111111111111111111111111111111111111".to_string()],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AbiError::ArityMismatch { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn test_encode_bad_address_names_argument() {
        let err = encode_call_data(
            "transfer(address,uint256)",
            &["0xabc".to_string(), "1".to_string()],
        )
        .unwrap_err();
        match err {
            AbiError::Argument { index, ty, source } => {
                assert_eq!(index, 0);
                assert_eq!(ty, "address");
                assert!(matches!(*source, AbiError::InvalidAddress(_)));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_encode_dynamic_string_layout() {
        // f(uint256,string,uint256) with (42,"test",100):
        // head 3 words (value, offset, value), tail len+payload
        let data = encode_call_data(
            "f(uint256,string,uint256)",
            &["42".to_string(), "test".to_string(), "100".to_string()],
        )
        .unwrap();
        let bytes = hex::decode(&data[2..]).unwrap();
        let body = &bytes[4..];
        assert_eq!(body.len(), 160);
        assert_eq!(body[31], 42);
        assert_eq!(body[63], 96); // offset to tail
        assert_eq!(body[95], 100);
        assert_eq!(body[127], 4); // string length
        assert_eq!(&body[128..132], b"test");
    }

    #[test]
    fn test_encode_tuple_array_layout() {
        let data = encode_call_data(
            "f((address,uint256)[])",
            &["[(0x1111111111111111111111111111111111111111,1),(0x2222222222222222222222222222222222222222,2)]"
                .to_string()],
        )
        .unwrap();
        let bytes = hex::decode(&data[2..]).unwrap();
        let body = &bytes[4..];
        // offset word + length word + 2 * (address word + uint word)
        assert_eq!(body.len(), 192);
        assert_eq!(U256::from_be_slice(&body[..32]), U256::from(32u64));
        assert_eq!(U256::from_be_slice(&body[32..64]), U256::from(2u64));
        assert_eq!(&body[76..96], &[0x11; 20]);
        assert_eq!(U256::from_be_slice(&body[96..128]), U256::from(1u64));
        assert_eq!(&body[140..160], &[0x22; 20]);
        assert_eq!(U256::from_be_slice(&body[160..192]), U256::from(2u64));
    }

    #[test]
    fn test_encode_nested_dynamic_array() {
        // g(uint256[][]) with [[1],[2,3]]
        let data = encode_call_data("g(uint256[][])", &["[[1],[2,3]]".to_string()]).unwrap();
        let bytes = hex::decode(&data[2..]).unwrap();
        let body = &bytes[4..];
        // outer offset, outer len, two inner offsets, inner arrays
        assert_eq!(U256::from_be_slice(&body[..32]), U256::from(32u64));
        assert_eq!(U256::from_be_slice(&body[32..64]), U256::from(2u64));
        // inner offsets are relative to the start of the element area
        assert_eq!(U256::from_be_slice(&body[64..96]), U256::from(64u64));
        assert_eq!(U256::from_be_slice(&body[96..128]), U256::from(128u64));
        // first inner array: len 1, value 1
        assert_eq!(U256::from_be_slice(&body[128..160]), U256::from(1u64));
        assert_eq!(U256::from_be_slice(&body[160..192]), U256::from(1u64));
        // second inner array: len 2, values 2 and 3
        assert_eq!(U256::from_be_slice(&body[192..224]), U256::from(2u64));
        assert_eq!(U256::from_be_slice(&body[224..256]), U256::from(2u64));
        assert_eq!(U256::from_be_slice(&body[256..288]), U256::from(3u64));
    }

    #[test]
    fn test_encode_negative_int() {
        let data = encode_call_data("f(int256)", &["-1".to_string()]).unwrap();
        let bytes = hex::decode(&data[2..]).unwrap();
        assert_eq!(&bytes[4..], &[0xff; 32]);
    }
}
