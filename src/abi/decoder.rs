//! Head/tail unpacking, the inverse of the encoder
//!
//! Used by `abi unpack`, return-data display in the interactive call loop
//! and the round-trip tests. Offsets and lengths are bounds-checked; a
//! malformed buffer yields `Decode` instead of a panic.

use alloy_primitives::{Address, I256, U256};

use super::error::AbiError;
use super::types::TypeDescriptor;
use super::value::Value;

const WORD: usize = 32;

/// Unpack a parameter list from ABI-encoded bytes (no selector).
pub fn decode_params(types: &[TypeDescriptor], data: &[u8]) -> Result<Vec<Value>, AbiError> {
    decode_tuple(types, data)
}

/// Decode a tuple region: `region` starts at the tuple's first head word.
fn decode_tuple(types: &[TypeDescriptor], region: &[u8]) -> Result<Vec<Value>, AbiError> {
    let mut values = Vec::with_capacity(types.len());
    let mut cursor = 0usize;

    for ty in types {
        if ty.is_dynamic() {
            let offset = read_usize(region, cursor)?;
            if offset > region.len() {
                return Err(AbiError::Decode(format!(
                    "offset {offset} past end of region ({} bytes)",
                    region.len()
                )));
            }
            values.push(decode_dynamic(ty, &region[offset..])?);
            cursor += WORD;
        } else {
            values.push(decode_static(ty, region, cursor)?);
            cursor += ty.head_size();
        }
    }
    Ok(values)
}

/// Decode a static value sitting inline at `offset`.
fn decode_static(ty: &TypeDescriptor, region: &[u8], offset: usize) -> Result<Value, AbiError> {
    match ty {
        TypeDescriptor::Address => {
            let word = read_word(region, offset)?;
            Ok(Value::Address(Address::from_slice(&word[12..])))
        }
        TypeDescriptor::Bool => {
            let word = read_word(region, offset)?;
            Ok(Value::Bool(word.iter().any(|&b| b != 0)))
        }
        TypeDescriptor::Uint(_) => {
            let word = read_word(region, offset)?;
            Ok(Value::Uint(U256::from_be_slice(word)))
        }
        TypeDescriptor::Int(_) => {
            let word = read_word(region, offset)?;
            Ok(Value::Int(I256::from_raw(U256::from_be_slice(word))))
        }
        TypeDescriptor::FixedBytes(n) => {
            let word = read_word(region, offset)?;
            Ok(Value::FixedBytes(word[..*n].to_vec()))
        }
        TypeDescriptor::Array(elem, n) => {
            let mut items = Vec::with_capacity(*n);
            let mut at = offset;
            for _ in 0..*n {
                items.push(decode_static(elem, region, at)?);
                at += elem.head_size();
            }
            Ok(Value::Array(items))
        }
        TypeDescriptor::Tuple(fields) => {
            let mut items = Vec::with_capacity(fields.len());
            let mut at = offset;
            for field in fields {
                items.push(decode_static(field, region, at)?);
                at += field.head_size();
            }
            Ok(Value::Tuple(items))
        }
        _ => Err(AbiError::Decode(format!("{ty} is not a static type"))),
    }
}

/// Decode a dynamic value whose payload starts at the beginning of `data`.
fn decode_dynamic(ty: &TypeDescriptor, data: &[u8]) -> Result<Value, AbiError> {
    match ty {
        TypeDescriptor::Bytes => Ok(Value::Bytes(read_length_prefixed(data)?)),
        TypeDescriptor::String => {
            let bytes = read_length_prefixed(data)?;
            let s = String::from_utf8(bytes)
                .map_err(|e| AbiError::Decode(format!("string is not utf-8: {e}")))?;
            Ok(Value::String(s))
        }
        TypeDescriptor::Slice(elem) => {
            let len = read_usize(data, 0)?;
            if len > data.len() / WORD {
                return Err(AbiError::Decode(format!(
                    "array length {len} exceeds remaining data"
                )));
            }
            let types = vec![(**elem).clone(); len];
            let items = decode_tuple(&types, &data[WORD..])?;
            Ok(Value::Array(items))
        }
        // dynamic fixed arrays and tuples carry their own head/tail region
        TypeDescriptor::Array(elem, n) => {
            let types = vec![(**elem).clone(); *n];
            Ok(Value::Array(decode_tuple(&types, data)?))
        }
        TypeDescriptor::Tuple(fields) => Ok(Value::Tuple(decode_tuple(fields, data)?)),
        _ => Err(AbiError::Decode(format!("{ty} is not a dynamic type"))),
    }
}

fn read_word(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    data.get(offset..offset + WORD)
        .ok_or_else(|| AbiError::Decode(format!("word at {offset} past end ({} bytes)", data.len())))
}

fn read_usize(data: &[u8], offset: usize) -> Result<usize, AbiError> {
    let word = read_word(data, offset)?;
    let n = U256::from_be_slice(word);
    usize::try_from(n).map_err(|_| AbiError::Decode(format!("word at {offset} overflows usize")))
}

fn read_length_prefixed(data: &[u8]) -> Result<Vec<u8>, AbiError> {
    let len = read_usize(data, 0)?;
    data.get(WORD..WORD + len)
        .map(<[u8]>::to_vec)
        .ok_or_else(|| AbiError::Decode(format!("payload of {len} bytes past end")))
}
