//! ABI command group: encode, selector, unpack, split, pad

use alloy_primitives::U256;
use anyhow::{bail, Result};

use super::{from_hex_input, group_digits, Report};
use crate::abi::{self, TypeDescriptor, Value};
use crate::address;
use crate::client::sigdb::SigDb;

/// `abi encode <signature-or-definition> [args...]`
pub fn encode(signature: &str, args: &[String]) -> Result<()> {
    let calldata = abi::encode_call_data(signature, args)?;
    println!("{calldata}");
    Ok(())
}

/// `abi selector <signature-or-definition>`
pub fn selector(signature: &str) -> Result<()> {
    let sig = abi::FunctionSignature::parse(signature)?;
    let selector = abi::selector_bytes(&sig);
    let mut padded = selector.to_vec();
    padded.resize(32, 0);
    Report::new()
        .add("abi valid", sig.canonical())
        .add("origin hex", format!("0x{}", hex::encode(selector)))
        .add("padded hex", format!("0x{}", hex::encode(padded)))
        .print();
    Ok(())
}

/// `abi unpack <types> <data>`
pub fn unpack(type_list: &str, data: &str) -> Result<()> {
    let types = parse_type_list(type_list)?;
    let bytes = decode_hex_arg(data)?;
    let values = abi::decode_params(&types, &bytes)?;
    println!("[unpack result]:");
    for (i, (ty, value)) in types.iter().zip(values.iter()).enumerate() {
        print_value(ty, value, "arg", i, 1);
    }
    Ok(())
}

/// `abi split <data>` — dump calldata as 32-byte words, resolving a
/// leading selector when one is present.
pub async fn split(data: &str) -> Result<()> {
    let mut bytes = decode_hex_arg(data)?;
    if bytes.len() % 32 == 4 {
        let selector: [u8; 4] = bytes[..4].try_into().unwrap();
        let mut sigdb = SigDb::new()?;
        match sigdb.lookup(selector).await {
            Some(method) => println!("[selector]: {} - {method}", hex::encode(selector)),
            None => println!("[selector]: {}", hex::encode(selector)),
        }
        bytes.drain(..4);
    }
    if bytes.len() % 32 != 0 {
        bail!("data must be a multiple of 32 bytes (plus an optional selector)");
    }
    println!("[each data word]:");
    let wide = bytes.len() > 8 * 32;
    for (i, word) in bytes.chunks(32).enumerate() {
        if wide {
            println!("0x{:03x}: {}", i * 32, hex::encode(word));
        } else {
            println!("0x{:02x}: {}", i * 32, hex::encode(word));
        }
    }
    Ok(())
}

/// `abi pad <num-or-hex>` — pad to a 32-byte multiple, both ends for hex
/// input, left only for decimal.
pub fn pad(input: &str) -> Result<()> {
    if let Some(bytes) = from_hex_input(input) {
        let width = (bytes.len() / 32 + 1) * 32;
        let mut left = vec![0u8; width - bytes.len()];
        left.extend_from_slice(&bytes);
        let mut right = bytes.clone();
        right.resize(width, 0);
        Report::new()
            .add("32bytes in BE", format!("0x{}", hex::encode(left)))
            .add("32bytes in LE", format!("0x{}", hex::encode(right)))
            .print();
        return Ok(());
    }
    match U256::from_str_radix(input, 10) {
        Ok(n) => {
            let word = n.to_be_bytes::<32>();
            let trimmed = trim_leading_zeros(&word);
            Report::new()
                .add("origin hex", format!("0x{}", hex::encode(trimmed)))
                .add("padded hex", format!("0x{}", hex::encode(word)))
                .print();
            Ok(())
        }
        Err(_) => bail!("input {input:?} is neither 0x-hex nor decimal"),
    }
}

fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Split a comma-separated type list with nesting awareness, so tuple
/// types survive.
pub fn parse_type_list(list: &str) -> Result<Vec<TypeDescriptor>> {
    let items = abi::lexer::split_top_level(list)?;
    if items.is_empty() {
        bail!("empty type list");
    }
    let types = items
        .iter()
        .map(|item| TypeDescriptor::parse(item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(types)
}

pub(crate) fn decode_hex_arg(data: &str) -> Result<Vec<u8>> {
    let rest = data
        .strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data);
    Ok(hex::decode(rest)?)
}

/// Nested display of a decoded value, one line per leaf:
///
/// ```text
///   - [arg-00]: address, 0x... - T...
/// ```
pub fn print_value(ty: &TypeDescriptor, value: &Value, name: &str, index: usize, depth: usize) {
    print!("{}- ", "  ".repeat(depth));
    match (ty, value) {
        (TypeDescriptor::Slice(elem), Value::Array(items))
        | (TypeDescriptor::Array(elem, _), Value::Array(items)) => {
            println!("[{name}-{index:02}]: {ty}");
            for (i, item) in items.iter().enumerate() {
                print_value(elem, item, "elem", i, depth + 1);
            }
        }
        (TypeDescriptor::Tuple(fields), Value::Tuple(items)) => {
            println!("[{name}-{index:02}]: {ty}");
            for (i, (field_ty, item)) in fields.iter().zip(items.iter()).enumerate() {
                print_value(field_ty, item, "field", i, depth + 1);
            }
        }
        (_, Value::Address(addr)) => {
            println!(
                "[{name}-{index:02}]: {ty}, {} - {}",
                addr.to_checksum(None),
                address::encode_base58(addr)
            );
        }
        (_, Value::Uint(n)) => {
            println!("[{name}-{index:02}]: {ty}, {}", render_int(&n.to_string()));
        }
        (_, Value::Int(n)) => {
            println!("[{name}-{index:02}]: {ty}, {}", render_int(&n.to_string()));
        }
        (_, Value::Bytes(bytes)) | (_, Value::FixedBytes(bytes)) => {
            println!("[{name}-{index:02}]: {ty}, 0x{}", hex::encode(bytes));
        }
        (_, Value::Bool(b)) => println!("[{name}-{index:02}]: {ty}, {b}"),
        (_, Value::String(s)) => println!("[{name}-{index:02}]: {ty}, {s:?}"),
        (_, value) => println!("[{name}-{index:02}]: {ty}, {value:?}"),
    }
}

/// Big numbers get a grouped rendering and a digit count next to the raw
/// value.
fn render_int(text: &str) -> String {
    let mut out = text.to_string();
    let grouped = group_digits(text);
    if grouped.contains(',') {
        out.push_str(&format!(" - {grouped}"));
    }
    let digits = text.trim_start_matches('-').len();
    if digits >= 6 {
        out.push_str(&format!(" ({digits})"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_list_with_tuples() {
        let types = parse_type_list("uint256,(address,bool)[],bytes32").unwrap();
        assert_eq!(types.len(), 3);
        assert_eq!(types[1].canonical(), "(address,bool)[]");
    }

    #[test]
    fn test_parse_type_list_rejects_bad() {
        assert!(parse_type_list("").is_err());
        assert!(parse_type_list("uint7").is_err());
    }

    #[test]
    fn test_decode_hex_arg() {
        assert_eq!(decode_hex_arg("0xdead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode_hex_arg("dead").unwrap(), vec![0xde, 0xad]);
        assert!(decode_hex_arg("0xzz").is_err());
    }

    #[test]
    fn test_render_int() {
        assert_eq!(render_int("42"), "42");
        assert_eq!(render_int("123456"), "123456 - 123,456 (6)");
        assert_eq!(render_int("-123456"), "-123456 - -123,456 (6)");
    }
}
