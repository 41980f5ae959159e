//! Address conversion between TRON base58check, TRON hex and EVM hex

use anyhow::Result;

use super::Report;
use crate::address;

/// `addr <input>` — accepts any of the spellings and prints all of them.
pub fn convert(input: &str) -> Result<()> {
    let addr = address::parse_any(input)?;
    Report::new()
        .add("tron", address::encode_base58(&addr))
        .add("tron hex", format!("41{}", hex::encode(addr.as_slice())))
        .add("eth", addr.to_checksum(None))
        .print();
    Ok(())
}
