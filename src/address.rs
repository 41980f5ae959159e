//! TRON address helpers
//!
//! A TRON address is a 20-byte EVM address carried behind the `0x41`
//! version byte, rendered as base58check (`T...`, 34 chars).

use alloy_primitives::{Address, U256};
use anyhow::{anyhow, bail, Result};

/// Version byte prefixing TRON mainnet addresses.
pub const TRON_VERSION: u8 = 0x41;

/// Base58check-encode with the TRON version byte.
pub fn encode_base58(addr: &Address) -> String {
    bs58::encode(addr.as_slice())
        .with_check_version(TRON_VERSION)
        .into_string()
}

/// Decode a `T...` base58check address. Returns `None` on a bad checksum,
/// wrong version byte or wrong payload length.
pub fn decode_base58(s: &str) -> Option<Address> {
    let decoded = bs58::decode(s)
        .with_check(Some(TRON_VERSION))
        .into_vec()
        .ok()?;
    // the version byte is retained as the first byte
    if decoded.len() != 21 {
        return None;
    }
    Some(Address::from_slice(&decoded[1..]))
}

/// Parse any of the address spellings the toolkit accepts:
/// base58check (`T...`), `41`-prefixed TRON hex, `0x` hex of any length
/// (left-padded), or a plain decimal number.
pub fn parse_any(input: &str) -> Result<Address> {
    let s = input.trim();
    if s.len() == 34 && s.starts_with('T') {
        return decode_base58(s).ok_or_else(|| anyhow!("bad base58check address: {s}"));
    }
    if s.len() == 42 && s.starts_with("41") {
        let bytes = hex::decode(&s[2..]).map_err(|e| anyhow!("bad TRON hex address {s}: {e}"))?;
        return Ok(Address::from_slice(&bytes));
    }
    if let Some(hex_part) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        let n = U256::from_str_radix(hex_part, 16)
            .map_err(|e| anyhow!("bad hex address {s}: {e}"))?;
        return Ok(from_number(n));
    }
    if s.chars().all(|c| c.is_ascii_digit()) && !s.is_empty() {
        let n = U256::from_str_radix(s, 10).map_err(|e| anyhow!("bad numeric address {s}: {e}"))?;
        return Ok(from_number(n));
    }
    bail!("unrecognized address {input:?}, append 0x if it is hex")
}

/// Left-pad a number into the low bytes of an address.
fn from_number(n: U256) -> Address {
    let bytes = n.to_be_bytes::<32>();
    Address::from_slice(&bytes[12..])
}
