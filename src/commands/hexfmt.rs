//! Hex/decimal/string conversion helpers

use alloy_primitives::U256;
use anyhow::{bail, Result};

use super::{from_hex_input, group_digits, Report};

/// `hex int <value> [base]` — big-int conversion between decimal and hex.
/// The default base is 16 when the input carries a `0x` prefix, 10
/// otherwise; an explicit base overrides both.
pub fn int(input: &str, base: Option<u32>) -> Result<()> {
    let (digits, radix) = match (from_prefix(input), base) {
        ((digits, _), Some(base)) => (digits, base),
        ((digits, Some(prefix_radix)), None) => (digits, prefix_radix),
        ((digits, None), None) => (digits, 10),
    };
    if !(2..=36).contains(&radix) {
        bail!("base must be in 2..=36");
    }
    let Ok(n) = U256::from_str_radix(digits, radix as u64) else {
        bail!("cannot parse {input:?} with base {radix}");
    };
    let text = n.to_string();
    Report::new()
        .add("in hex", format!("0x{n:x}"))
        .add(
            "in dec",
            format!("{text} ({} len:{})", group_digits(&text), text.len()),
        )
        .print();
    Ok(())
}

/// `hex max <bits>` — largest value of `uint<bits>`.
pub fn max(bits: usize) -> Result<()> {
    if bits < 8 || bits > 256 || bits % 8 != 0 {
        bail!("uint size must be 8..=256 and divisible by 8");
    }
    let max = if bits == 256 {
        U256::MAX
    } else {
        (U256::from(1u8) << bits) - U256::from(1u8)
    };
    Report::new()
        .add("max hex", format!("0x{max:x}"))
        .add("max dec", format!("{max} ({})", group_digits(&max.to_string())))
        .print();
    Ok(())
}

/// `hex str <value>` — hex input renders as sanitized text, text input
/// renders as hex.
pub fn str_convert(input: &str) -> Result<()> {
    if let Some(mut bytes) = from_hex_input(input) {
        // leading backspace shows up in some contract revert strings
        if bytes.first() == Some(&0x08) {
            bytes.remove(0);
        }
        Report::new()
            .add("in ascii", readable_ascii(&bytes))
            .print();
    } else {
        Report::new()
            .add("in hex", format!("0x{}", hex::encode(input.as_bytes())))
            .print();
    }
    Ok(())
}

/// Lossy UTF-8 with newlines made visible.
fn readable_ascii(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .replace('\u{FFFD}', "")
        .replace('\n', "↵")
}

fn from_prefix(input: &str) -> (&str, Option<u32>) {
    match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(rest) => (rest, Some(16)),
        None => (input, None),
    }
}
