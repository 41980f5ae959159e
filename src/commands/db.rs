//! Key-value store inspection commands

use std::path::Path;
use std::time::Duration;

use alloy_primitives::{keccak256, U256};
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};

use crate::address;
use crate::store::KvStore;

/// Burn-address key excluded from the content digest; its value churns
/// with every block.
const BLACKHOLE_KEY: [u8; 21] = [
    0x41, 0x77, 0x94, 0x4d, 0x19, 0xc0, 0x52, 0xb7, 0x3e, 0xe2, 0x28, 0x68, 0x23, 0xaa, 0x83,
    0xf8, 0x13, 0x8c, 0xb7, 0x03, 0x2f,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    Hex,
    Num,
    Utf8,
}

/// `db count <path>` — total items and all-zero values, with a live
/// spinner while the scan runs.
pub fn count(path: &Path) -> Result<()> {
    let store = KvStore::open(path)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} counting {elapsed}").unwrap());
    spinner.enable_steady_tick(Duration::from_millis(120));

    let mut total = 0u64;
    let mut zero = 0u64;
    store.for_each(|_, value| {
        total += 1;
        if value.iter().all(|&b| b == 0) {
            zero += 1;
        }
    })?;

    spinner.finish_and_clear();
    println!("DB items count: {total}, cost: {}s", spinner.elapsed().as_secs());
    println!("Zero count: {zero}");
    Ok(())
}

/// `db get <path> <key>` — the key may be `0x`-hex, a TRON base58check
/// address, or plain text.
pub fn get(path: &Path, key: &str, value_type: ValueType) -> Result<()> {
    let store = KvStore::open(path)?;
    let db_key = parse_key(key)?;
    let value = match store.get(&db_key)? {
        Some(value) => value,
        None => bail!("key {key:?} not found"),
    };

    match value_type {
        ValueType::Num => {
            if value.len() > 32 {
                bail!("value is {} bytes, too wide for a number", value.len());
            }
            println!("Key `{key}` int value is {}", U256::from_be_slice(&value));
        }
        ValueType::Utf8 => {
            println!("Key `{key}` utf8 value is {}", String::from_utf8_lossy(&value));
        }
        ValueType::Hex => {
            println!("Key `{key}` hex value is {}", hex::encode(&value));
        }
    }
    Ok(())
}

/// `db hash <path>` — chained keccak over key/value pairs in key order,
/// skipping the burn address.
pub fn digest(path: &Path) -> Result<()> {
    let store = KvStore::open(path)?;

    let mut hash = [0u8; 32].to_vec();
    store.for_each(|key, value| {
        if key == BLACKHOLE_KEY.as_slice() {
            return;
        }
        let mut buf = Vec::with_capacity(hash.len() + key.len() + value.len());
        buf.extend_from_slice(&hash);
        buf.extend_from_slice(key);
        buf.extend_from_slice(value);
        hash = keccak256(&buf).to_vec();
    })?;

    println!("Root is {}", hex::encode(hash));
    Ok(())
}

/// `db print <path>` — list every key in hex.
pub fn print_keys(path: &Path) -> Result<()> {
    let store = KvStore::open(path)?;
    store.for_each(|key, _| println!("{}", hex::encode(key)))?;
    Ok(())
}

/// `db diff <path-a> <path-b>` — report keys of A whose value differs in
/// B or that B lacks.
pub fn diff(path_a: &Path, path_b: &Path) -> Result<()> {
    let store_a = KvStore::open(path_a)?;
    let store_b = KvStore::open(path_b)?;

    let mut total = 0u64;
    let mut not_found = 0u64;
    let mut lookup_err: Option<anyhow::Error> = None;
    store_a.for_each(|key, value_a| {
        if lookup_err.is_some() {
            return;
        }
        total += 1;
        match store_b.get(key) {
            Ok(Some(value_b)) => {
                if value_a != value_b.as_slice() {
                    println!("Different: {}", hex::encode(key));
                }
            }
            Ok(None) => {
                not_found += 1;
                println!("not found: {}", hex::encode(key));
            }
            Err(err) => lookup_err = Some(err),
        }
    })?;
    if let Some(err) = lookup_err {
        return Err(err);
    }

    println!("Total: {total}, Not Found: {not_found}");
    Ok(())
}

fn parse_key(key: &str) -> Result<Vec<u8>> {
    if let Some(rest) = key.strip_prefix("0x").or_else(|| key.strip_prefix("0X")) {
        return Ok(hex::decode(rest)?);
    }
    if key.len() == 34 && key.starts_with('T') {
        let addr = address::decode_base58(key)
            .ok_or_else(|| anyhow!("bad base58check key {key:?}"))?;
        return Ok(addr.to_vec());
    }
    Ok(key.as_bytes().to_vec())
}
