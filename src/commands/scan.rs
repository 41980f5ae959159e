//! Explorer queries: transaction listing and single-transaction detail

use alloy_primitives::U256;
use anyhow::Result;
use chrono::{Local, TimeZone};

use super::abi::{decode_hex_arg, print_value};
use crate::abi::{self, signature, TypeDescriptor};
use crate::client::sigdb::SigDb;
use crate::client::{GridClient, Network, ScanClient};

const LEGEND: &str =
    "[Legend]: ✅ - [Success] ⚠️  - [Revert] ⏱  - [Out_Of_Time] ⚡️ - [Out_Of_Energy] 💢 - [Other]";

/// `scan txs <network> <addr> [start] [limit]` — newest-first pages of a
/// contract's transactions with status legend and resolved method names.
pub async fn txs(network: &Network, contract: &str, start: u64, limit: u64) -> Result<()> {
    let client = ScanClient::new(&network.scan)?;
    let mut sigdb = SigDb::new()?;

    println!("{LEGEND}");
    let index_width = limit.to_string().len();
    let mut fetched = 0u64;
    while fetched < limit {
        let page_size = (limit - fetched).min(50);
        let page = client
            .contract_txs(contract, start + fetched, page_size)
            .await?;
        if page.data.is_empty() {
            break;
        }
        for (i, tx) in page.data.iter().enumerate() {
            let when = Local
                .timestamp_opt(tx.timestamp / 1000, 0)
                .single()
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "?".to_string());
            print!(
                "{:>index_width$} {} {} {} {} ",
                fetched + i as u64 + 1,
                when,
                tx.tx_hash,
                tx.owner_address,
                status_emoji(&tx.contract_ret),
            );
            if tx.call_data.len() >= 8 {
                if let Ok(selector_bytes) = hex::decode(&tx.call_data[..8]) {
                    let selector: [u8; 4] = selector_bytes.try_into().unwrap();
                    match sigdb.lookup(selector).await {
                        Some(method) => print!("{method}"),
                        None => print!("{}", &tx.call_data[..8]),
                    }
                }
            }
            println!();
        }
        fetched += page.data.len() as u64;
    }
    Ok(())
}

/// `scan tx <network> <hash>` — constant result from the node plus
/// explorer detail with decoded calldata.
pub async fn tx(network: &Network, hash: &str) -> Result<()> {
    let grid = GridClient::new(&network.grid)?;
    let scan = ScanClient::new(&network.scan)?;
    let mut sigdb = SigDb::new()?;

    let grid_info = grid.transaction_info(hash).await?;
    if let Some(result) = grid_info.contract_result.first() {
        let data = decode_hex_arg(result)?;
        if data.is_empty() {
            println!("[No return data]");
        } else {
            println!("[Return data]:");
            println!("  - In HEX: 0x{}", hex::encode(&data));
            if data.len() == 32 {
                println!("  - In INT: {}", U256::from_be_slice(&data));
            }
            println!("  - In ASCII: {}", String::from_utf8_lossy(&data));
        }
    }

    let scan_info = scan.transaction_info(hash).await?;
    println!("[From]: {}", scan_info.contract_data.owner_address);
    println!("[To]: {}", scan_info.contract_data.contract_address);

    let call_data = decode_hex_arg(&scan_info.contract_data.data)?;
    let method = if scan_info.trigger_info.method.is_empty()
        || scan_info.trigger_info.method == "()"
    {
        if call_data.len() >= 4 {
            let selector: [u8; 4] = call_data[..4].try_into().unwrap();
            sigdb.lookup(selector).await.unwrap_or_default()
        } else {
            String::new()
        }
    } else {
        scan_info.trigger_info.method.clone()
    };

    if !method.is_empty() {
        println!("[Method]: {method}");
        match method_param_types(&method) {
            Ok(types) => match abi::decode_params(&types, &call_data[4..]) {
                Ok(values) => {
                    for (i, (ty, value)) in types.iter().zip(values.iter()).enumerate() {
                        print_value(ty, value, "Arg", i, 1);
                    }
                }
                Err(err) => println!("[Decode error]: {err}"),
            },
            Err(err) => println!("[Decode error]: {err}"),
        }
    } else if scan_info.contract_data.data.len() >= 8 {
        println!("[Selector]: {}", &scan_info.contract_data.data[..8]);
    } else {
        println!("[Selector]: none");
    }
    Ok(())
}

fn status_emoji(ret: &str) -> &'static str {
    match ret {
        "SUCCESS" => "✅",
        "REVERT" => "⚠️ ",
        "OUT_OF_TIME" => "⏱ ",
        "OUT_OF_ENERGY" => "⚡️",
        _ => "💢",
    }
}

/// Extract parameter types from a method string that may carry parameter
/// names, e.g. `transfer(address _to, uint256 _value)`.
fn method_param_types(method: &str) -> Result<Vec<TypeDescriptor>, abi::AbiError> {
    let open = method
        .find('(')
        .ok_or_else(|| abi::AbiError::InvalidSignature(method.to_string()))?;
    if !method.ends_with(')') {
        return Err(abi::AbiError::InvalidSignature(method.to_string()));
    }
    let inner = method[open + 1..method.len() - 1].trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    abi::lexer::split_top_level(inner)?
        .iter()
        .map(|param| {
            signature::parameter_type_string(param).and_then(|t| TypeDescriptor::parse(&t))
        })
        .collect()
}
