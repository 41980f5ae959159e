//! Interactive constant-contract call loop
//!
//! Fetches the contract ABI from the node API, lets the user pick a
//! method and type its arguments, encodes the call with the local codec
//! and POSTs a constant trigger. Repeats until stdin closes.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};

use super::abi::print_value;
use crate::abi::{self, FunctionSignature, TypeDescriptor};
use crate::client::grid::{AbiEntry, TriggerRequest};
use crate::client::{GridClient, Network};

/// Default `from` for constant calls, the conventional zero address.
const ZERO_ADDRESS: &str = "T9yD14Nj9j7xAB4dbGeiX9h8unkKHxuWwb";

/// One callable method with its resolved parameter/return types.
struct Method {
    signature: FunctionSignature,
    outputs: Vec<TypeDescriptor>,
    constant: bool,
}

impl Method {
    fn resolve(entry: &AbiEntry) -> Option<Method> {
        let params = entry
            .inputs
            .iter()
            .map(|p| TypeDescriptor::parse(&p.type_string))
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        let outputs = entry
            .outputs
            .iter()
            .map(|p| TypeDescriptor::parse(&p.type_string))
            .collect::<Result<Vec<_>, _>>()
            .ok()?;
        Some(Method {
            signature: FunctionSignature {
                name: entry.name.clone(),
                params,
            },
            outputs,
            constant: entry.is_constant(),
        })
    }
}

/// `call <network> <contract> [abi-contract]` — the ABI may come from a
/// different address (proxies).
pub async fn run(network: &Network, contract: &str, abi_contract: Option<&str>) -> Result<()> {
    let client = GridClient::new(&network.grid)?;
    let abi_address = abi_contract.unwrap_or(contract);

    let info = client.get_contract(abi_address).await?;
    if info.address.is_empty() {
        bail!("contract {abi_address} does not exist on this network");
    }

    let mut methods: Vec<Method> = info
        .abi
        .entries
        .iter()
        .filter(|entry| entry.is_function() && !entry.name.is_empty())
        .filter_map(Method::resolve)
        .collect();
    if methods.is_empty() {
        bail!("contract {abi_address} exposes no callable functions");
    }
    methods.sort_by_key(|m| m.signature.canonical());

    for (i, method) in methods.iter().enumerate() {
        println!("{:2}. {}", i + 1, method.signature.canonical());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let Some(index) = prompt(&mut lines, "Which method you want to call: ")? else {
            return Ok(());
        };
        let Ok(choice) = index.trim().parse::<usize>() else {
            println!("Input index error, try again.");
            continue;
        };
        if choice == 0 || choice > methods.len() {
            println!("Input index error, try again.");
            continue;
        }
        let method = &methods[choice - 1];
        println!("You choose method: [{}]", method.signature.canonical());

        let mut args = Vec::with_capacity(method.signature.params.len());
        if !method.signature.params.is_empty() {
            println!("Please input arguments:");
            for (i, ty) in method.signature.params.iter().enumerate() {
                let Some(raw) = prompt(&mut lines, &format!(" - {i} ({ty}): "))? else {
                    return Ok(());
                };
                args.push(raw.trim().to_string());
            }
        }

        let mut from = ZERO_ADDRESS.to_string();
        if !method.constant {
            let Some(raw) = prompt(&mut lines, "Please input from address (default zero address): ")?
            else {
                return Ok(());
            };
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                from = trimmed.to_string();
            }
        }

        match trigger(&client, contract, &from, method, &args).await {
            Ok(()) => {}
            Err(err) => println!("Call error: {err}"),
        }
    }
}

async fn trigger(
    client: &GridClient,
    contract: &str,
    from: &str,
    method: &Method,
    args: &[String],
) -> Result<()> {
    let values = method
        .signature
        .params
        .iter()
        .zip(args.iter())
        .enumerate()
        .map(|(i, (ty, arg))| {
            abi::value::convert(ty, arg).map_err(|e| abi::AbiError::Argument {
                index: i,
                ty: ty.canonical(),
                source: Box::new(e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let parameter = abi::encode_params(&method.signature.params, &values)?;

    let request = TriggerRequest {
        owner_address: from.to_string(),
        contract_address: contract.to_string(),
        function_selector: method.signature.canonical(),
        parameter: hex::encode(parameter),
        visible: true,
    };
    let response = client
        .trigger_constant(&request)
        .await
        .context("trigger request failed")?;

    println!("[Energy Used]\n  - {}", response.energy_used);

    if let Some(result) = response.constant_result.first() {
        if !result.is_empty() {
            println!("[Return Data]");
            let data = super::abi::decode_hex_arg(result)?;
            match abi::decode_params(&method.outputs, &data) {
                Ok(values) => {
                    for (i, (ty, value)) in method.outputs.iter().zip(values.iter()).enumerate() {
                        print_value(ty, value, "out", i, 1);
                    }
                }
                Err(err) => println!("  - raw 0x{} ({err})", hex::encode(&data)),
            }
        }
    }

    if !response.logs.is_empty() {
        println!("[Logs]");
        for log in &response.logs {
            println!("{{\n\taddress: {},", log.address);
            println!("\tdata: 0x{},", log.data);
            println!("\ttopics: [");
            for topic in &log.topics {
                println!("\t\t0x{topic},");
            }
            println!("\t]\n}},");
        }
    }

    if !response.internal_txs.is_empty() {
        println!("[Internal Txs]");
        for tx in &response.internal_txs {
            let note = super::abi::decode_hex_arg(&tx.note)
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_else(|_| tx.note.clone());
            println!("{{\n\tfrom: {},\n\tto: {},\n\ttype: {note}\n}}", tx.from, tx.to);
        }
    }
    Ok(())
}

/// Print a prompt and read one line; `None` means stdin closed.
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    text: &str,
) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?)),
        None => Ok(None),
    }
}
