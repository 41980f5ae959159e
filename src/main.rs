use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trxkit::client::resolve_network;
use trxkit::commands;
use trxkit::config;

#[derive(Debug, Parser)]
#[command(
    name = "trxkit",
    version,
    about = "Command-line tool kit for TRON and EVM-style chains"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// ABI encode/decode helpers
    Abi {
        #[command(subcommand)]
        command: AbiCommand,
    },

    /// Convert an address between TRON base58, TRON hex and EVM hex
    Addr {
        /// T..., 41-prefixed hex, 0x hex or decimal
        input: String,
    },

    /// Hex related helpers
    Hex {
        #[command(subcommand)]
        command: HexCommand,
    },

    /// Convert time between datetime and timestamp
    Now {
        /// Timestamp (sec/ms, dec or short hex) or a datetime string
        value: Option<String>,
    },

    /// Hash data by sha256 and keccak256
    Hash {
        /// 0x-prefixed hex bytes, or plain text
        data: String,
    },

    /// Inspect read-only key-value databases
    Db {
        #[command(subcommand)]
        command: DbCommand,
    },

    /// Interactively call a contract on a TRON network
    Call {
        /// main, nile or a configured network name
        network: String,
        /// Contract address to call
        contract: String,
        /// Fetch the ABI from this address instead (proxies)
        abi_contract: Option<String>,
    },

    /// TronScan explorer queries
    Scan {
        #[command(subcommand)]
        command: ScanCommand,
    },

    /// ETH JSON-RPC queries
    Eth {
        #[command(subcommand)]
        command: EthCommand,
    },
}

#[derive(Debug, Subcommand)]
enum AbiCommand {
    /// Build call data from a signature and argument literals
    Encode {
        /// "transfer(address,uint256)" or a full Solidity declaration
        signature: String,
        /// One literal per parameter
        args: Vec<String>,
    },
    /// 4-byte selector for a function signature
    Selector { signature: String },
    /// Decode data against a comma-separated type list
    Unpack { types: String, data: String },
    /// Split call data into 32-byte words
    Split { data: String },
    /// Pad a number or hex bytes to a 32-byte multiple
    Pad { input: String },
}

#[derive(Debug, Subcommand)]
enum HexCommand {
    /// Convert a number between decimal and hex
    Int {
        value: String,
        /// Radix override, 2..=36
        base: Option<u32>,
    },
    /// Max value of uint<bits>
    Max { bits: usize },
    /// Convert between ascii text and hex
    Str { value: String },
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Count items (and all-zero values) in a database
    Count { path: PathBuf },
    /// Get the value of a key (0x-hex, T-address or text)
    Get {
        path: PathBuf,
        key: String,
        /// How to render the value
        #[arg(long, value_enum, default_value = "hex")]
        value_type: commands::db::ValueType,
    },
    /// Chained keccak digest over all key/value pairs
    Hash { path: PathBuf },
    /// Print every key in hex
    Print { path: PathBuf },
    /// Compare two databases key by key
    Diff { path_a: PathBuf, path_b: PathBuf },
}

#[derive(Debug, Subcommand)]
enum ScanCommand {
    /// List transactions of a contract, newest first
    Txs {
        /// main, nile or a configured network name
        network: String,
        address: String,
        #[arg(default_value_t = 0)]
        start: u64,
        #[arg(default_value_t = 20)]
        limit: u64,
    },
    /// Inspect one transaction by hash
    Tx { network: String, hash: String },
}

#[derive(Debug, Subcommand)]
enum EthCommand {
    /// Page eth_getLogs from a block up to the current head
    Logs {
        address: String,
        from_block: u64,
        /// Comma-separated topic hashes (empty string for none)
        topics: String,
        /// Blocks per request
        page: u64,
        /// JSON-RPC endpoint (falls back to config, then localhost)
        #[arg(long)]
        rpc: Option<String>,
    },
}

const DEFAULT_ETH_RPC: &str = "http://127.0.0.1:8545";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load();

    match cli.command {
        Command::Abi { command } => match command {
            AbiCommand::Encode { signature, args } => commands::abi::encode(&signature, &args),
            AbiCommand::Selector { signature } => commands::abi::selector(&signature),
            AbiCommand::Unpack { types, data } => commands::abi::unpack(&types, &data),
            AbiCommand::Split { data } => commands::abi::split(&data).await,
            AbiCommand::Pad { input } => commands::abi::pad(&input),
        },

        Command::Addr { input } => commands::addr::convert(&input),

        Command::Hex { command } => match command {
            HexCommand::Int { value, base } => commands::hexfmt::int(&value, base),
            HexCommand::Max { bits } => commands::hexfmt::max(bits),
            HexCommand::Str { value } => commands::hexfmt::str_convert(&value),
        },

        Command::Now { value } => commands::time::convert(value.as_deref()),

        Command::Hash { data } => commands::hash::digest(&data),

        Command::Db { command } => match command {
            DbCommand::Count { path } => commands::db::count(&path),
            DbCommand::Get {
                path,
                key,
                value_type,
            } => commands::db::get(&path, &key, value_type),
            DbCommand::Hash { path } => commands::db::digest(&path),
            DbCommand::Print { path } => commands::db::print_keys(&path),
            DbCommand::Diff { path_a, path_b } => commands::db::diff(&path_a, &path_b),
        },

        Command::Call {
            network,
            contract,
            abi_contract,
        } => {
            let network = resolve_network(&network, &config)?;
            commands::call::run(&network, &contract, abi_contract.as_deref()).await
        }

        Command::Scan { command } => match command {
            ScanCommand::Txs {
                network,
                address,
                start,
                limit,
            } => {
                let network = resolve_network(&network, &config)?;
                commands::scan::txs(&network, &address, start, limit).await
            }
            ScanCommand::Tx { network, hash } => {
                let network = resolve_network(&network, &config)?;
                commands::scan::tx(&network, &hash).await
            }
        },

        Command::Eth { command } => match command {
            EthCommand::Logs {
                address,
                from_block,
                topics,
                page,
                rpc,
            } => {
                let rpc_url = rpc
                    .or_else(|| config.eth_rpc.clone())
                    .unwrap_or_else(|| DEFAULT_ETH_RPC.to_string());
                commands::eth::logs(&rpc_url, &address, from_block, &topics, page).await
            }
        },
    }
}
