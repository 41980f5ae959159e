//! Thin HTTP clients for the public TRON/EVM endpoints
//!
//! All requests share one `reqwest` client with a 6-second timeout. The
//! clients only shuttle JSON; no retries, a failed call surfaces at the
//! command level.

pub mod grid;
pub mod rpc;
pub mod scan;
pub mod sigdb;

use std::time::Duration;

use anyhow::{bail, Result};

use crate::config::Config;

pub use grid::GridClient;
pub use rpc::EthRpc;
pub use scan::ScanClient;

/// Endpoint pair for one TRON network.
#[derive(Debug, Clone)]
pub struct Network {
    pub grid: String,
    pub scan: String,
}

/// Resolve a network name: the built-in `main`/`nile`, then config-defined
/// ones.
pub fn resolve_network(name: &str, config: &Config) -> Result<Network> {
    match name {
        "main" => Ok(Network {
            grid: "https://api.trongrid.io".to_string(),
            scan: "https://apilist.tronscan.org".to_string(),
        }),
        "nile" => Ok(Network {
            grid: "https://nile.trongrid.io".to_string(),
            scan: "https://nileapi.tronscan.org".to_string(),
        }),
        other => {
            if let Some(spec) = config.networks.iter().find(|n| n.name == other) {
                return Ok(Network {
                    grid: spec.grid.clone(),
                    scan: spec.scan.clone().unwrap_or_default(),
                });
            }
            bail!("unknown network {other:?} (expected main, nile or a configured name)")
        }
    }
}

pub(crate) fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(6))
        .build()?)
}
