//! Minimal JSON-RPC 2.0 client for the `eth` commands

use alloy_primitives::U256;
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct EthRpc {
    http: reqwest::Client,
    url: String,
}

#[derive(Debug, Serialize)]
struct RpcRequest<P: Serialize> {
    jsonrpc: &'static str,
    method: &'static str,
    params: P,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLogsFilter {
    pub address: String,
    pub from_block: String,
    pub to_block: String,
    pub topics: Vec<String>,
}

/// Raw log entry, kept as the node returns it so the command can print it
/// verbatim as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub block_number: String,
    #[serde(default)]
    pub transaction_hash: String,
    #[serde(default)]
    pub log_index: String,
    #[serde(default)]
    pub removed: bool,
}

impl EthRpc {
    pub fn new(url: &str) -> Result<Self> {
        Ok(EthRpc {
            http: super::http_client()?,
            url: url.to_string(),
        })
    }

    pub async fn block_number(&self) -> Result<u64> {
        let result: String = self.call("eth_blockNumber", ()).await?;
        let hex_part = result.strip_prefix("0x").unwrap_or(&result);
        let n = U256::from_str_radix(hex_part, 16)
            .with_context(|| format!("bad block number {result:?}"))?;
        Ok(n.to::<u64>())
    }

    pub async fn get_logs(&self, filter: &GetLogsFilter) -> Result<Vec<LogEntry>> {
        self.call("eth_getLogs", [filter]).await
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &'static str,
        params: P,
    ) -> Result<R> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };
        tracing::debug!(url = %self.url, method, "json-rpc call");
        let response: RpcResponse<R> = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("decoding {method} response"))?;

        if let Some(err) = response.error {
            return Err(anyhow!("{method} failed: {} (code {})", err.message, err.code));
        }
        response
            .result
            .ok_or_else(|| anyhow!("{method} returned no result"))
    }
}

/// `0x`-prefixed hex block tag.
pub fn block_tag(n: u64) -> String {
    format!("0x{n:x}")
}
