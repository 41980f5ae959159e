//! TronScan explorer API client

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct ScanClient {
    http: reqwest::Client,
    base: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TxPage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub data: Vec<TxSummary>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxSummary {
    #[serde(default)]
    pub owner_address: String,
    #[serde(default)]
    pub to_address: String,
    #[serde(default, rename = "call_data")]
    pub call_data: String,
    #[serde(default)]
    pub tx_hash: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub contract_ret: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanTxInfo {
    #[serde(default, rename = "contractData")]
    pub contract_data: ScanContractData,
    #[serde(default, rename = "trigger_info")]
    pub trigger_info: ScanTriggerInfo,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanContractData {
    #[serde(default)]
    pub data: String,
    #[serde(default, rename = "owner_address")]
    pub owner_address: String,
    #[serde(default, rename = "contract_address")]
    pub contract_address: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanTriggerInfo {
    #[serde(default)]
    pub method: String,
}

impl ScanClient {
    pub fn new(base: &str) -> Result<Self> {
        Ok(ScanClient {
            http: super::http_client()?,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// One page of a contract's transactions, newest first.
    pub async fn contract_txs(&self, contract: &str, start: u64, limit: u64) -> Result<TxPage> {
        let url = format!(
            "{}/api/contracts/transaction?sort=-timestamp&count=true&limit={limit}&start={start}&contract={contract}",
            self.base
        );
        tracing::debug!(%url, "listing contract transactions");
        let page: TxPage = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding transaction page")?;
        Ok(page)
    }

    pub async fn transaction_info(&self, hash: &str) -> Result<ScanTxInfo> {
        let url = format!("{}/api/transaction-info?hash={hash}", self.base);
        let info: ScanTxInfo = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding transaction info")?;
        Ok(info)
    }
}
