//! TronGrid node API client
//!
//! Covers the three wallet endpoints the toolkit needs: contract lookup,
//! constant-contract triggering and transaction info.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct GridClient {
    http: reqwest::Client,
    base: String,
}

/// Contract metadata as returned by `wallet/getcontract`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractInfo {
    #[serde(default, rename = "contract_address")]
    pub address: String,
    #[serde(default)]
    pub abi: ContractAbi,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractAbi {
    #[serde(default, rename = "entrys")]
    pub entries: Vec<AbiEntry>,
}

/// One ABI entry. TronGrid capitalizes `type` and `stateMutability`
/// values, so matching is done case-insensitively by the helpers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AbiEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, rename = "stateMutability")]
    pub state_mutability: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub type_string: String,
}

impl AbiEntry {
    pub fn is_function(&self) -> bool {
        self.kind.eq_ignore_ascii_case("function")
    }

    /// Constant entries can be triggered from the zero address.
    pub fn is_constant(&self) -> bool {
        self.state_mutability.eq_ignore_ascii_case("view")
            || self.state_mutability.eq_ignore_ascii_case("pure")
    }
}

#[derive(Debug, Serialize)]
pub struct TriggerRequest {
    pub owner_address: String,
    pub contract_address: String,
    pub function_selector: String,
    pub parameter: String,
    pub visible: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct TriggerResponse {
    #[serde(default)]
    pub result: TriggerResult,
    #[serde(default, rename = "energy_used")]
    pub energy_used: u64,
    #[serde(default, rename = "constant_result")]
    pub constant_result: Vec<String>,
    #[serde(default, rename = "logs")]
    pub logs: Vec<TriggerLog>,
    #[serde(default, rename = "internal_transactions")]
    pub internal_txs: Vec<InternalTx>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TriggerResult {
    #[serde(default)]
    pub result: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TriggerLog {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InternalTx {
    #[serde(default, rename = "caller_address")]
    pub from: String,
    #[serde(default, rename = "transferTo_address")]
    pub to: String,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct GridTxInfo {
    #[serde(default, rename = "contractResult")]
    pub contract_result: Vec<String>,
}

impl GridClient {
    pub fn new(base: &str) -> Result<Self> {
        Ok(GridClient {
            http: super::http_client()?,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_contract(&self, address: &str) -> Result<ContractInfo> {
        let url = format!(
            "{}/wallet/getcontract?value={address}&visible=true",
            self.base
        );
        tracing::debug!(%url, "fetching contract");
        let info: ContractInfo = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding getcontract response")?;
        Ok(info)
    }

    pub async fn trigger_constant(&self, request: &TriggerRequest) -> Result<TriggerResponse> {
        let url = format!("{}/wallet/triggerconstantcontract", self.base);
        tracing::debug!(
            %url,
            selector = %request.function_selector,
            "triggering constant contract"
        );
        let response: TriggerResponse = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding trigger response")?;
        Ok(response)
    }

    pub async fn transaction_info(&self, hash: &str) -> Result<GridTxInfo> {
        let url = format!("{}/wallet/gettransactioninfobyid", self.base);
        let info: GridTxInfo = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "value": hash }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding transaction info")?;
        Ok(info)
    }
}
