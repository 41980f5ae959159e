//! Selector-to-signature lookup against public signature databases
//!
//! Tries the ethereum-lists/4bytes GitHub mirror, then openchain.xyz,
//! then 4byte.directory; first hit wins. Lookup failures are soft, the
//! caller gets `None` and decides how to render an unknown selector.

use std::collections::HashMap;

use serde::Deserialize;

pub struct SigDb {
    http: reqwest::Client,
    cache: HashMap<[u8; 4], Option<String>>,
}

#[derive(Debug, Deserialize)]
struct OpenChainResponse {
    #[serde(default)]
    result: OpenChainResult,
}

#[derive(Debug, Default, Deserialize)]
struct OpenChainResult {
    #[serde(default)]
    function: Option<HashMap<String, Vec<OpenChainItem>>>,
}

#[derive(Debug, Deserialize)]
struct OpenChainItem {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FourByteResponse {
    #[serde(default)]
    count: usize,
    #[serde(default)]
    results: Vec<FourByteItem>,
}

#[derive(Debug, Deserialize)]
struct FourByteItem {
    #[serde(rename = "text_signature")]
    signature: String,
}

impl SigDb {
    pub fn new() -> anyhow::Result<Self> {
        Ok(SigDb {
            http: super::http_client()?,
            cache: HashMap::new(),
        })
    }

    /// Resolve a 4-byte selector to a text signature, if any database
    /// knows it. Results (including misses) are cached per process.
    pub async fn lookup(&mut self, selector: [u8; 4]) -> Option<String> {
        if let Some(cached) = self.cache.get(&selector) {
            return cached.clone();
        }
        let resolved = self.query(selector).await;
        self.cache.insert(selector, resolved.clone());
        resolved
    }

    async fn query(&self, selector: [u8; 4]) -> Option<String> {
        let hex_sel = hex::encode(selector);

        if let Some(sig) = self.query_github(&hex_sel).await {
            return Some(sig);
        }
        if let Some(sig) = self.query_openchain(&hex_sel).await {
            return Some(sig);
        }
        self.query_fourbyte(&hex_sel).await
    }

    async fn query_github(&self, hex_sel: &str) -> Option<String> {
        let url = format!(
            "https://raw.githubusercontent.com/ethereum-lists/4bytes/master/signatures/{hex_sel}"
        );
        let response = self.http.get(&url).send().await.ok()?;
        if !response.status().is_success() {
            tracing::debug!(%url, status = %response.status(), "github lookup miss");
            return None;
        }
        let text = response.text().await.ok()?;
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(text.to_string())
    }

    async fn query_openchain(&self, hex_sel: &str) -> Option<String> {
        let url = format!(
            "https://api.openchain.xyz/signature-database/v1/lookup?function=0x{hex_sel}&filter=true"
        );
        let response: OpenChainResponse = self
            .http
            .get(&url)
            .send()
            .await
            .ok()?
            .json()
            .await
            .ok()?;
        let functions = response.result.function?;
        let items = functions.get(&format!("0x{hex_sel}"))?;
        items.first().map(|item| item.name.clone())
    }

    async fn query_fourbyte(&self, hex_sel: &str) -> Option<String> {
        let url =
            format!("https://www.4byte.directory/api/v1/signatures/?hex_signature=0x{hex_sel}");
        let response: FourByteResponse = self
            .http
            .get(&url)
            .send()
            .await
            .ok()?
            .json()
            .await
            .ok()?;
        if response.count == 0 {
            return None;
        }
        // the earliest registration is listed last
        response.results.last().map(|item| item.signature.clone())
    }
}
