//! OFT deployment lookup through the LayerZero metadata API.

use alloy::primitives::Address;
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::plugins::params::parse_address;

/// Public LayerZero metadata API.
pub const DEFAULT_METADATA_URL: &str = "https://metadata.layerzero-api.com";

/// Where an OFT lives on one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OftDeployment {
    /// The OFT (or OFT adapter) contract that `send` is called on.
    pub oft: Address,
    /// The ERC-20 moved by the OFT. Equal to `oft` for native OFTs.
    pub token: Address,
}

/// Finds OFT deployments by chain and symbol.
#[async_trait]
pub trait OftDirectory: Send + Sync {
    /// `None` when the symbol has no deployment on `chain`.
    async fn lookup(&self, chain: &str, symbol: &str) -> Result<Option<OftDeployment>>;
}

/// [`OftDirectory`] backed by the metadata HTTP API.
#[derive(Debug, Clone)]
pub struct LayerZeroMetadata {
    client: reqwest::Client,
    base_url: String,
}

impl LayerZeroMetadata {
    /// Create a client for the API at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// The API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn list_url(&self, chain: &str, symbol: &str) -> Result<Url> {
        let endpoint = format!(
            "{}/v1/metadata/experiment/ofts/list",
            self.base_url.trim_end_matches('/')
        );
        Url::parse_with_params(&endpoint, [("chainNames", chain), ("symbols", symbol)])
            .map_err(|e| Error::Config(format!("invalid LayerZero metadata URL: {e}")))
    }
}

#[async_trait]
impl OftDirectory for LayerZeroMetadata {
    async fn lookup(&self, chain: &str, symbol: &str) -> Result<Option<OftDeployment>> {
        let url = self.list_url(chain, symbol)?;
        debug!(%url, "querying LayerZero metadata");

        let body: Value = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::Metadata(e.to_string()))?
            .json()
            .await
            .map_err(|e| Error::Metadata(e.to_string()))?;

        parse_deployment(&body, chain, symbol)
    }
}

/// Pick the first listing of `symbol` and its deployment on `chain`.
pub(crate) fn parse_deployment(
    body: &Value,
    chain: &str,
    symbol: &str,
) -> Result<Option<OftDeployment>> {
    let Some(deployment) = body
        .get(symbol)
        .and_then(Value::as_array)
        .and_then(|listings| listings.first())
        .and_then(|listing| listing.get("deployments"))
        .and_then(|deployments| deployments.get(chain))
    else {
        return Ok(None);
    };

    let oft = deployment
        .get("address")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::Metadata(format!("{symbol} deployment on {chain} has no address")))?;
    let oft = parse_address("OFT", oft)?;

    let token = match deployment.get("innerTokenAddress").and_then(Value::as_str) {
        Some(inner) => parse_address("token", inner)?,
        None => oft,
    };

    Ok(Some(OftDeployment { oft, token }))
}
