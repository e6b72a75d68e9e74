//! Agent configuration.
//!
//! Every recognized key is enumerated on [`AgentConfig`] and optional; an
//! absent key disables whatever feature reads it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Transaction priority requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriorityLevel {
    /// Default inclusion speed.
    #[default]
    Medium,
    /// Faster inclusion.
    High,
    /// Fastest inclusion.
    VeryHigh,
}

impl FromStr for PriorityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "veryHigh" => Ok(Self::VeryHigh),
            other => Err(Error::Config(format!(
                "invalid priority level '{other}' (expected medium, high or veryHigh)"
            ))),
        }
    }
}

/// Configuration passed to an agent at construction time.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// OpenAI API key.
    pub openai_api_key: Option<String>,
    /// Perplexity API key.
    pub perplexity_api_key: Option<String>,
    /// Transaction priority level.
    pub priority_level: Option<PriorityLevel>,
    /// CoinGecko pro API key.
    pub coingecko_pro_api_key: Option<String>,
    /// CoinGecko demo API key.
    pub coingecko_demo_api_key: Option<String>,
    /// Messari API key.
    pub messari_api_key: Option<String>,
    /// Base URL of the LayerZero metadata API, overriding
    /// [`DEFAULT_METADATA_URL`](crate::plugins::layerzero::DEFAULT_METADATA_URL).
    pub layerzero_metadata_url: Option<String>,
}

impl std::fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(key: Option<&String>) -> Option<&'static str> {
            key.map(|_| "<redacted>")
        }
        f.debug_struct("AgentConfig")
            .field("openai_api_key", &redact(self.openai_api_key.as_ref()))
            .field("perplexity_api_key", &redact(self.perplexity_api_key.as_ref()))
            .field("priority_level", &self.priority_level)
            .field(
                "coingecko_pro_api_key",
                &redact(self.coingecko_pro_api_key.as_ref()),
            )
            .field(
                "coingecko_demo_api_key",
                &redact(self.coingecko_demo_api_key.as_ref()),
            )
            .field("messari_api_key", &redact(self.messari_api_key.as_ref()))
            .field("layerzero_metadata_url", &self.layerzero_metadata_url)
            .finish()
    }
}

impl AgentConfig {
    /// Read configuration from environment variables.
    ///
    /// Empty variables count as absent.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let priority_level = get("PRIORITY_LEVEL")
            .map(|v| v.parse::<PriorityLevel>())
            .transpose()?;

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY"),
            perplexity_api_key: get("PERPLEXITY_API_KEY"),
            priority_level,
            coingecko_pro_api_key: get("COINGECKO_PRO_API_KEY"),
            coingecko_demo_api_key: get("COINGECKO_DEMO_API_KEY"),
            messari_api_key: get("MESSARI_API_KEY"),
            layerzero_metadata_url: get("LAYERZERO_METADATA_URL"),
        })
    }

    /// Set the LayerZero metadata API base URL.
    #[must_use]
    pub fn with_layerzero_metadata_url(mut self, url: impl Into<String>) -> Self {
        self.layerzero_metadata_url = Some(url.into());
        self
    }

    /// Set the transaction priority level.
    #[must_use]
    pub const fn with_priority_level(mut self, level: PriorityLevel) -> Self {
        self.priority_level = Some(level);
        self
    }
}
