//! Market selection and rotation settings.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::{MarketHandle, MarketSlug, TokenId};

/// Which market to trade and how often to re-resolve it.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// Every keyword must appear in a market's question (case-insensitive).
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
    /// Manual override; requires `down_token_id` as well.
    #[serde(default)]
    pub up_token_id: Option<String>,
    #[serde(default)]
    pub down_token_id: Option<String>,
    /// Seconds between discovery attempts.
    #[serde(default = "default_rotate_interval_seconds")]
    pub rotate_interval_seconds: u64,
    /// Maximum age of the last successful discovery before it counts as stale.
    #[serde(default = "default_market_discovery_fallback_seconds")]
    pub market_discovery_fallback_seconds: u64,
    /// Page size for the market listing request.
    #[serde(default = "default_discovery_limit")]
    pub discovery_limit: u32,
}

fn default_keywords() -> Vec<String> {
    vec!["bitcoin".into(), "up".into(), "down".into()]
}

fn default_rotate_interval_seconds() -> u64 {
    300
}

fn default_market_discovery_fallback_seconds() -> u64 {
    120
}

fn default_discovery_limit() -> u32 {
    200
}

impl MarketConfig {
    /// The pinned market when both token ids are configured.
    #[must_use]
    pub fn manual_market(&self) -> Option<MarketHandle> {
        match (&self.up_token_id, &self.down_token_id) {
            (Some(up), Some(down)) => Some(MarketHandle::new(
                MarketSlug::manual(),
                TokenId::new(up.as_str()),
                TokenId::new(down.as_str()),
            )),
            _ => None,
        }
    }

    #[must_use]
    pub fn rotate_interval(&self) -> Duration {
        Duration::from_secs(self.rotate_interval_seconds)
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            up_token_id: None,
            down_token_id: None,
            rotate_interval_seconds: default_rotate_interval_seconds(),
            market_discovery_fallback_seconds: default_market_discovery_fallback_seconds(),
            discovery_limit: default_discovery_limit(),
        }
    }
}
