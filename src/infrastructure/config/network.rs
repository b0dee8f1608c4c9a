//! Endpoints and transport settings.

use std::time::Duration;

use serde::Deserialize;

/// Feed, venue, and discovery endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Reference price trade stream.
    #[serde(default = "default_binance_ws_url")]
    pub binance_ws_url: String,
    /// Prediction venue market channel.
    #[serde(default = "default_polymarket_ws_url")]
    pub polymarket_ws_url: String,
    /// CLOB REST endpoint used by live execution.
    #[serde(default = "default_clob_url")]
    pub clob_url: String,
    /// Market listing endpoint used by discovery.
    #[serde(default = "default_gamma_url")]
    pub gamma_url: String,
    /// EVM chain id for order signing (137 = Polygon mainnet).
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Timeout for discovery HTTP requests (milliseconds).
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
}

fn default_binance_ws_url() -> String {
    "wss://stream.binance.com:9443/ws/btcusdt@trade".into()
}

fn default_polymarket_ws_url() -> String {
    "wss://ws-subscriptions-clob.polymarket.com/ws/market".into()
}

fn default_clob_url() -> String {
    "https://clob.polymarket.com".into()
}

fn default_gamma_url() -> String {
    "https://gamma-api.polymarket.com".into()
}

fn default_chain_id() -> u64 {
    137
}

fn default_http_timeout_ms() -> u64 {
    10_000
}

impl NetworkConfig {
    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            binance_ws_url: default_binance_ws_url(),
            polymarket_ws_url: default_polymarket_ws_url(),
            clob_url: default_clob_url(),
            gamma_url: default_gamma_url(),
            chain_id: default_chain_id(),
            http_timeout_ms: default_http_timeout_ms(),
        }
    }
}
