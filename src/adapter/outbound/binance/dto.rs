//! Binance trade stream payloads.

use serde::Deserialize;

/// One trade from a `<symbol>@trade` stream.
///
/// Only the fields the price feed reads are kept; the rest of the payload
/// is ignored.
#[derive(Debug, Deserialize)]
pub struct BinanceTrade {
    /// Event type (always "trade").
    #[serde(rename = "e", default)]
    pub event_type: Option<String>,
    /// Symbol (e.g., "BTCUSDT").
    #[serde(rename = "s", default)]
    pub symbol: Option<String>,
    /// Trade price as a decimal string.
    #[serde(rename = "p")]
    pub price: String,
    /// Trade time in milliseconds.
    #[serde(rename = "T", default)]
    pub trade_time: Option<i64>,
}

impl BinanceTrade {
    /// Trade price, if it parses to a finite positive number.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
    }
}
