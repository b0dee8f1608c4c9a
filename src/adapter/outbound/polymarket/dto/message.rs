//! Polymarket market-channel WebSocket message types.
//!
//! The channel sends either a single event object or a JSON array of them.
//! Book snapshots carry full `bids`/`asks` ladders; price-change events
//! carry `best_bid`/`best_ask` per asset.
//!
//! Example book snapshot:
//! ```json
//! [{"event_type":"book","asset_id":"123...","market":"0x...","bids":[{"price":"0.48","size":"10"}],"asks":[...]}]
//! ```

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Quote, TokenId};

/// Subscription request sent to Polymarket WebSocket
#[derive(Debug, Serialize)]
pub struct PolymarketSubscribeMessage {
    pub assets_ids: Vec<String>,
    #[serde(rename = "type")]
    pub msg_type: String,
}

impl PolymarketSubscribeMessage {
    pub fn new(asset_ids: Vec<String>) -> Self {
        Self {
            assets_ids: asset_ids,
            msg_type: "market".into(),
        }
    }
}

/// Top-level frame: one event or a batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PolymarketWsMessage {
    Batch(Vec<PolymarketEvent>),
    Single(PolymarketEvent),
}

impl PolymarketWsMessage {
    /// Every quote this frame carries, in arrival order.
    #[must_use]
    pub fn into_quotes(self, received_at: DateTime<Utc>) -> Vec<Quote> {
        match self {
            Self::Batch(events) => events
                .into_iter()
                .flat_map(|event| event.into_quotes(received_at))
                .collect(),
            Self::Single(event) => event.into_quotes(received_at),
        }
    }
}

/// One market-channel event. Variants are tried in order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PolymarketEvent {
    Book(PolymarketBookMessage),
    PriceChange(PolymarketPriceChangeMessage),
    BestBidAsk(PolymarketBestBidAsk),
    /// Trades, tick-size changes, and anything else.
    Unknown(serde_json::Value),
}

impl PolymarketEvent {
    fn into_quotes(self, received_at: DateTime<Utc>) -> Vec<Quote> {
        match self {
            Self::Book(book) => book.to_quote(received_at).into_iter().collect(),
            Self::PriceChange(change) => change
                .price_changes
                .iter()
                .filter_map(|c| c.top_of_book.to_quote(&c.asset_id, received_at))
                .collect(),
            Self::BestBidAsk(best) => best
                .top_of_book
                .to_quote(&best.asset_id, received_at)
                .into_iter()
                .collect(),
            Self::Unknown(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PolymarketBookMessage {
    pub asset_id: String,
    pub market: Option<String>,
    pub bids: Vec<PolymarketWsPriceLevel>,
    pub asks: Vec<PolymarketWsPriceLevel>,
    pub timestamp: Option<String>,
    pub hash: Option<String>,
}

impl PolymarketBookMessage {
    /// Best bid is the highest bid and best ask the lowest ask, whatever
    /// order the ladder arrives in. `None` when both sides are empty.
    #[must_use]
    pub fn to_quote(&self, received_at: DateTime<Utc>) -> Option<Quote> {
        let bid = self.bids.iter().filter_map(PolymarketWsPriceLevel::price).max();
        let ask = self.asks.iter().filter_map(PolymarketWsPriceLevel::price).min();
        if bid.is_none() && ask.is_none() {
            return None;
        }
        Some(Quote::new(
            TokenId::from(self.asset_id.as_str()),
            bid,
            ask,
            received_at,
        ))
    }
}

/// Price level as received from WebSocket (strings, not decimals)
#[derive(Debug, Clone, Deserialize)]
pub struct PolymarketWsPriceLevel {
    pub price: String,
    pub size: String,
}

impl PolymarketWsPriceLevel {
    fn price(&self) -> Option<Decimal> {
        parse_price(&self.price)
    }
}

#[derive(Debug, Deserialize)]
pub struct PolymarketPriceChangeMessage {
    pub market: Option<String>,
    pub price_changes: Vec<PolymarketPriceChange>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PolymarketPriceChange {
    pub asset_id: String,
    #[serde(flatten)]
    pub top_of_book: TopOfBook,
}

#[derive(Debug, Deserialize)]
pub struct PolymarketBestBidAsk {
    pub asset_id: String,
    #[serde(flatten)]
    pub top_of_book: TopOfBook,
}

/// `best_bid`/`best_ask` pair as strings.
#[derive(Debug, Default, Deserialize)]
pub struct TopOfBook {
    #[serde(default)]
    pub best_bid: Option<String>,
    #[serde(default)]
    pub best_ask: Option<String>,
}

impl TopOfBook {
    fn to_quote(&self, asset_id: &str, received_at: DateTime<Utc>) -> Option<Quote> {
        let bid = self.best_bid.as_deref().and_then(parse_price);
        let ask = self.best_ask.as_deref().and_then(parse_price);
        if bid.is_none() && ask.is_none() {
            return None;
        }
        Some(Quote::new(TokenId::from(asset_id), bid, ask, received_at))
    }
}

/// Positive decimal price; empty, zero, and garbage strings are absent.
fn parse_price(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim())
        .ok()
        .filter(|p| *p > Decimal::ZERO)
}
