//! Append-only event records handed to the observability sink.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::id::{MarketSlug, OrderId, TokenId};
use super::order::{ExecutionMode, OrderAck, OrderRequest, OrderSide, OrderStatus};
use super::position::{ExitReason, Position};
use super::quote::Quote;
use super::reason::TickReason;
use super::signal::{Decision, Signal};

/// Flattened view of a quote at tick time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuoteSnapshot {
    pub bid: Option<Decimal>,
    pub ask: Option<Decimal>,
    pub mid: Decimal,
}

impl From<&Quote> for QuoteSnapshot {
    fn from(quote: &Quote) -> Self {
        Self {
            bid: quote.bid(),
            ask: quote.ask(),
            mid: quote.mid(),
        }
    }
}

/// Everything observed and decided during one tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickRecord {
    pub timestamp: DateTime<Utc>,
    pub market: MarketSlug,
    pub up_token_id: TokenId,
    pub down_token_id: TokenId,
    pub reference_price: f64,
    pub up: QuoteSnapshot,
    pub down: QuoteSnapshot,
    pub signal: Signal,
    /// Decision after any open-position override.
    pub decision: Decision,
    pub reason: TickReason,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub timestamp: DateTime<Utc>,
    pub market: MarketSlug,
    pub mode: ExecutionMode,
    pub token_id: TokenId,
    pub side: OrderSide,
    pub price: Decimal,
    pub size: Decimal,
    pub status: OrderStatus,
    /// Signal reason for entries, exit reason for exits.
    pub reason: &'static str,
}

impl OrderRecord {
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        market: MarketSlug,
        mode: ExecutionMode,
        request: &OrderRequest,
        ack: &OrderAck,
        reason: &'static str,
    ) -> Self {
        Self {
            order_id: ack.order_id.clone(),
            timestamp,
            market,
            mode,
            token_id: request.token_id.clone(),
            side: request.side,
            price: request.price,
            size: request.size,
            status: ack.status,
            reason,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FillRecord {
    pub order_id: OrderId,
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
    pub size: Decimal,
}

impl FillRecord {
    #[must_use]
    pub fn from_ack(ack: &OrderAck, timestamp: DateTime<Utc>) -> Self {
        Self {
            order_id: ack.order_id.clone(),
            timestamp,
            price: ack.price,
            size: ack.size,
        }
    }
}

/// Closing leg of a position, keyed by the entry order id.
#[derive(Debug, Clone, Serialize)]
pub struct PositionClose {
    pub entry_order_id: OrderId,
    pub closed_at: DateTime<Utc>,
    pub exit_reason: ExitReason,
    pub exit_price: Decimal,
    pub pnl: Decimal,
}

impl PositionClose {
    #[must_use]
    pub fn new(position: &Position, exit_reason: ExitReason, exit_price: Decimal, closed_at: DateTime<Utc>) -> Self {
        Self {
            entry_order_id: position.order_id.clone(),
            closed_at,
            exit_reason,
            exit_price,
            pnl: position.pnl_at(exit_price),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PnlRecord {
    pub timestamp: DateTime<Utc>,
    pub realized: Decimal,
    pub unrealized: Decimal,
    pub exposure: Decimal,
}

/// A non-fatal failure worth keeping next to the trading record.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    pub timestamp: DateTime<Utc>,
    pub source: &'static str,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(timestamp: DateTime<Utc>, source: &'static str, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            source,
            message: message.into(),
        }
    }
}
