//! The single open position and its exit rules.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::id::{MarketSlug, OrderId, TokenId};
use super::market::Outcome;

/// Errors raised by the position slot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    #[error("a position is already open on {token_id} (order {order_id})")]
    AlreadyOpen { token_id: TokenId, order_id: OrderId },

    #[error("no position is open")]
    NoneOpen,
}

/// A filled entry that has not yet been exited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    pub market: MarketSlug,
    pub token_id: TokenId,
    pub outcome: Outcome,
    pub quantity: Decimal,
    pub entry_price: Decimal,
    /// Dollar amount charged against exposure when the position opened.
    pub notional: Decimal,
    pub entry_time: DateTime<Utc>,
    pub order_id: OrderId,
}

impl Position {
    /// Realized profit for selling the full quantity at `exit_price`.
    #[must_use]
    pub fn pnl_at(&self, exit_price: Decimal) -> Decimal {
        (exit_price - self.entry_price) * self.quantity
    }
}

/// Why a position is being closed. There is no third path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    ProfitTake,
    TimeStop,
}

impl ExitReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ProfitTake => "profit_take",
            Self::TimeStop => "time_stop",
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profit-take and time-stop thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitRule {
    pub profit_take_bps: u32,
    pub time_stop_seconds: u64,
}

impl ExitRule {
    #[must_use]
    pub const fn new(profit_take_bps: u32, time_stop_seconds: u64) -> Self {
        Self {
            profit_take_bps,
            time_stop_seconds,
        }
    }

    /// Mid price at which a position is taken off for profit.
    #[must_use]
    pub fn target_price(&self, entry_price: Decimal) -> Decimal {
        entry_price * (Decimal::ONE + Decimal::from(self.profit_take_bps) / Decimal::from(10_000))
    }

    /// First matching trigger wins: profit take, then time stop.
    #[must_use]
    pub fn evaluate(&self, position: &Position, mid: Decimal, now: DateTime<Utc>) -> Option<ExitReason> {
        if mid >= self.target_price(position.entry_price) {
            return Some(ExitReason::ProfitTake);
        }
        let elapsed = now - position.entry_time;
        let time_stop = saturating_seconds(self.time_stop_seconds);
        if elapsed >= time_stop {
            return Some(ExitReason::TimeStop);
        }
        None
    }
}

/// `secs` as a signed duration, saturating at the largest representable span.
#[must_use]
pub fn saturating_seconds(secs: u64) -> chrono::Duration {
    i64::try_from(secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .unwrap_or(chrono::Duration::MAX)
}
