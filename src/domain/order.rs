//! Limit order requests and executor acknowledgements.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, TokenId};

/// Where orders go: simulated locally or sent to the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    #[default]
    Paper,
    Live,
}

impl ExecutionMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status reported synchronously by the executor.
///
/// `Submitted` is what the live venue path returns; it is never reconciled
/// into a fill afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Filled,
    Submitted,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Filled => "filled",
            Self::Submitted => "submitted",
        }
    }

    #[must_use]
    pub const fn is_filled(&self) -> bool {
        matches!(self, Self::Filled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A limit order the orchestrator wants placed.
///
/// `reference_price` is the opposing top-of-book price at submission time
/// (ask for buys, bid for sells); paper execution fills against it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub token_id: TokenId,
    pub side: OrderSide,
    pub price: Decimal,
    pub size: Decimal,
    pub reference_price: Option<Decimal>,
}

impl OrderRequest {
    #[must_use]
    pub fn buy(token_id: TokenId, price: Decimal, size: Decimal, reference_price: Option<Decimal>) -> Self {
        Self {
            token_id,
            side: OrderSide::Buy,
            price,
            size,
            reference_price,
        }
    }

    #[must_use]
    pub fn sell(token_id: TokenId, price: Decimal, size: Decimal, reference_price: Option<Decimal>) -> Self {
        Self {
            token_id,
            side: OrderSide::Sell,
            price,
            size,
            reference_price,
        }
    }

    /// Dollar value at the limit price.
    #[must_use]
    pub fn notional(&self) -> Decimal {
        self.price * self.size
    }
}

/// What the executor reports back for a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAck {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub price: Decimal,
    pub size: Decimal,
}

impl OrderAck {
    #[must_use]
    pub fn new(order_id: OrderId, status: OrderStatus, price: Decimal, size: Decimal) -> Self {
        Self {
            order_id,
            status,
            price,
            size,
        }
    }

    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.status.is_filled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn notional_is_price_times_size() {
        let order = OrderRequest::buy("up".into(), dec!(0.40), dec!(25), Some(dec!(0.40)));
        assert_eq!(order.notional(), dec!(10.00));
        assert_eq!(order.side, OrderSide::Buy);
    }

    #[test]
    fn only_filled_counts_as_fill() {
        assert!(OrderStatus::Filled.is_filled());
        assert!(!OrderStatus::Open.is_filled());
        assert!(!OrderStatus::Submitted.is_filled());
    }

    #[test]
    fn mode_parses_lowercase() {
        let mode: ExecutionMode = serde_json::from_str("\"live\"").unwrap();
        assert_eq!(mode, ExecutionMode::Live);
        assert_eq!(ExecutionMode::default(), ExecutionMode::Paper);
    }
}
