//! Top-of-book quotes for outcome tokens.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::TokenId;

/// Best bid and best ask for one outcome token.
///
/// Either side may be missing when the book is one-sided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    token_id: TokenId,
    bid: Option<Decimal>,
    ask: Option<Decimal>,
    updated_at: DateTime<Utc>,
}

impl Quote {
    pub fn new(
        token_id: TokenId,
        bid: Option<Decimal>,
        ask: Option<Decimal>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token_id,
            bid,
            ask,
            updated_at,
        }
    }

    /// Two-sided quote, the common case.
    pub fn two_sided(token_id: TokenId, bid: Decimal, ask: Decimal, updated_at: DateTime<Utc>) -> Self {
        Self::new(token_id, Some(bid), Some(ask), updated_at)
    }

    #[must_use]
    pub const fn token_id(&self) -> &TokenId {
        &self.token_id
    }

    #[must_use]
    pub const fn bid(&self) -> Option<Decimal> {
        self.bid
    }

    #[must_use]
    pub const fn ask(&self) -> Option<Decimal> {
        self.ask
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Midpoint of bid and ask, or zero when either side is absent.
    #[must_use]
    pub fn mid(&self) -> Decimal {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => (bid + ask) / Decimal::TWO,
            _ => Decimal::ZERO,
        }
    }

    /// Non-negative spread, `max(ask - bid, 0)`, when both sides are quoted.
    ///
    /// A one-sided book is not priced by that formula. Reading the missing
    /// side as zero would let an empty ask pass as a zero spread, so the
    /// full unit width is reported instead and the book never passes a
    /// spread filter below 1.
    #[must_use]
    pub fn spread(&self) -> Decimal {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => (ask - bid).max(Decimal::ZERO),
            _ => Decimal::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(bid: Option<Decimal>, ask: Option<Decimal>) -> Quote {
        Quote::new(TokenId::from("up"), bid, ask, Utc::now())
    }

    #[test]
    fn mid_averages_both_sides() {
        let q = quote(Some(dec!(0.49)), Some(dec!(0.51)));
        assert_eq!(q.mid(), dec!(0.50));
        assert_eq!(q.spread(), dec!(0.02));
    }

    #[test]
    fn mid_is_zero_when_a_side_is_missing() {
        assert_eq!(quote(None, Some(dec!(0.51))).mid(), Decimal::ZERO);
        assert_eq!(quote(Some(dec!(0.49)), None).mid(), Decimal::ZERO);
    }

    #[test]
    fn crossed_book_has_zero_spread() {
        let q = quote(Some(dec!(0.52)), Some(dec!(0.50)));
        assert_eq!(q.spread(), Decimal::ZERO);
    }

    #[test]
    fn one_sided_book_has_unit_spread() {
        assert_eq!(quote(None, Some(dec!(0.5))).spread(), Decimal::ONE);
        assert_eq!(quote(Some(dec!(0.5)), None).spread(), Decimal::ONE);
    }
}
