//! Single-slot position lifecycle: empty, open, empty again.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::{ExitReason, ExitRule, Position, PositionError};

/// Holds at most one open position and decides when it exits.
///
/// Owned by the orchestrator; a position only enters the slot after an
/// entry fill and only leaves it after an exit fill.
#[derive(Debug, Clone)]
pub struct PositionLifecycle {
    rule: ExitRule,
    current: Option<Position>,
}

impl PositionLifecycle {
    #[must_use]
    pub const fn new(rule: ExitRule) -> Self {
        Self {
            rule,
            current: None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Position> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn rule(&self) -> &ExitRule {
        &self.rule
    }

    /// Exit trigger for the open position at the held token's mid.
    #[must_use]
    pub fn exit_signal(&self, mid: Decimal, now: DateTime<Utc>) -> Option<ExitReason> {
        self.current
            .as_ref()
            .and_then(|position| self.rule.evaluate(position, mid, now))
    }

    /// Fill the empty slot.
    pub fn open(&mut self, position: Position) -> Result<(), PositionError> {
        if let Some(existing) = &self.current {
            return Err(PositionError::AlreadyOpen {
                token_id: existing.token_id.clone(),
                order_id: existing.order_id.clone(),
            });
        }
        self.current = Some(position);
        Ok(())
    }

    /// Empty the slot, returning the closed position.
    pub fn close(&mut self) -> Result<Position, PositionError> {
        self.current.take().ok_or(PositionError::NoneOpen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderId, Outcome};
    use rust_decimal_macros::dec;

    fn position(order: &str, entry_time: DateTime<Utc>) -> Position {
        Position {
            market: "btc-5m".into(),
            token_id: "up".into(),
            outcome: Outcome::Up,
            quantity: dec!(25),
            entry_price: dec!(0.40),
            notional: dec!(10),
            entry_time,
            order_id: OrderId::new(order),
        }
    }

    #[test]
    fn second_open_is_rejected() {
        let now = Utc::now();
        let mut lifecycle = PositionLifecycle::new(ExitRule::new(300, 180));
        lifecycle.open(position("a", now)).unwrap();

        let err = lifecycle.open(position("b", now)).unwrap_err();
        assert!(matches!(err, PositionError::AlreadyOpen { .. }));
        assert_eq!(lifecycle.current().unwrap().order_id.as_str(), "a");
    }

    #[test]
    fn close_empties_slot_once() {
        let mut lifecycle = PositionLifecycle::new(ExitRule::new(300, 180));
        lifecycle.open(position("a", Utc::now())).unwrap();

        assert_eq!(lifecycle.close().unwrap().order_id.as_str(), "a");
        assert!(!lifecycle.is_open());
        assert_eq!(lifecycle.close().unwrap_err(), PositionError::NoneOpen);
    }

    #[test]
    fn exit_signal_requires_open_position() {
        let now = Utc::now();
        let mut lifecycle = PositionLifecycle::new(ExitRule::new(300, 180));
        assert_eq!(lifecycle.exit_signal(dec!(0.99), now), None);

        lifecycle.open(position("a", now)).unwrap();
        assert_eq!(
            lifecycle.exit_signal(dec!(0.412), now),
            Some(ExitReason::ProfitTake)
        );
        assert_eq!(lifecycle.exit_signal(dec!(0.41), now), None);
    }
}
