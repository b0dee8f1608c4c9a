//! Risk gate: exposure cap, daily loss limit, and trade cooldown.
//!
//! Owned by the orchestrator and mutated only inside the tick body.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::error::RiskError;

/// Result of a risk check.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskCheckResult {
    /// Entry is approved.
    Approved,
    /// Entry is rejected with a reason.
    Rejected(RiskError),
}

impl RiskCheckResult {
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    #[must_use]
    pub const fn rejection_error(&self) -> Option<&RiskError> {
        match self {
            Self::Approved => None,
            Self::Rejected(err) => Some(err),
        }
    }
}

/// Configured guardrails.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskLimits {
    pub max_position_usd: Decimal,
    pub daily_loss_limit_usd: Decimal,
    pub cooldown_seconds: u64,
}

/// Mutable risk bookkeeping. `exposure_usd` never goes below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskState {
    pub exposure_usd: Decimal,
    pub realized_pnl_usd: Decimal,
    pub last_trade_at: Option<DateTime<Utc>>,
    pub day_start: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RiskManager {
    limits: RiskLimits,
    state: RiskState,
}

impl RiskManager {
    #[must_use]
    pub fn new(limits: RiskLimits, now: DateTime<Utc>) -> Self {
        Self {
            limits,
            state: RiskState {
                exposure_usd: Decimal::ZERO,
                realized_pnl_usd: Decimal::ZERO,
                last_trade_at: None,
                day_start: now,
            },
        }
    }

    /// Start from an existing state.
    #[must_use]
    pub fn with_state(limits: RiskLimits, state: RiskState) -> Self {
        Self { limits, state }
    }

    #[must_use]
    pub const fn state(&self) -> &RiskState {
        &self.state
    }

    #[must_use]
    pub const fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Check whether a new entry of `notional_usd` may open.
    ///
    /// Rolls the daily window first, then the first blocking condition
    /// wins: daily loss, exposure, cooldown.
    pub fn can_open(&mut self, notional_usd: Decimal, now: DateTime<Utc>) -> RiskCheckResult {
        self.roll_day(now);

        let limit = self.limits.daily_loss_limit_usd.abs();
        if self.state.realized_pnl_usd <= -limit {
            return RiskCheckResult::Rejected(RiskError::DailyLossLimitHit {
                realized: self.state.realized_pnl_usd,
                limit,
            });
        }

        if self.state.exposure_usd + notional_usd > self.limits.max_position_usd {
            return RiskCheckResult::Rejected(RiskError::MaxExposureHit {
                current: self.state.exposure_usd,
                additional: notional_usd,
                limit: self.limits.max_position_usd,
            });
        }

        if let Some(last) = self.state.last_trade_at {
            let elapsed = now - last;
            let cooldown_ms = i64::try_from(self.limits.cooldown_seconds)
                .unwrap_or(i64::MAX / 1000)
                .saturating_mul(1000);
            if elapsed.num_milliseconds() < cooldown_ms {
                return RiskCheckResult::Rejected(RiskError::CooldownActive {
                    elapsed_secs: elapsed.num_seconds(),
                    cooldown_secs: self.limits.cooldown_seconds,
                });
            }
        }

        RiskCheckResult::Approved
    }

    /// Book a filled entry.
    pub fn on_open(&mut self, notional_usd: Decimal, now: DateTime<Utc>) {
        self.state.exposure_usd += notional_usd;
        self.state.last_trade_at = Some(now);
    }

    /// Book a filled exit.
    pub fn on_close(&mut self, notional_usd: Decimal, pnl_usd: Decimal, now: DateTime<Utc>) {
        self.state.exposure_usd = (self.state.exposure_usd - notional_usd).max(Decimal::ZERO);
        self.state.realized_pnl_usd += pnl_usd;
        self.state.last_trade_at = Some(now);
    }

    /// Rolling 24h window measured from the last reset, not calendar days.
    fn roll_day(&mut self, now: DateTime<Utc>) {
        if now - self.state.day_start > Duration::hours(24) {
            info!(
                realized = %self.state.realized_pnl_usd,
                "Daily risk window reset"
            );
            self.state.realized_pnl_usd = Decimal::ZERO;
            self.state.day_start = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn limits() -> RiskLimits {
        RiskLimits {
            max_position_usd: dec!(30),
            daily_loss_limit_usd: dec!(20),
            cooldown_seconds: 45,
        }
    }

    #[test]
    fn fresh_manager_approves() {
        let now = Utc::now();
        let mut risk = RiskManager::new(limits(), now);
        assert!(risk.can_open(dec!(10), now).is_approved());
    }

    #[test]
    fn exposure_cap_blocks() {
        let now = Utc::now();
        let mut risk = RiskManager::new(limits(), now);
        risk.on_open(dec!(25), now - Duration::seconds(100));

        let result = risk.can_open(dec!(10), now);
        assert_eq!(
            result.rejection_error().map(RiskError::code),
            Some("max_exposure_hit")
        );
    }

    #[test]
    fn cooldown_blocks_until_elapsed() {
        let now = Utc::now();
        let mut risk = RiskManager::new(limits(), now);
        risk.on_open(dec!(10), now);

        let blocked = risk.can_open(dec!(10), now + Duration::seconds(44));
        assert!(matches!(
            blocked,
            RiskCheckResult::Rejected(RiskError::CooldownActive { .. })
        ));
        assert!(risk
            .can_open(dec!(10), now + Duration::seconds(45))
            .is_approved());
    }

    #[test]
    fn loss_limit_wins_over_everything() {
        let now = Utc::now();
        let mut risk = RiskManager::new(limits(), now);
        risk.on_open(dec!(30), now);
        risk.on_close(dec!(0), dec!(-20.01), now);

        let result = risk.can_open(dec!(1), now);
        assert_eq!(
            result.rejection_error().map(RiskError::code),
            Some("daily_loss_limit_hit")
        );
    }

    #[test]
    fn exposure_never_negative() {
        let now = Utc::now();
        let mut risk = RiskManager::new(limits(), now);
        risk.on_open(dec!(10), now);
        risk.on_close(dec!(25), dec!(1), now);
        assert_eq!(risk.state().exposure_usd, Decimal::ZERO);
    }

    #[test]
    fn daily_window_rolls_after_24h() {
        let start = Utc::now();
        let mut risk = RiskManager::new(limits(), start);
        risk.on_close(dec!(0), dec!(-25), start);
        assert!(!risk.can_open(dec!(1), start).is_approved());

        let later = start + Duration::hours(24) + Duration::seconds(1);
        assert!(risk.can_open(dec!(1), later).is_approved());
        assert_eq!(risk.state().realized_pnl_usd, Decimal::ZERO);
        assert_eq!(risk.state().day_start, later);
    }
}
