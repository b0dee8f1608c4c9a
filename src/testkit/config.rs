//! Canonical test configurations.

use rust_decimal_macros::dec;

use crate::application::{RiskLimits, TradingSettings};
use crate::domain::{ExecutionMode, ExitRule, MomentumVolModel, SignalThresholds};
use crate::infrastructure::config::reconnection::ReconnectionConfig;

/// Reconnection config with zero delays, so nothing waits in tests.
pub fn reconnection() -> ReconnectionConfig {
    ReconnectionConfig {
        initial_delay_ms: 0,
        max_delay_ms: 0,
        backoff_multiplier: 1.0,
    }
}

/// Default risk limits: $30 max exposure, $20 daily loss, 45s cooldown.
pub fn risk_limits() -> RiskLimits {
    RiskLimits {
        max_position_usd: dec!(30),
        daily_loss_limit_usd: dec!(20),
        cooldown_seconds: 45,
    }
}

/// Paper settings with the shipped defaults and small model windows
/// (momentum 3, volatility 3) so short price paths produce a signal.
pub fn trading_settings() -> TradingSettings {
    TradingSettings {
        mode: ExecutionMode::Paper,
        thresholds: SignalThresholds::new(0.04, 0.03),
        model: MomentumVolModel::new(3, 3),
        exit: ExitRule::new(300, 180),
        risk: risk_limits(),
        order_size_usd: dec!(10),
        allow_cross_window_positions: false,
    }
}
