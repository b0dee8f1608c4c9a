//! Risk management configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::application::risk::RiskLimits;

/// Order sizing and risk guardrails, all in USD.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Notional of every entry order.
    #[serde(default = "default_order_size_usd")]
    pub order_size_usd: Decimal,
    /// Cap on open exposure.
    #[serde(default = "default_max_position_usd")]
    pub max_position_usd: Decimal,
    /// Entries stop once realized PnL falls to minus this amount.
    #[serde(default = "default_daily_loss_limit_usd")]
    pub daily_loss_limit_usd: Decimal,
    /// Minimum seconds between trades.
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,
}

fn default_order_size_usd() -> Decimal {
    dec!(10)
}

fn default_max_position_usd() -> Decimal {
    dec!(30)
}

fn default_daily_loss_limit_usd() -> Decimal {
    dec!(20)
}

fn default_cooldown_seconds() -> u64 {
    45
}

impl RiskConfig {
    #[must_use]
    pub fn limits(&self) -> RiskLimits {
        RiskLimits {
            max_position_usd: self.max_position_usd,
            daily_loss_limit_usd: self.daily_loss_limit_usd,
            cooldown_seconds: self.cooldown_seconds,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            order_size_usd: default_order_size_usd(),
            max_position_usd: default_max_position_usd(),
            daily_loss_limit_usd: default_daily_loss_limit_usd(),
            cooldown_seconds: default_cooldown_seconds(),
        }
    }
}
