//! Signal, model, and exit settings.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::{ExitRule, MomentumVolModel, SignalThresholds};

/// Tunables for the per-tick decision.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyConfig {
    /// Minimum edge (probability points) to enter.
    #[serde(default = "default_edge_min")]
    pub edge_min: f64,
    /// Maximum spread tolerated on either side.
    #[serde(default = "default_max_spread")]
    pub max_spread: f64,
    /// Lookback for momentum, in samples.
    #[serde(default = "default_momentum_window")]
    pub momentum_window: usize,
    /// Number of returns in the realized volatility estimate.
    #[serde(default = "default_vol_window")]
    pub vol_window: usize,
    /// Reference prices kept in the ring buffer.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Seconds between ticks.
    #[serde(default = "default_loop_interval_seconds")]
    pub loop_interval_seconds: f64,
    #[serde(default)]
    pub allow_cross_window_positions: bool,
    #[serde(default = "default_profit_take_bps")]
    pub profit_take_bps: u32,
    #[serde(default = "default_time_stop_seconds")]
    pub time_stop_seconds: u64,
}

fn default_edge_min() -> f64 {
    0.04
}

fn default_max_spread() -> f64 {
    0.03
}

fn default_momentum_window() -> usize {
    40
}

fn default_vol_window() -> usize {
    60
}

fn default_history_capacity() -> usize {
    5000
}

fn default_loop_interval_seconds() -> f64 {
    1.0
}

fn default_profit_take_bps() -> u32 {
    300
}

fn default_time_stop_seconds() -> u64 {
    180
}

impl StrategyConfig {
    #[must_use]
    pub fn thresholds(&self) -> SignalThresholds {
        SignalThresholds::new(self.edge_min, self.max_spread)
    }

    #[must_use]
    pub fn model(&self) -> MomentumVolModel {
        MomentumVolModel::new(self.momentum_window, self.vol_window)
    }

    #[must_use]
    pub fn exit_rule(&self) -> ExitRule {
        ExitRule::new(self.profit_take_bps, self.time_stop_seconds)
    }

    /// Tick period. Only meaningful after validation (positive, finite).
    #[must_use]
    pub fn loop_interval(&self) -> Duration {
        Duration::from_secs_f64(self.loop_interval_seconds)
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            edge_min: default_edge_min(),
            max_spread: default_max_spread(),
            momentum_window: default_momentum_window(),
            vol_window: default_vol_window(),
            history_capacity: default_history_capacity(),
            loop_interval_seconds: default_loop_interval_seconds(),
            allow_cross_window_positions: false,
            profit_take_bps: default_profit_take_bps(),
            time_stop_seconds: default_time_stop_seconds(),
        }
    }
}
