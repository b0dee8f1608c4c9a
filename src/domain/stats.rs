//! Running session statistics, reported once at shutdown.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::reason::TickReason;
use super::signal::Signal;

/// Min/max/mean over a stream of values without keeping them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunningSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    sum: f64,
}

impl RunningSummary {
    pub fn observe(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
        self.sum += value;
        self.count += 1;
    }

    /// Zero when nothing has been observed.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Counters the orchestrator keeps for the end-of-session summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    pub ticks: u64,
    pub reasons: BTreeMap<&'static str, u64>,
    pub edge_up: RunningSummary,
    pub edge_down: RunningSummary,
    pub spread_up: RunningSummary,
    pub spread_down: RunningSummary,
    pub entries: u64,
    pub exits: u64,
    pub execution_failures: u64,
    pub realized_pnl: Decimal,
}

impl SessionStats {
    pub fn record_reason(&mut self, reason: &TickReason) {
        self.ticks += 1;
        *self.reasons.entry(reason.as_str()).or_insert(0) += 1;
    }

    pub fn observe_signal(&mut self, signal: &Signal, up_spread: f64, down_spread: f64) {
        self.edge_up.observe(signal.edge_up);
        self.edge_down.observe(signal.edge_down);
        self.spread_up.observe(up_spread);
        self.spread_down.observe(down_spread);
    }

    pub fn record_entry(&mut self) {
        self.entries += 1;
    }

    pub fn record_exit(&mut self, pnl: Decimal) {
        self.exits += 1;
        self.realized_pnl += pnl;
    }

    pub fn record_execution_failure(&mut self) {
        self.execution_failures += 1;
    }

    #[must_use]
    pub fn reason_count(&self, code: &str) -> u64 {
        self.reasons.get(code).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::SignalReason;

    #[test]
    fn running_summary_tracks_extremes() {
        let mut summary = RunningSummary::default();
        assert_eq!(summary.mean(), 0.0);
        for v in [0.02, -0.01, 0.05] {
            summary.observe(v);
        }
        assert_eq!(summary.count, 3);
        assert_eq!(summary.min, -0.01);
        assert_eq!(summary.max, 0.05);
        assert!((summary.mean() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn reasons_are_counted_by_code() {
        let mut stats = SessionStats::default();
        stats.record_reason(&TickReason::NoOrderbook);
        stats.record_reason(&TickReason::NoOrderbook);
        stats.record_reason(&SignalReason::EdgeTooLow.into());

        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.reason_count("no_orderbook"), 2);
        assert_eq!(stats.reason_count("edge_too_low"), 1);
        assert_eq!(stats.reason_count("edge_up"), 0);
    }
}
