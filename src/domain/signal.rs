//! Signal selection: model probability versus market-implied probability.

use std::fmt;

use serde::Serialize;

use super::market::Outcome;

/// What the selector wants to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    BuyUp,
    BuyDown,
    Hold,
}

impl Decision {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuyUp => "buy_up",
            Self::BuyDown => "buy_down",
            Self::Hold => "hold",
        }
    }

    /// Outcome bought by an entry decision; `None` for hold.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::BuyUp => Some(Outcome::Up),
            Self::BuyDown => Some(Outcome::Down),
            Self::Hold => None,
        }
    }

    #[must_use]
    pub const fn is_entry(&self) -> bool {
        !matches!(self, Self::Hold)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which selector rule produced the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalReason {
    SpreadTooWide,
    EdgeUp,
    EdgeDown,
    EdgeTooLow,
}

impl SignalReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SpreadTooWide => "spread_too_wide",
            Self::EdgeUp => "edge_up",
            Self::EdgeDown => "edge_down",
            Self::EdgeTooLow => "edge_too_low",
        }
    }
}

impl fmt::Display for SignalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one selector evaluation. Carries no identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Signal {
    pub p_up_model: f64,
    pub p_up_market: f64,
    pub p_down_market: f64,
    pub edge_up: f64,
    pub edge_down: f64,
    pub chosen_edge: f64,
    pub decision: Decision,
    pub reason: SignalReason,
}

/// Thresholds the selector compares against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalThresholds {
    pub edge_min: f64,
    pub max_spread: f64,
}

impl SignalThresholds {
    #[must_use]
    pub const fn new(edge_min: f64, max_spread: f64) -> Self {
        Self {
            edge_min,
            max_spread,
        }
    }

    /// Same spread bound with an edge threshold nothing can reach.
    #[must_use]
    pub const fn unreachable(self) -> Self {
        Self {
            edge_min: f64::INFINITY,
            max_spread: self.max_spread,
        }
    }
}

/// Pick a decision from the model probability and the up-token midpoint.
///
/// Rules are tried in order and the first match wins: a too-wide spread on
/// either side holds, then an up edge at or above `edge_min` buys up, then a
/// down edge buys down, otherwise hold on low edge.
#[must_use]
pub fn choose_signal(
    p_up_model: f64,
    up_mid: f64,
    thresholds: SignalThresholds,
    up_spread: f64,
    down_spread: f64,
) -> Signal {
    let p_up_market = up_mid;
    let p_down_market = (1.0 - up_mid).max(0.0);
    let edge_up = p_up_model - p_up_market;
    let edge_down = (1.0 - p_up_model) - p_down_market;
    let best_edge = edge_up.max(edge_down);

    let (decision, reason, chosen_edge) =
        if up_spread > thresholds.max_spread || down_spread > thresholds.max_spread {
            (Decision::Hold, SignalReason::SpreadTooWide, best_edge)
        } else if edge_up >= thresholds.edge_min {
            (Decision::BuyUp, SignalReason::EdgeUp, edge_up)
        } else if edge_down >= thresholds.edge_min {
            (Decision::BuyDown, SignalReason::EdgeDown, edge_down)
        } else {
            (Decision::Hold, SignalReason::EdgeTooLow, best_edge)
        };

    Signal {
        p_up_model,
        p_up_market,
        p_down_market,
        edge_up,
        edge_down,
        chosen_edge,
        decision,
        reason,
    }
}
