//! Momentum/volatility probability model.
//!
//! Turns the recent reference price path into a probability that the next
//! window closes up: a linear score rewarding momentum and penalizing
//! realized volatility, squashed through a logistic and clamped away from
//! certainty.

/// Lower clamp for model probabilities.
pub const MIN_PROBABILITY: f64 = 0.01;
/// Upper clamp for model probabilities.
pub const MAX_PROBABILITY: f64 = 0.99;
/// Returned whenever there is not enough usable history.
pub const NEUTRAL_PROBABILITY: f64 = 0.5;

const MOMENTUM_WEIGHT: f64 = 180.0;
const VOLATILITY_PENALTY: f64 = 20.0;

/// Pure function of the price path; holds only its window sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MomentumVolModel {
    momentum_window: usize,
    vol_window: usize,
}

impl MomentumVolModel {
    /// Windows below one are bumped to one.
    #[must_use]
    pub fn new(momentum_window: usize, vol_window: usize) -> Self {
        Self {
            momentum_window: momentum_window.max(1),
            vol_window: vol_window.max(1),
        }
    }

    #[must_use]
    pub const fn momentum_window(&self) -> usize {
        self.momentum_window
    }

    #[must_use]
    pub const fn vol_window(&self) -> usize {
        self.vol_window
    }

    /// Minimum number of prices needed before the model leaves neutral.
    #[must_use]
    pub fn required_len(&self) -> usize {
        self.momentum_window.max(self.vol_window) + 2
    }

    /// Probability in `[0.01, 0.99]` that the next window closes up.
    ///
    /// `prices` is ordered oldest first. Short histories return exactly 0.5,
    /// as do histories containing a non-positive or non-finite price.
    #[must_use]
    pub fn predict_up_probability(&self, prices: &[f64]) -> f64 {
        let n = prices.len();
        if n < self.required_len() {
            return NEUTRAL_PROBABILITY;
        }
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return NEUTRAL_PROBABILITY;
        }

        let latest = prices[n - 1];
        let anchor = prices[n - self.momentum_window];
        let momentum = (latest - anchor) / anchor;

        let squared_returns: f64 = (n - self.vol_window..n)
            .map(|i| {
                let r = (prices[i] - prices[i - 1]) / prices[i - 1];
                r * r
            })
            .sum();
        let realized_vol = (squared_returns / self.vol_window as f64).sqrt();

        let score = momentum * MOMENTUM_WEIGHT - realized_vol * VOLATILITY_PENALTY;
        logistic(score).clamp(MIN_PROBABILITY, MAX_PROBABILITY)
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
