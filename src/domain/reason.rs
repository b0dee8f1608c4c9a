//! Per-tick reason codes, one closed set across signal, position, and risk.

use std::fmt;

use serde::{Serialize, Serializer};

use super::signal::SignalReason;
use crate::error::RiskError;

/// Why a tick ended the way it did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickReason {
    /// A reference price or one of the two quotes was missing.
    NoOrderbook,
    Signal(SignalReason),
    /// An entry signal was suppressed because a position is still open.
    PositionOpenOldWindow,
    Risk(RiskError),
}

impl TickReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoOrderbook => "no_orderbook",
            Self::Signal(reason) => reason.as_str(),
            Self::PositionOpenOldWindow => "position_open_old_window",
            Self::Risk(err) => err.code(),
        }
    }
}

impl From<SignalReason> for TickReason {
    fn from(reason: SignalReason) -> Self {
        Self::Signal(reason)
    }
}

impl From<RiskError> for TickReason {
    fn from(err: RiskError) -> Self {
        Self::Risk(err)
    }
}

impl fmt::Display for TickReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TickReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn codes_cover_every_layer() {
        assert_eq!(TickReason::NoOrderbook.as_str(), "no_orderbook");
        assert_eq!(TickReason::from(SignalReason::EdgeDown).as_str(), "edge_down");
        assert_eq!(
            TickReason::PositionOpenOldWindow.to_string(),
            "position_open_old_window"
        );
        let risk = TickReason::from(RiskError::MaxExposureHit {
            current: dec!(30),
            additional: dec!(10),
            limit: dec!(30),
        });
        assert_eq!(risk.as_str(), "max_exposure_hit");
    }
}
