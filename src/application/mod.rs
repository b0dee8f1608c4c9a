//! Application services: the stateful decision core.
//!
//! These services drive the pure domain functions and coordinate the
//! outbound ports once per tick.

pub mod continuity;
pub mod orchestrator;
pub mod position;
pub mod risk;
pub mod snapshot;

pub use continuity::{MarketContinuity, RotationOutcome};
pub use orchestrator::{Collaborators, Orchestrator, SessionSummary, TickOutcome, TradingSettings};
pub use position::PositionLifecycle;
pub use risk::{RiskCheckResult, RiskLimits, RiskManager, RiskState};
pub use snapshot::{PriceFeed, QuoteBoard, QuoteFeed, QuoteTarget};
