//! Exchange-agnostic domain types and the pure decision functions.

pub mod id;
pub mod market;
pub mod model;
pub mod order;
pub mod position;
pub mod price;
pub mod quote;
pub mod reason;
pub mod record;
pub mod signal;
pub mod stats;

pub use id::{MarketSlug, OrderId, TokenId};
pub use market::{MarketHandle, Outcome};
pub use model::MomentumVolModel;
pub use order::{ExecutionMode, OrderAck, OrderRequest, OrderSide, OrderStatus};
pub use position::{saturating_seconds, ExitReason, ExitRule, Position, PositionError};
pub use price::{PriceHistory, PriceSample};
pub use quote::Quote;
pub use reason::TickReason;
pub use signal::{choose_signal, Decision, Signal, SignalReason, SignalThresholds};
pub use stats::SessionStats;
