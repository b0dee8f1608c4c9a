//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Order   │            │   Market    │              │  Event    │
//! │Executor │            │  Resolver   │              │ Recorder  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`OrderExecutor`] - Paper or live limit order placement
//! - [`MarketResolver`] - Market discovery
//! - [`EventRecorder`] - Append-only session record

pub mod outbound;

pub use outbound::exchange::{MarketResolver, OrderExecutor};
pub use outbound::recorder::EventRecorder;
