//! Driftline - model-vs-market edge trading for binary up/down markets.
//!
//! A reference spot price (Binance trades) drives a momentum/volatility
//! model of the "up" outcome. Each tick compares that probability with the
//! prediction market's mid price, gates entries through risk limits, and
//! manages a single position through profit-take and time-stop exits.
//!
//! # Architecture
//!
//! - [`domain`] - Pure types and functions: quotes, price history, the
//!   probability model, the signal selector, positions, reason codes
//! - [`port`] - Collaborator traits: order execution, market resolution,
//!   event recording
//! - [`application`] - The stateful core: risk manager, position
//!   lifecycle, market continuity, and the per-tick orchestrator
//! - [`adapter`] - Binance and Polymarket feeds, Gamma discovery, paper and
//!   live executors, the SQLite recorder, and the CLI
//! - [`infrastructure`] - Configuration, logging, reconnect backoff, and
//!   the session runtime
//!
//! # Features
//!
//! - `polymarket` (default) - Live order placement through the Polymarket CLOB
//! - `testkit` - Scripted collaborators for integration tests

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
