//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! - [`executor`] - `ScriptedExecutor`, an [`OrderExecutor`](crate::port::OrderExecutor)
//!   that replays scripted statuses and records every request.
//! - [`resolver`] - `ScriptedResolver` for market discovery.
//! - [`recorder`] - `RecordingRecorder`, an in-memory event sink.
//! - [`domain`] - Builders for markets, quotes, and price paths.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod executor;
pub mod recorder;
pub mod resolver;
