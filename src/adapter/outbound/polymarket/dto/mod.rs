//! Polymarket data transfer objects.
//!
//! Contains types for API and WebSocket communication:
//! - WebSocket messages (subscriptions, book snapshots, price changes)
//! - Gamma REST responses (market listing)

pub mod message;
pub mod response;
