//! Venue ports: order placement and market discovery.
//!
//! These are the two network-facing collaborators the decision core calls
//! directly. Feeds are not ports; they write into snapshot cells instead.

use async_trait::async_trait;

use crate::domain::{market::MarketHandle, order::OrderAck, order::OrderRequest};
use crate::error::Error;

/// Places limit orders and reports their status synchronously.
#[async_trait]
pub trait OrderExecutor: Send + Sync {
    /// Submit a limit order.
    ///
    /// The returned status is final from the caller's point of view;
    /// nothing reconciles a `submitted` order later.
    async fn place_limit(&self, order: &OrderRequest) -> Result<OrderAck, Error>;

    /// Executor name for logging/debugging.
    fn name(&self) -> &'static str;
}

/// Point-in-time lookup of the market window to trade.
#[async_trait]
pub trait MarketResolver: Send + Sync {
    /// Resolve the current market.
    ///
    /// `Ok(None)` means the lookup worked but nothing matched.
    async fn resolve(&self) -> Result<Option<MarketHandle>, Error>;
}
