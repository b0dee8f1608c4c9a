//! Locally simulated execution.
//!
//! Fill status is decided at submission time against the opposing top of
//! book carried on the request. Nothing rests: an unfilled paper order is
//! reported `open` and forgotten.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::{OrderAck, OrderId, OrderRequest, OrderSide, OrderStatus};
use crate::error::Result;
use crate::port::OrderExecutor;

#[derive(Debug, Clone, Default)]
pub struct PaperExecutor {
    fill_epsilon: Decimal,
}

impl PaperExecutor {
    #[must_use]
    pub const fn new(fill_epsilon: Decimal) -> Self {
        Self { fill_epsilon }
    }

    fn status_for(&self, order: &OrderRequest) -> OrderStatus {
        let Some(reference) = order.reference_price else {
            return OrderStatus::Open;
        };
        let crosses = match order.side {
            OrderSide::Buy => order.price + self.fill_epsilon >= reference,
            OrderSide::Sell => order.price - self.fill_epsilon <= reference,
        };
        if crosses {
            OrderStatus::Filled
        } else {
            OrderStatus::Open
        }
    }
}

#[async_trait]
impl OrderExecutor for PaperExecutor {
    async fn place_limit(&self, order: &OrderRequest) -> Result<OrderAck> {
        let status = self.status_for(order);
        let ack = OrderAck::new(OrderId::generate(), status, order.price, order.size);
        debug!(
            order_id = %ack.order_id,
            token = %order.token_id,
            side = %order.side,
            price = %order.price,
            size = %order.size,
            status = %status,
            "Paper order"
        );
        Ok(ack)
    }

    fn name(&self) -> &'static str {
        "paper"
    }
}
