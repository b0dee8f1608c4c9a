//! Scripted order executor.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{OrderAck, OrderId, OrderRequest, OrderStatus};
use crate::error::{ExecutionError, Result};
use crate::port::OrderExecutor;

/// One scripted response.
#[derive(Debug, Clone)]
pub enum Scripted {
    Status(OrderStatus),
    Fail(String),
}

/// Replays scripted statuses in order (then `Filled` forever) and keeps
/// every request it receives. Acks echo the request's price and size.
#[derive(Default)]
pub struct ScriptedExecutor {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<OrderRequest>>,
    calls: Arc<AtomicU32>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    /// Queue more responses.
    pub fn push(&self, response: Scripted) {
        self.script.lock().push_back(response);
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl OrderExecutor for ScriptedExecutor {
    async fn place_limit(&self, order: &OrderRequest) -> Result<OrderAck> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(order.clone());

        let next = self
            .script
            .lock()
            .pop_front()
            .unwrap_or(Scripted::Status(OrderStatus::Filled));
        match next {
            Scripted::Status(status) => Ok(OrderAck::new(
                OrderId::new(format!("order-{n}")),
                status,
                order.price,
                order.size,
            )),
            Scripted::Fail(reason) => Err(ExecutionError::SubmissionFailed(reason).into()),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
