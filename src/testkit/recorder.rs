//! In-memory event sink.

use parking_lot::Mutex;

use crate::domain::position::Position;
use crate::domain::record::{
    ErrorRecord, FillRecord, OrderRecord, PnlRecord, PositionClose, TickRecord,
};
use crate::port::EventRecorder;

/// Keeps every record it is given, in order.
#[derive(Default)]
pub struct RecordingRecorder {
    pub ticks: Mutex<Vec<TickRecord>>,
    pub orders: Mutex<Vec<OrderRecord>>,
    pub fills: Mutex<Vec<FillRecord>>,
    pub opened: Mutex<Vec<Position>>,
    pub closed: Mutex<Vec<PositionClose>>,
    pub pnl: Mutex<Vec<PnlRecord>>,
    pub errors: Mutex<Vec<ErrorRecord>>,
}

impl RecordingRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick_reasons(&self) -> Vec<&'static str> {
        self.ticks.lock().iter().map(|t| t.reason.as_str()).collect()
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().len()
    }

    pub fn last_tick(&self) -> Option<TickRecord> {
        self.ticks.lock().last().cloned()
    }
}

impl EventRecorder for RecordingRecorder {
    fn record_tick(&self, tick: &TickRecord) {
        self.ticks.lock().push(tick.clone());
    }

    fn record_order(&self, order: &OrderRecord) {
        self.orders.lock().push(order.clone());
    }

    fn record_fill(&self, fill: &FillRecord) {
        self.fills.lock().push(fill.clone());
    }

    fn record_position_opened(&self, position: &Position) {
        self.opened.lock().push(position.clone());
    }

    fn record_position_closed(&self, close: &PositionClose) {
        self.closed.lock().push(close.clone());
    }

    fn record_pnl(&self, pnl: &PnlRecord) {
        self.pnl.lock().push(pnl.clone());
    }

    fn record_error(&self, error: &ErrorRecord) {
        self.errors.lock().push(error.clone());
    }
}
