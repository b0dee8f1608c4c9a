//! Event recording port.
//!
//! Append-only sink for everything a session observes and does. The core
//! never reads records back mid-session, and a failed write never stops
//! trading.

use crate::domain::position::Position;
use crate::domain::record::{
    ErrorRecord, FillRecord, OrderRecord, PnlRecord, PositionClose, TickRecord,
};

/// Port for recording session events.
///
/// Implementations log and swallow their own failures.
pub trait EventRecorder: Send + Sync {
    /// Record one evaluated tick.
    fn record_tick(&self, tick: &TickRecord);

    /// Record an order and the status the executor reported.
    fn record_order(&self, order: &OrderRecord);

    /// Record a fill for a previously recorded order.
    fn record_fill(&self, fill: &FillRecord);

    /// Record a newly opened position.
    fn record_position_opened(&self, position: &Position);

    /// Mark a previously opened position as closed.
    fn record_position_closed(&self, close: &PositionClose);

    /// Record a realized/unrealized PnL snapshot.
    fn record_pnl(&self, pnl: &PnlRecord);

    /// Record a non-fatal failure.
    fn record_error(&self, error: &ErrorRecord);
}
