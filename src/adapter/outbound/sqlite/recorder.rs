//! SQLite session recorder.
//!
//! Implements [`EventRecorder`] over a Diesel pool. Every write is
//! independent; a failed write is logged at `warn` and dropped.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::database::connection::{configure_sqlite_connection, DbPool};
use super::database::model::{
    NewErrorRow, NewFillRow, NewPnlRow, NewPositionRow, NewTickRow, OrderRow,
    PositionCloseChangeset,
};
use super::database::schema::{errors, fills, orders, pnl, positions, ticks};
use crate::domain::position::Position;
use crate::domain::record::{
    ErrorRecord, FillRecord, OrderRecord, PnlRecord, PositionClose, TickRecord,
};
use crate::port::EventRecorder;

type SqliteConn = PooledConnection<ConnectionManager<SqliteConnection>>;

fn decimal_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

pub struct SqliteRecorder {
    pool: DbPool,
}

impl SqliteRecorder {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Option<SqliteConn> {
        let mut conn = match self.pool.get() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to get database connection");
                return None;
            }
        };
        if let Err(e) = configure_sqlite_connection(&mut conn) {
            warn!(error = %e, "Failed to configure SQLite connection");
        }
        Some(conn)
    }

    fn write<F>(&self, what: &'static str, f: F)
    where
        F: FnOnce(&mut SqliteConnection) -> QueryResult<usize>,
    {
        let Some(mut conn) = self.conn() else {
            return;
        };
        match f(&mut conn) {
            Ok(rows) => debug!(record = what, rows, "Recorded"),
            Err(e) => warn!(record = what, error = %e, "Failed to record"),
        }
    }
}

impl EventRecorder for SqliteRecorder {
    fn record_tick(&self, tick: &TickRecord) {
        let row = NewTickRow {
            recorded_at: tick.timestamp.to_rfc3339(),
            market_slug: tick.market.to_string(),
            up_token_id: tick.up_token_id.to_string(),
            down_token_id: tick.down_token_id.to_string(),
            reference_price: tick.reference_price,
            up_bid: tick.up.bid.map(decimal_to_f64),
            up_ask: tick.up.ask.map(decimal_to_f64),
            up_mid: decimal_to_f64(tick.up.mid),
            down_bid: tick.down.bid.map(decimal_to_f64),
            down_ask: tick.down.ask.map(decimal_to_f64),
            down_mid: decimal_to_f64(tick.down.mid),
            p_up_model: tick.signal.p_up_model,
            p_up_market: tick.signal.p_up_market,
            p_down_market: tick.signal.p_down_market,
            edge_up: tick.signal.edge_up,
            edge_down: tick.signal.edge_down,
            chosen_edge: tick.signal.chosen_edge,
            decision: tick.decision.as_str().to_string(),
            reason: tick.reason.as_str().to_string(),
        };
        self.write("tick", |conn| {
            diesel::insert_into(ticks::table).values(&row).execute(conn)
        });
    }

    fn record_order(&self, order: &OrderRecord) {
        let row = OrderRow {
            id: order.order_id.to_string(),
            created_at: order.timestamp.to_rfc3339(),
            market_slug: order.market.to_string(),
            mode: order.mode.as_str().to_string(),
            token_id: order.token_id.to_string(),
            side: order.side.as_str().to_string(),
            price: decimal_to_f64(order.price),
            size: decimal_to_f64(order.size),
            status: order.status.as_str().to_string(),
            reason: order.reason.to_string(),
        };
        self.write("order", |conn| {
            diesel::replace_into(orders::table).values(&row).execute(conn)
        });
    }

    fn record_fill(&self, fill: &FillRecord) {
        let row = NewFillRow {
            order_id: fill.order_id.to_string(),
            filled_at: fill.timestamp.to_rfc3339(),
            fill_price: decimal_to_f64(fill.price),
            fill_size: decimal_to_f64(fill.size),
        };
        self.write("fill", |conn| {
            diesel::insert_into(fills::table).values(&row).execute(conn)
        });
    }

    fn record_position_opened(&self, position: &Position) {
        let row = NewPositionRow {
            order_id: position.order_id.to_string(),
            market_slug: position.market.to_string(),
            token_id: position.token_id.to_string(),
            outcome: position.outcome.as_str().to_string(),
            quantity: decimal_to_f64(position.quantity),
            entry_price: decimal_to_f64(position.entry_price),
            notional: decimal_to_f64(position.notional),
            opened_at: position.entry_time.to_rfc3339(),
        };
        self.write("position_opened", |conn| {
            diesel::insert_into(positions::table).values(&row).execute(conn)
        });
    }

    fn record_position_closed(&self, close: &PositionClose) {
        let changes = PositionCloseChangeset {
            closed_at: Some(close.closed_at.to_rfc3339()),
            exit_reason: Some(close.exit_reason.as_str().to_string()),
            exit_price: Some(decimal_to_f64(close.exit_price)),
            pnl: Some(decimal_to_f64(close.pnl)),
        };
        let order_id = close.entry_order_id.to_string();
        self.write("position_closed", |conn| {
            let updated = diesel::update(positions::table.filter(positions::order_id.eq(&order_id)))
                .set(&changes)
                .execute(conn)?;
            if updated == 0 {
                warn!(order_id = %order_id, "Closed a position with no open row");
            }
            Ok(updated)
        });
    }

    fn record_pnl(&self, snapshot: &PnlRecord) {
        let row = NewPnlRow {
            recorded_at: snapshot.timestamp.to_rfc3339(),
            realized: decimal_to_f64(snapshot.realized),
            unrealized: decimal_to_f64(snapshot.unrealized),
            exposure: decimal_to_f64(snapshot.exposure),
        };
        self.write("pnl", |conn| {
            diesel::insert_into(pnl::table).values(&row).execute(conn)
        });
    }

    fn record_error(&self, error: &ErrorRecord) {
        let row = NewErrorRow {
            recorded_at: error.timestamp.to_rfc3339(),
            source: error.source.to_string(),
            message: error.message.clone(),
        };
        self.write("error", |conn| {
            diesel::insert_into(errors::table).values(&row).execute(conn)
        });
    }
}
