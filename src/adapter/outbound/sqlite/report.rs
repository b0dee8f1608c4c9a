//! Read side of the session database, used by the `report` command.

use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::OptionalExtension;

use super::database::connection::create_pool;
use super::database::schema::{fills, orders, pnl, positions};
use crate::domain::{ExecutionMode, OrderSide};
use crate::error::Result;

/// Order, fill, and position counts plus the latest realized PnL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    pub total_orders: i64,
    pub buy_orders: i64,
    pub sell_orders: i64,
    pub fills: i64,
    pub open_positions: i64,
    pub closed_positions: i64,
    pub realized_pnl_usd: f64,
}

pub struct SqliteReportReader {
    database_url: String,
}

impl SqliteReportReader {
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Build the report. `mode` restricts order and fill counts; positions
    /// and PnL are always reported across modes.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or queried.
    pub fn load(&self, mode: Option<ExecutionMode>) -> Result<SessionReport> {
        let pool = create_pool(&self.database_url)?;
        let mut conn = pool.get()?;
        let mode = mode.map(|m| m.as_str().to_string());

        let count_orders = |side: Option<OrderSide>, conn: &mut SqliteConnection| {
            let mut query = orders::table.select(count_star()).into_boxed();
            if let Some(mode) = &mode {
                query = query.filter(orders::mode.eq(mode.clone()));
            }
            if let Some(side) = side {
                query = query.filter(orders::side.eq(side.as_str()));
            }
            query.first::<i64>(conn)
        };

        let total_orders = count_orders(None, &mut conn)?;
        let buy_orders = count_orders(Some(OrderSide::Buy), &mut conn)?;
        let sell_orders = count_orders(Some(OrderSide::Sell), &mut conn)?;

        let fills = match &mode {
            Some(mode) => fills::table
                .filter(
                    fills::order_id.eq_any(
                        orders::table
                            .filter(orders::mode.eq(mode.clone()))
                            .select(orders::id),
                    ),
                )
                .select(count_star())
                .first::<i64>(&mut conn)?,
            None => fills::table.select(count_star()).first::<i64>(&mut conn)?,
        };

        let open_positions = positions::table
            .filter(positions::closed_at.is_null())
            .select(count_star())
            .first::<i64>(&mut conn)?;
        let closed_positions = positions::table
            .filter(positions::closed_at.is_not_null())
            .select(count_star())
            .first::<i64>(&mut conn)?;

        let realized_pnl_usd = pnl::table
            .order(pnl::id.desc())
            .select(pnl::realized)
            .first::<f64>(&mut conn)
            .optional()?
            .unwrap_or(0.0);

        Ok(SessionReport {
            total_orders,
            buy_orders,
            sell_orders,
            fills,
            open_positions,
            closed_positions,
            realized_pnl_usd,
        })
    }
}
