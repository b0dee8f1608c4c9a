//! Row types for Diesel inserts and report queries.

use diesel::prelude::*;

use super::schema::{errors, fills, orders, pnl, positions, ticks};

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = ticks)]
pub struct NewTickRow {
    pub recorded_at: String,
    pub market_slug: String,
    pub up_token_id: String,
    pub down_token_id: String,
    pub reference_price: f64,
    pub up_bid: Option<f64>,
    pub up_ask: Option<f64>,
    pub up_mid: f64,
    pub down_bid: Option<f64>,
    pub down_ask: Option<f64>,
    pub down_mid: f64,
    pub p_up_model: f64,
    pub p_up_market: f64,
    pub p_down_market: f64,
    pub edge_up: f64,
    pub edge_down: f64,
    pub chosen_edge: f64,
    pub decision: String,
    pub reason: String,
}

/// Order row; the primary key is the executor's order id.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderRow {
    pub id: String,
    pub created_at: String,
    pub market_slug: String,
    pub mode: String,
    pub token_id: String,
    pub side: String,
    pub price: f64,
    pub size: f64,
    pub status: String,
    pub reason: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = fills)]
pub struct NewFillRow {
    pub order_id: String,
    pub filled_at: String,
    pub fill_price: f64,
    pub fill_size: f64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = positions)]
pub struct NewPositionRow {
    pub order_id: String,
    pub market_slug: String,
    pub token_id: String,
    pub outcome: String,
    pub quantity: f64,
    pub entry_price: f64,
    pub notional: f64,
    pub opened_at: String,
}

/// Closing columns applied to an existing position row.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = positions)]
pub struct PositionCloseChangeset {
    pub closed_at: Option<String>,
    pub exit_reason: Option<String>,
    pub exit_price: Option<f64>,
    pub pnl: Option<f64>,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = positions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PositionRow {
    pub id: Option<i32>,
    pub order_id: String,
    pub market_slug: String,
    pub token_id: String,
    pub outcome: String,
    pub quantity: f64,
    pub entry_price: f64,
    pub notional: f64,
    pub opened_at: String,
    pub closed_at: Option<String>,
    pub exit_reason: Option<String>,
    pub exit_price: Option<f64>,
    pub pnl: Option<f64>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = pnl)]
pub struct NewPnlRow {
    pub recorded_at: String,
    pub realized: f64,
    pub unrealized: f64,
    pub exposure: f64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = errors)]
pub struct NewErrorRow {
    pub recorded_at: String,
    pub source: String,
    pub message: String,
}
