//! Builders for domain primitives used across tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{MarketHandle, MarketSlug, PriceSample, Quote, TokenId};

/// Fixed session start used by time-dependent tests.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// `t0()` plus `secs` seconds.
pub fn at(secs: i64) -> DateTime<Utc> {
    t0() + Duration::seconds(secs)
}

pub fn token(id: &str) -> TokenId {
    TokenId::from(id)
}

/// Market `slug` with tokens `{slug}-up` / `{slug}-down`.
pub fn market(slug: &str) -> MarketHandle {
    MarketHandle::new(
        MarketSlug::new(slug),
        TokenId::new(format!("{slug}-up")),
        TokenId::new(format!("{slug}-down")),
    )
}

pub fn quote(token_id: &TokenId, bid: Decimal, ask: Decimal) -> Quote {
    Quote::two_sided(token_id.clone(), bid, ask, t0())
}

/// `n` samples moving by `step` from `start`, one second apart.
pub fn price_path(start: f64, step: f64, n: usize) -> Vec<PriceSample> {
    (0..n)
        .map(|i| PriceSample::new(at(i as i64), start + step * i as f64))
        .collect()
}
