//! Market continuity: periodic re-resolution with a bounded fallback window.
//!
//! The controller is the only writer of the active market handle. The
//! active handle is always the last successful resolution; a failed lookup
//! never replaces it.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::snapshot::QuoteFeed;
use crate::domain::{saturating_seconds, MarketHandle};
use crate::error::{DiscoveryError, Result};
use crate::port::MarketResolver;

/// What one refresh did.
#[derive(Debug, Clone, PartialEq)]
pub enum RotationOutcome {
    /// Resolution succeeded and matched the active market.
    Unchanged,
    /// Resolution succeeded with a different market; the feed was switched.
    Rotated { from: MarketHandle, to: MarketHandle },
    /// Resolution failed but the last success is within the fallback window.
    Fallback { age_secs: i64 },
    /// Resolution failed and the last success is older than the window.
    Degraded { age_secs: i64 },
}

pub struct MarketContinuity {
    resolver: Arc<dyn MarketResolver>,
    quotes: Arc<QuoteFeed>,
    active: watch::Sender<MarketHandle>,
    last_valid: MarketHandle,
    last_valid_at: DateTime<Utc>,
    fallback: Duration,
    period: StdDuration,
}

impl MarketContinuity {
    /// Start from an already resolved market.
    pub fn new(
        initial: MarketHandle,
        now: DateTime<Utc>,
        resolver: Arc<dyn MarketResolver>,
        quotes: Arc<QuoteFeed>,
        fallback_seconds: u64,
        period: StdDuration,
    ) -> Self {
        let (active, _) = watch::channel(initial.clone());
        Self {
            resolver,
            quotes,
            active,
            last_valid: initial,
            last_valid_at: now,
            fallback: saturating_seconds(fallback_seconds),
            period,
        }
    }

    /// Resolve the first market. Nothing found is fatal at startup.
    pub async fn resolve_initial(
        resolver: &dyn MarketResolver,
        keywords: &[String],
    ) -> Result<MarketHandle> {
        match resolver.resolve().await? {
            Some(market) => Ok(market),
            None => Err(DiscoveryError::NoMarket {
                keywords: keywords.to_vec(),
            }
            .into()),
        }
    }

    /// Read-only view of the active market for the orchestrator.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MarketHandle> {
        self.active.subscribe()
    }

    #[must_use]
    pub fn active(&self) -> MarketHandle {
        self.active.borrow().clone()
    }

    #[must_use]
    pub const fn last_valid(&self) -> &MarketHandle {
        &self.last_valid
    }

    #[must_use]
    pub const fn last_valid_at(&self) -> DateTime<Utc> {
        self.last_valid_at
    }

    /// One resolution attempt.
    pub async fn refresh(&mut self, now: DateTime<Utc>) -> RotationOutcome {
        let resolved = match self.resolver.resolve().await {
            Ok(found) => found,
            Err(e) => {
                warn!(error = %e, "Market discovery failed");
                None
            }
        };

        match resolved {
            Some(market) => self.accept(market, now),
            None => self.fall_back(now),
        }
    }

    fn accept(&mut self, market: MarketHandle, now: DateTime<Utc>) -> RotationOutcome {
        self.last_valid = market.clone();
        self.last_valid_at = now;

        let current = self.active();
        if current == market {
            debug!(slug = %market.slug(), "Market unchanged");
            return RotationOutcome::Unchanged;
        }

        self.quotes
            .switch_market(market.up_token_id(), market.down_token_id());
        self.active.send_replace(market.clone());
        info!(
            from = %current.slug(),
            to = %market.slug(),
            up = %market.up_token_id(),
            down = %market.down_token_id(),
            "Market rotated"
        );
        RotationOutcome::Rotated {
            from: current,
            to: market,
        }
    }

    fn fall_back(&mut self, now: DateTime<Utc>) -> RotationOutcome {
        let age = now - self.last_valid_at;
        let age_secs = age.num_seconds();

        if age <= self.fallback {
            let last_valid = self.last_valid.clone();
            self.active.send_if_modified(|active| {
                if *active == last_valid {
                    false
                } else {
                    *active = last_valid;
                    true
                }
            });
            warn!(
                slug = %self.last_valid.slug(),
                age_secs,
                "Using last valid market"
            );
            RotationOutcome::Fallback { age_secs }
        } else {
            error!(
                slug = %self.active.borrow().slug(),
                age_secs,
                fallback_secs = self.fallback.num_seconds(),
                "Market discovery stale beyond fallback window, trading on last known market"
            );
            RotationOutcome::Degraded { age_secs }
        }
    }

    /// Refresh on a fixed period until shutdown.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately and the market was just resolved.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh(Utc::now()).await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Market continuity stopping");
                        return;
                    }
                }
            }
        }
    }
}
