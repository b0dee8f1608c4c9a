//! Market rotation and the discovery fallback window.

use std::sync::Arc;
use std::time::Duration;

use driftline::application::{MarketContinuity, QuoteFeed, RotationOutcome};
use driftline::error::{DiscoveryError, Error};
use driftline::testkit::domain::{at, market, quote, t0};
use driftline::testkit::resolver::{Lookup, ScriptedResolver};
use rust_decimal_macros::dec;

const FALLBACK_SECS: u64 = 120;

fn controller(script: Vec<Lookup>) -> (MarketContinuity, Arc<QuoteFeed>, Arc<ScriptedResolver>) {
    let initial = market("btc-1200");
    let quotes = Arc::new(QuoteFeed::new(&initial));
    let resolver = Arc::new(ScriptedResolver::new(script));
    let continuity = MarketContinuity::new(
        initial,
        t0(),
        resolver.clone(),
        Arc::clone(&quotes),
        FALLBACK_SECS,
        Duration::from_secs(300),
    );
    (continuity, quotes, resolver)
}

#[tokio::test]
async fn initial_resolution_requires_a_market() {
    let resolver = ScriptedResolver::new(vec![Lookup::Missing]);
    let err = MarketContinuity::resolve_initial(&resolver, &["bitcoin".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Discovery(DiscoveryError::NoMarket { .. })));

    let resolver = ScriptedResolver::new(vec![Lookup::Found(market("btc-1200"))]);
    let handle = MarketContinuity::resolve_initial(&resolver, &[]).await.unwrap();
    assert_eq!(handle.slug().as_str(), "btc-1200");
}

#[tokio::test]
async fn same_market_is_unchanged() {
    let (mut continuity, quotes, _) = controller(vec![Lookup::Found(market("btc-1200"))]);
    quotes.publish(0, quote(market("btc-1200").up_token_id(), dec!(0.49), dec!(0.51)));

    assert_eq!(continuity.refresh(at(300)).await, RotationOutcome::Unchanged);
    assert_eq!(continuity.last_valid_at(), at(300));
    assert_eq!(quotes.target().generation, 0);
    assert!(quotes.board().up.is_some());
}

#[tokio::test]
async fn new_market_rotates_feed_and_handle() {
    let (mut continuity, quotes, _) = controller(vec![Lookup::Found(market("btc-1205"))]);
    let mut active = continuity.subscribe();
    quotes.publish(0, quote(market("btc-1200").up_token_id(), dec!(0.49), dec!(0.51)));

    let outcome = continuity.refresh(at(300)).await;

    assert_eq!(
        outcome,
        RotationOutcome::Rotated {
            from: market("btc-1200"),
            to: market("btc-1205"),
        }
    );
    assert!(active.has_changed().unwrap());
    assert_eq!(active.borrow_and_update().slug().as_str(), "btc-1205");

    let target = quotes.target();
    assert_eq!(target.generation, 1);
    assert_eq!(target.up_token_id.as_str(), "btc-1205-up");
    let board = quotes.board();
    assert!(board.up.is_none() && board.down.is_none());
    assert!(board.is_for(&market("btc-1205")));
}

#[tokio::test]
async fn failures_inside_window_fall_back() {
    let (mut continuity, _, resolver) =
        controller(vec![Lookup::Missing, Lookup::Fail("gamma 502".into())]);

    assert_eq!(
        continuity.refresh(at(60)).await,
        RotationOutcome::Fallback { age_secs: 60 }
    );
    assert_eq!(
        continuity.refresh(at(120)).await,
        RotationOutcome::Fallback { age_secs: 120 }
    );
    assert_eq!(resolver.calls(), 2);
    assert_eq!(continuity.active(), market("btc-1200"));
    assert_eq!(continuity.last_valid_at(), t0());
}

#[tokio::test]
async fn stale_discovery_degrades_but_keeps_last_valid() {
    let (mut continuity, quotes, _) = controller(vec![]);

    let outcome = continuity.refresh(at(FALLBACK_SECS as i64 + 1)).await;

    assert_eq!(
        outcome,
        RotationOutcome::Degraded {
            age_secs: FALLBACK_SECS as i64 + 1
        }
    );
    assert_eq!(continuity.active(), market("btc-1200"));
    assert_eq!(continuity.last_valid(), &market("btc-1200"));
    assert_eq!(quotes.target().generation, 0);
}

#[tokio::test]
async fn success_after_degraded_resets_the_clock() {
    let (mut continuity, _, resolver) = controller(vec![]);
    assert!(matches!(
        continuity.refresh(at(500)).await,
        RotationOutcome::Degraded { .. }
    ));

    resolver.push(Lookup::Found(market("btc-1210")));
    assert!(matches!(
        continuity.refresh(at(600)).await,
        RotationOutcome::Rotated { .. }
    ));
    assert_eq!(
        continuity.refresh(at(660)).await,
        RotationOutcome::Fallback { age_secs: 60 }
    );
    assert_eq!(continuity.active(), market("btc-1210"));
}

#[tokio::test]
async fn unbounded_fallback_window_never_degrades() {
    let initial = market("btc-1200");
    let quotes = Arc::new(QuoteFeed::new(&initial));
    let mut continuity = MarketContinuity::new(
        initial,
        t0(),
        Arc::new(ScriptedResolver::new(vec![])),
        quotes,
        u64::MAX,
        Duration::from_secs(300),
    );

    let age = 10 * 365 * 24 * 3600;
    assert_eq!(
        continuity.refresh(at(age)).await,
        RotationOutcome::Fallback { age_secs: age }
    );
}
