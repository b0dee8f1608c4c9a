//! A paper session written to SQLite and read back through the report.

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use tokio::sync::watch;

use driftline::adapter::outbound::paper::PaperExecutor;
use driftline::adapter::outbound::sqlite::database::connection;
use driftline::adapter::outbound::sqlite::{SessionReport, SqliteRecorder, SqliteReportReader};
use driftline::application::{Collaborators, Orchestrator, PriceFeed, QuoteFeed, TickOutcome};
use driftline::domain::{ExecutionMode, ExitReason};
use driftline::testkit::config;
use driftline::testkit::domain::{at, market, price_path, quote, t0};

struct Session {
    _dir: TempDir,
    db: String,
    quotes: Arc<QuoteFeed>,
    orchestrator: Orchestrator,
}

fn session() -> Session {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("session.db").to_string_lossy().into_owned();
    let pool = connection::open(&db).unwrap();

    let market = market("btc-5m");
    let prices = Arc::new(PriceFeed::new(100));
    for sample in price_path(100.0, 0.1, 10) {
        prices.push(sample);
    }
    let quotes = Arc::new(QuoteFeed::new(&market));
    quotes.publish(0, quote(market.up_token_id(), dec!(0.49), dec!(0.51)));
    quotes.publish(0, quote(market.down_token_id(), dec!(0.49), dec!(0.51)));
    let (_, market_rx) = watch::channel(market);

    let orchestrator = Orchestrator::new(
        config::trading_settings(),
        Collaborators {
            prices,
            quotes: Arc::clone(&quotes),
            market: market_rx,
            executor: Arc::new(PaperExecutor::default()),
            recorder: Arc::new(SqliteRecorder::new(pool)),
        },
        t0(),
    );

    Session {
        _dir: dir,
        db,
        quotes,
        orchestrator,
    }
}

#[tokio::test]
async fn empty_database_reports_zeroes() {
    let s = session();
    let report = SqliteReportReader::new(&s.db).load(None).unwrap();
    assert_eq!(report, SessionReport::default());
}

#[tokio::test]
async fn round_trip_session_is_reported() {
    let mut s = session();

    assert!(matches!(s.orchestrator.tick(t0()).await, TickOutcome::Opened { .. }));
    let report = SqliteReportReader::new(&s.db).load(None).unwrap();
    assert_eq!(report.total_orders, 1);
    assert_eq!(report.buy_orders, 1);
    assert_eq!(report.fills, 1);
    assert_eq!(report.open_positions, 1);
    assert_eq!(report.closed_positions, 0);

    let up = market("btc-5m").up_token_id().clone();
    s.quotes.publish(0, quote(&up, dec!(0.54), dec!(0.56)));
    let outcome = s.orchestrator.tick(at(30)).await;
    let TickOutcome::Closed { exit, pnl } = outcome else {
        panic!("expected close, got {outcome:?}");
    };
    assert_eq!(exit, ExitReason::ProfitTake);

    let report = SqliteReportReader::new(&s.db).load(None).unwrap();
    assert_eq!(report.total_orders, 2);
    assert_eq!(report.buy_orders, 1);
    assert_eq!(report.sell_orders, 1);
    assert_eq!(report.fills, 2);
    assert_eq!(report.open_positions, 0);
    assert_eq!(report.closed_positions, 1);
    let expected = pnl.to_f64().unwrap();
    assert!((report.realized_pnl_usd - expected).abs() < 1e-9);
}

#[tokio::test]
async fn mode_filter_applies_to_orders_and_fills_only() {
    let mut s = session();
    assert!(matches!(s.orchestrator.tick(t0()).await, TickOutcome::Opened { .. }));

    let reader = SqliteReportReader::new(&s.db);
    let paper = reader.load(Some(ExecutionMode::Paper)).unwrap();
    assert_eq!(paper.total_orders, 1);
    assert_eq!(paper.fills, 1);

    let live = reader.load(Some(ExecutionMode::Live)).unwrap();
    assert_eq!(live.total_orders, 0);
    assert_eq!(live.fills, 0);
    assert_eq!(live.open_positions, 1);
}

#[tokio::test]
async fn ticks_without_orders_leave_order_tables_empty() {
    let mut s = session();
    let up = market("btc-5m").up_token_id().clone();
    s.quotes.publish(0, quote(&up, dec!(0.40), dec!(0.60)));

    assert!(matches!(s.orchestrator.tick(t0()).await, TickOutcome::Idle { .. }));
    assert!(matches!(s.orchestrator.tick(at(1)).await, TickOutcome::Idle { .. }));

    let report = SqliteReportReader::new(&s.db).load(None).unwrap();
    assert_eq!(report.total_orders, 0);
    assert_eq!(report.fills, 0);
    assert_eq!(report.realized_pnl_usd, 0.0);
}
