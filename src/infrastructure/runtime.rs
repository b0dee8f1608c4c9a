//! Session runtime: wires the collaborators, runs the four tasks, and
//! reports the session summary after a cooperative shutdown.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::bootstrap;
use crate::adapter::outbound::binance::BinanceTradeStream;
use crate::adapter::outbound::polymarket::PolymarketQuoteStream;
use crate::application::{
    Collaborators, MarketContinuity, Orchestrator, PriceFeed, QuoteFeed, SessionSummary,
    TradingSettings,
};
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Per-tick settings derived from the loaded configuration.
#[must_use]
pub fn trading_settings(config: &Config) -> TradingSettings {
    TradingSettings {
        mode: config.mode,
        thresholds: config.strategy.thresholds(),
        model: config.strategy.model(),
        exit: config.strategy.exit_rule(),
        risk: config.risk.limits(),
        order_size_usd: config.risk.order_size_usd,
        allow_cross_window_positions: config.strategy.allow_cross_window_positions,
    }
}

/// Run a trading session until Ctrl-C or `max_runtime` elapses.
///
/// # Errors
///
/// Returns an error for startup failures only: database, executor, or
/// initial market resolution. Once the tasks are running, nothing is fatal.
pub async fn run(config: Config, max_runtime: Option<Duration>) -> Result<SessionSummary> {
    let recorder = bootstrap::build_recorder(&config)?;
    let executor = bootstrap::build_executor(&config).await?;
    let resolver = bootstrap::build_resolver(&config);

    let initial =
        MarketContinuity::resolve_initial(resolver.as_ref(), &config.market.keywords).await?;
    info!(
        market = %initial.slug(),
        up = %initial.up_token_id(),
        down = %initial.down_token_id(),
        mode = %config.mode,
        executor = executor.name(),
        "Starting session"
    );

    let prices = Arc::new(PriceFeed::new(config.strategy.history_capacity));
    let quotes = Arc::new(QuoteFeed::new(&initial));

    let continuity = MarketContinuity::new(
        initial,
        Utc::now(),
        resolver,
        Arc::clone(&quotes),
        config.market.market_discovery_fallback_seconds,
        config.market.rotate_interval(),
    );
    let orchestrator = Orchestrator::new(
        trading_settings(&config),
        Collaborators {
            prices: Arc::clone(&prices),
            quotes: Arc::clone(&quotes),
            market: continuity.subscribe(),
            executor,
            recorder,
        },
        Utc::now(),
    );

    let price_stream = BinanceTradeStream::new(
        config.network.binance_ws_url.clone(),
        prices,
        config.reconnection.clone(),
    );
    let quote_stream = PolymarketQuoteStream::new(
        config.network.polymarket_ws_url.clone(),
        quotes,
        config.reconnection.clone(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let feeds: Vec<(&'static str, JoinHandle<()>)> = vec![
        ("price_feed", tokio::spawn(price_stream.run(shutdown_rx.clone()))),
        ("quote_feed", tokio::spawn(quote_stream.run(shutdown_rx.clone()))),
        ("continuity", tokio::spawn(continuity.run(shutdown_rx.clone()))),
    ];
    let ticks = tokio::spawn(orchestrator.run(config.strategy.loop_interval(), shutdown_rx));

    wait_for_stop(max_runtime).await;
    if shutdown_tx.send(true).is_err() {
        warn!("All tasks already stopped");
    }

    for (name, handle) in feeds {
        if let Err(e) = handle.await {
            error!(task = name, error = %e, "Task ended abnormally");
        }
    }
    let summary = ticks.await.map_err(|e| {
        error!(error = %e, "Tick loop ended abnormally");
        std::io::Error::other(e.to_string())
    })?;

    summary.log();
    Ok(summary)
}

async fn wait_for_stop(max_runtime: Option<Duration>) {
    let deadline = async {
        match max_runtime {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for Ctrl-C, shutting down"),
        },
        () = deadline => info!("Max runtime reached"),
    }
}
