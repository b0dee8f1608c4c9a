//! Orchestrator wiring over in-memory feeds and scripted collaborators.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;

use driftline::application::{
    Collaborators, Orchestrator, PriceFeed, QuoteFeed, TradingSettings,
};
use driftline::domain::{MarketHandle, PriceSample, TokenId};
use driftline::testkit::config;
use driftline::testkit::domain::{market, price_path, quote, t0};
use driftline::testkit::executor::ScriptedExecutor;
use driftline::testkit::recorder::RecordingRecorder;

pub struct Harness {
    pub market: MarketHandle,
    pub prices: Arc<PriceFeed>,
    pub quotes: Arc<QuoteFeed>,
    pub market_tx: watch::Sender<MarketHandle>,
    pub executor: Arc<ScriptedExecutor>,
    pub recorder: Arc<RecordingRecorder>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_executor(ScriptedExecutor::new())
    }

    pub fn with_executor(executor: ScriptedExecutor) -> Self {
        let market = market("btc-5m");
        let (market_tx, _) = watch::channel(market.clone());
        Self {
            prices: Arc::new(PriceFeed::new(500)),
            quotes: Arc::new(QuoteFeed::new(&market)),
            market,
            market_tx,
            executor: Arc::new(executor),
            recorder: Arc::new(RecordingRecorder::new()),
        }
    }

    pub fn orchestrator(&self) -> Orchestrator {
        self.orchestrator_with(config::trading_settings())
    }

    pub fn orchestrator_with(&self, settings: TradingSettings) -> Orchestrator {
        Orchestrator::new(
            settings,
            Collaborators {
                prices: Arc::clone(&self.prices),
                quotes: Arc::clone(&self.quotes),
                market: self.market_tx.subscribe(),
                executor: self.executor.clone(),
                recorder: self.recorder.clone(),
            },
            t0(),
        )
    }

    pub fn push_prices(&self, samples: Vec<PriceSample>) {
        for sample in samples {
            self.prices.push(sample);
        }
    }

    /// Ten steadily rising prices: the model leans up (~0.58).
    pub fn rising(&self) {
        self.push_prices(price_path(100.0, 0.1, 10));
    }

    /// Ten identical prices: the model sits at exactly 0.5.
    pub fn flat(&self) {
        self.push_prices(price_path(100.0, 0.0, 10));
    }

    pub fn set_up(&self, bid: Decimal, ask: Decimal) {
        let generation = self.quotes.target().generation;
        self.quotes
            .publish(generation, quote(self.market.up_token_id(), bid, ask));
    }

    pub fn set_down(&self, bid: Decimal, ask: Decimal) {
        let generation = self.quotes.target().generation;
        self.quotes
            .publish(generation, quote(self.market.down_token_id(), bid, ask));
    }

    /// Quote any subscribed token under the current generation.
    pub fn publish(&self, token_id: &TokenId, bid: Decimal, ask: Decimal) -> bool {
        let generation = self.quotes.target().generation;
        self.quotes.publish(generation, quote(token_id, bid, ask))
    }

    /// Roll over to `slug` the way the continuity controller does, with the
    /// new pair quoted 0.49 / 0.51.
    pub fn rotate(&self, slug: &str) -> MarketHandle {
        let next = market(slug);
        self.quotes
            .switch_market(next.up_token_id(), next.down_token_id());
        self.market_tx.send_replace(next.clone());
        self.publish(next.up_token_id(), Decimal::new(49, 2), Decimal::new(51, 2));
        self.publish(next.down_token_id(), Decimal::new(49, 2), Decimal::new(51, 2));
        next
    }

    /// Up and down both quoted 0.49 / 0.51.
    pub fn even_book(&self) {
        self.set_up(Decimal::new(49, 2), Decimal::new(51, 2));
        self.set_down(Decimal::new(49, 2), Decimal::new(51, 2));
    }
}
