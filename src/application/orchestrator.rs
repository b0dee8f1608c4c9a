//! Per-tick decision loop.
//!
//! Each tick reads the latest feed snapshots, scores the market, gates the
//! decision through risk, manages an open position before considering a new
//! one, and records what happened. Ticks never overlap and never both close
//! and open a position.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::position::PositionLifecycle;
use super::risk::{RiskCheckResult, RiskLimits, RiskManager, RiskState};
use super::snapshot::{PriceFeed, QuoteBoard, QuoteFeed};
use crate::domain::record::{
    ErrorRecord, FillRecord, OrderRecord, PnlRecord, PositionClose, QuoteSnapshot, TickRecord,
};
use crate::domain::{
    choose_signal, Decision, ExecutionMode, ExitReason, ExitRule, MarketHandle, MomentumVolModel,
    OrderAck, OrderId, OrderRequest, OrderStatus, Position, Quote, SessionStats, Signal,
    SignalThresholds, TickReason,
};
use crate::port::{EventRecorder, OrderExecutor};

/// Floor on the limit price when sizing an entry.
const MIN_SIZING_PRICE: Decimal = dec!(0.01);

/// Immutable decision settings.
#[derive(Debug, Clone)]
pub struct TradingSettings {
    pub mode: ExecutionMode,
    pub thresholds: SignalThresholds,
    pub model: MomentumVolModel,
    pub exit: ExitRule,
    pub risk: RiskLimits,
    pub order_size_usd: Decimal,
    pub allow_cross_window_positions: bool,
}

/// Shared handles the orchestrator reads from and writes to.
pub struct Collaborators {
    pub prices: Arc<PriceFeed>,
    pub quotes: Arc<QuoteFeed>,
    pub market: watch::Receiver<MarketHandle>,
    pub executor: Arc<dyn OrderExecutor>,
    pub recorder: Arc<dyn EventRecorder>,
}

/// How a tick ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A price or quote was missing; nothing was evaluated.
    NoOrderbook,
    /// No position and no entry this tick.
    Idle { reason: TickReason },
    /// Position open and no exit triggered (or the exit could not be priced).
    Holding,
    /// Exit triggered but the sell did not fill; the position stays open.
    ExitNotFilled { exit: ExitReason, status: OrderStatus },
    Closed { exit: ExitReason, pnl: Decimal },
    Opened { order_id: OrderId },
    /// Entry order placed but not filled; no position was created.
    EntryNotFilled { order_id: OrderId, status: OrderStatus },
    /// The executor returned an error.
    ExecutionFailed,
}

/// End-of-session view logged at shutdown.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub stats: SessionStats,
    pub risk: RiskState,
    pub open_position: Option<Position>,
}

impl SessionSummary {
    /// Log the summary at info level.
    pub fn log(&self) {
        let stats = &self.stats;
        info!(
            ticks = stats.ticks,
            entries = stats.entries,
            exits = stats.exits,
            execution_failures = stats.execution_failures,
            realized_pnl = %self.risk.realized_pnl_usd,
            exposure = %self.risk.exposure_usd,
            open_position = self.open_position.is_some(),
            "Session summary"
        );
        info!(
            reasons = ?stats.reasons,
            edge_up_min = stats.edge_up.min,
            edge_up_max = stats.edge_up.max,
            edge_up_avg = stats.edge_up.mean(),
            edge_down_min = stats.edge_down.min,
            edge_down_max = stats.edge_down.max,
            edge_down_avg = stats.edge_down.mean(),
            spread_up_min = stats.spread_up.min,
            spread_up_max = stats.spread_up.max,
            spread_up_avg = stats.spread_up.mean(),
            spread_down_min = stats.spread_down.min,
            spread_down_max = stats.spread_down.max,
            spread_down_avg = stats.spread_down.mean(),
            "Decision breakdown"
        );
        if let Some(position) = &self.open_position {
            warn!(
                token = %position.token_id,
                quantity = %position.quantity,
                entry_price = %position.entry_price,
                "Position left open at shutdown"
            );
        }
    }
}

pub struct Orchestrator {
    settings: TradingSettings,
    risk: RiskManager,
    positions: PositionLifecycle,
    prices: Arc<PriceFeed>,
    quotes: Arc<QuoteFeed>,
    market: watch::Receiver<MarketHandle>,
    executor: Arc<dyn OrderExecutor>,
    recorder: Arc<dyn EventRecorder>,
    stats: SessionStats,
}

impl Orchestrator {
    #[must_use]
    pub fn new(settings: TradingSettings, collaborators: Collaborators, now: DateTime<Utc>) -> Self {
        let risk = RiskManager::new(settings.risk.clone(), now);
        let positions = PositionLifecycle::new(settings.exit);
        Self {
            settings,
            risk,
            positions,
            prices: collaborators.prices,
            quotes: collaborators.quotes,
            market: collaborators.market,
            executor: collaborators.executor,
            recorder: collaborators.recorder,
            stats: SessionStats::default(),
        }
    }

    /// Replace the risk manager, e.g. to resume from known state.
    #[must_use]
    pub fn with_risk(mut self, risk: RiskManager) -> Self {
        self.risk = risk;
        self
    }

    #[must_use]
    pub const fn risk(&self) -> &RiskManager {
        &self.risk
    }

    #[must_use]
    pub const fn position(&self) -> Option<&Position> {
        self.positions.current()
    }

    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            stats: self.stats.clone(),
            risk: self.risk.state().clone(),
            open_position: self.positions.current().cloned(),
        }
    }

    /// Run one tick.
    pub async fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let market = self.market.borrow().clone();
        let board = self.quotes.board();

        let snapshot = match (self.prices.latest(), &board.up, &board.down) {
            (Some(price), Some(up), Some(down)) if board.is_for(&market) => {
                Some((price, up.clone(), down.clone()))
            }
            _ => None,
        };
        let Some((reference_price, up, down)) = snapshot else {
            self.stats.record_reason(&TickReason::NoOrderbook);
            debug!(slug = %market.slug(), "No orderbook, skipping tick");
            return TickOutcome::NoOrderbook;
        };

        let history = self.prices.prices();
        let p_up_model = self.settings.model.predict_up_probability(&history);
        let up_mid = to_f64(up.mid());
        let up_spread = to_f64(up.spread());
        let down_spread = to_f64(down.spread());

        let signal = choose_signal(
            p_up_model,
            up_mid,
            self.settings.thresholds,
            up_spread,
            down_spread,
        );
        let mut decision = signal.decision;
        let mut reason = TickReason::from(signal.reason);

        if decision.is_entry()
            && self.positions.is_open()
            && !self.settings.allow_cross_window_positions
        {
            let suppressed = choose_signal(
                p_up_model,
                up_mid,
                self.settings.thresholds.unreachable(),
                up_spread,
                down_spread,
            );
            decision = suppressed.decision;
            reason = TickReason::PositionOpenOldWindow;
        }

        let mut risk_approved = false;
        if decision.is_entry() {
            match self.risk.can_open(self.settings.order_size_usd, now) {
                RiskCheckResult::Approved => risk_approved = true,
                RiskCheckResult::Rejected(err) => {
                    self.recorder
                        .record_error(&ErrorRecord::new(now, "risk", err.code()));
                    reason = TickReason::Risk(err);
                }
            }
        }

        self.stats.record_reason(&reason);
        self.stats.observe_signal(&signal, up_spread, down_spread);
        self.recorder.record_tick(&TickRecord {
            timestamp: now,
            market: market.slug().clone(),
            up_token_id: market.up_token_id().clone(),
            down_token_id: market.down_token_id().clone(),
            reference_price,
            up: QuoteSnapshot::from(&up),
            down: QuoteSnapshot::from(&down),
            signal,
            decision,
            reason: reason.clone(),
        });
        debug!(
            slug = %market.slug(),
            price = reference_price,
            p_up_model,
            p_up_market = signal.p_up_market,
            edge_up = signal.edge_up,
            edge_down = signal.edge_down,
            decision = %decision,
            reason = %reason,
            "Tick"
        );

        if self.positions.is_open() {
            return self.manage_exit(now, &market, &board).await;
        }

        if !decision.is_entry() || !risk_approved {
            return TickOutcome::Idle { reason };
        }

        self.enter(now, &market, decision, &signal, &up, &down).await
    }

    async fn manage_exit(
        &mut self,
        now: DateTime<Utc>,
        market: &MarketHandle,
        board: &QuoteBoard,
    ) -> TickOutcome {
        let Some(position) = self.positions.current().cloned() else {
            return TickOutcome::Holding;
        };
        let Some(quote) = board.quote_for(&position.token_id) else {
            warn!(
                token = %position.token_id,
                slug = %market.slug(),
                "No quote for held token, cannot evaluate exit"
            );
            return TickOutcome::Holding;
        };
        let Some(exit) = self.positions.exit_signal(quote.mid(), now) else {
            return TickOutcome::Holding;
        };
        let Some(bid) = quote.bid() else {
            warn!(token = %position.token_id, exit = %exit, "No bid to exit against");
            return TickOutcome::Holding;
        };

        let request = OrderRequest::sell(position.token_id.clone(), bid, position.quantity, Some(bid));
        let Some(ack) = self.place(&request, now).await else {
            return TickOutcome::ExecutionFailed;
        };
        self.recorder.record_order(&OrderRecord::new(
            now,
            position.market.clone(),
            self.settings.mode,
            &request,
            &ack,
            exit.as_str(),
        ));

        if !ack.is_filled() {
            info!(
                order_id = %ack.order_id,
                status = %ack.status,
                exit = %exit,
                "Exit order not filled, position stays open"
            );
            return TickOutcome::ExitNotFilled {
                exit,
                status: ack.status,
            };
        }

        self.recorder.record_fill(&FillRecord::from_ack(&ack, now));
        let closed = match self.positions.close() {
            Ok(closed) => closed,
            Err(e) => {
                error!(error = %e, "Position slot empty after exit fill");
                return TickOutcome::Holding;
            }
        };
        self.quotes.hold(None);
        let close = PositionClose::new(&closed, exit, ack.price, now);
        self.risk.on_close(closed.notional, close.pnl, now);
        self.stats.record_exit(close.pnl);
        self.recorder.record_position_closed(&close);
        self.record_pnl(now);

        info!(
            token = %closed.token_id,
            exit = %exit,
            entry_price = %closed.entry_price,
            exit_price = %ack.price,
            pnl = %close.pnl,
            "Position closed"
        );
        TickOutcome::Closed {
            exit,
            pnl: close.pnl,
        }
    }

    async fn enter(
        &mut self,
        now: DateTime<Utc>,
        market: &MarketHandle,
        decision: Decision,
        signal: &Signal,
        up: &Quote,
        down: &Quote,
    ) -> TickOutcome {
        let Some(outcome) = decision.outcome() else {
            return TickOutcome::Idle {
                reason: signal.reason.into(),
            };
        };
        let (token_id, quote) = match decision {
            Decision::BuyDown => (market.down_token_id(), down),
            _ => (market.up_token_id(), up),
        };
        let Some(ask) = quote.ask() else {
            warn!(token = %token_id, "No ask to enter against");
            return TickOutcome::Idle {
                reason: signal.reason.into(),
            };
        };

        let order_size = self.settings.order_size_usd;
        let quantity = order_size / ask.max(MIN_SIZING_PRICE);
        let request = OrderRequest::buy(token_id.clone(), ask, quantity, Some(ask));
        let Some(ack) = self.place(&request, now).await else {
            return TickOutcome::ExecutionFailed;
        };
        self.recorder.record_order(&OrderRecord::new(
            now,
            market.slug().clone(),
            self.settings.mode,
            &request,
            &ack,
            signal.reason.as_str(),
        ));

        if !ack.is_filled() {
            info!(
                order_id = %ack.order_id,
                status = %ack.status,
                token = %token_id,
                "Entry order not filled, no position opened"
            );
            return TickOutcome::EntryNotFilled {
                order_id: ack.order_id,
                status: ack.status,
            };
        }

        self.recorder.record_fill(&FillRecord::from_ack(&ack, now));
        let position = Position {
            market: market.slug().clone(),
            token_id: token_id.clone(),
            outcome,
            quantity: ack.size,
            entry_price: ack.price,
            notional: order_size,
            entry_time: now,
            order_id: ack.order_id.clone(),
        };
        if let Err(e) = self.positions.open(position.clone()) {
            error!(error = %e, "Entry filled while a position is open");
            return TickOutcome::Holding;
        }
        self.quotes.hold(Some(token_id.clone()));
        self.risk.on_open(order_size, now);
        self.stats.record_entry();
        self.recorder.record_position_opened(&position);
        self.record_pnl(now);

        info!(
            slug = %market.slug(),
            side = %outcome,
            token = %token_id,
            price = %ack.price,
            quantity = %ack.size,
            edge = signal.chosen_edge,
            "Position opened"
        );
        TickOutcome::Opened {
            order_id: ack.order_id,
        }
    }

    async fn place(&mut self, request: &OrderRequest, now: DateTime<Utc>) -> Option<OrderAck> {
        match self.executor.place_limit(request).await {
            Ok(ack) => Some(ack),
            Err(e) => {
                error!(
                    executor = self.executor.name(),
                    token = %request.token_id,
                    side = %request.side,
                    error = %e,
                    "Order placement failed"
                );
                self.stats.record_execution_failure();
                self.recorder
                    .record_error(&ErrorRecord::new(now, "execution", e.to_string()));
                None
            }
        }
    }

    fn record_pnl(&self, now: DateTime<Utc>) {
        let state = self.risk.state();
        self.recorder.record_pnl(&PnlRecord {
            timestamp: now,
            realized: state.realized_pnl_usd,
            unrealized: Decimal::ZERO,
            exposure: state.exposure_usd,
        });
    }

    /// Tick on a fixed period until shutdown, then return the summary.
    pub async fn run(mut self, period: Duration, mut shutdown: watch::Receiver<bool>) -> SessionSummary {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick(Utc::now()).await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Orchestrator stopping");
                        break;
                    }
                }
            }
        }

        self.summary()
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
