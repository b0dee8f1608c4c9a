//! Single-writer snapshot cells shared between feed tasks and the tick loop.
//!
//! Each cell wraps a `tokio::sync::watch` sender. The owning feed task is the
//! only writer; the orchestrator samples the latest value each tick without
//! waiting.

use tokio::sync::watch;

use crate::domain::{MarketHandle, PriceHistory, PriceSample, Quote, TokenId};

/// Latest reference prices, written by the price feed.
#[derive(Debug)]
pub struct PriceFeed {
    history: watch::Sender<PriceHistory>,
}

impl PriceFeed {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (history, _) = watch::channel(PriceHistory::with_capacity(capacity));
        Self { history }
    }

    /// Append a sample, evicting the oldest one when full.
    pub fn push(&self, sample: PriceSample) {
        self.history.send_modify(|history| history.push(sample));
    }

    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.history.borrow().latest().map(|s| s.price)
    }

    /// Copy of the history, oldest first.
    #[must_use]
    pub fn prices(&self) -> Vec<f64> {
        self.history.borrow().prices()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.borrow().is_empty()
    }
}

/// The tokens the quote feed should be subscribed to.
///
/// `held` is the token of the open position. It stays subscribed after a
/// market switch so the position can still be priced and closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTarget {
    pub generation: u64,
    pub up_token_id: TokenId,
    pub down_token_id: TokenId,
    pub held: Option<TokenId>,
}

impl QuoteTarget {
    fn in_pair(&self, token_id: &TokenId) -> bool {
        token_id == &self.up_token_id || token_id == &self.down_token_id
    }

    /// Held token when it lies outside the current pair.
    #[must_use]
    pub fn extra_held(&self) -> Option<&TokenId> {
        self.held.as_ref().filter(|token| !self.in_pair(token))
    }

    /// Every token to subscribe to: the pair, then a held token from an
    /// earlier market.
    #[must_use]
    pub fn token_ids(&self) -> Vec<TokenId> {
        let mut ids = vec![self.up_token_id.clone(), self.down_token_id.clone()];
        ids.extend(self.extra_held().cloned());
        ids
    }
}

/// Latest up/down quotes under one subscription generation.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteBoard {
    pub generation: u64,
    pub up_token_id: TokenId,
    pub down_token_id: TokenId,
    pub up: Option<Quote>,
    pub down: Option<Quote>,
    pub held_token_id: Option<TokenId>,
    /// Quote for a held token outside the pair.
    pub held: Option<Quote>,
}

impl QuoteBoard {
    fn empty(target: &QuoteTarget) -> Self {
        Self {
            generation: target.generation,
            up_token_id: target.up_token_id.clone(),
            down_token_id: target.down_token_id.clone(),
            up: None,
            down: None,
            held_token_id: target.held.clone(),
            held: None,
        }
    }

    /// Quote for either side of the current pair or for the held token.
    #[must_use]
    pub fn quote_for(&self, token_id: &TokenId) -> Option<&Quote> {
        if token_id == &self.up_token_id {
            self.up.as_ref()
        } else if token_id == &self.down_token_id {
            self.down.as_ref()
        } else if self.held_token_id.as_ref() == Some(token_id) {
            self.held.as_ref()
        } else {
            None
        }
    }

    /// Whether this board was collected for the given market.
    #[must_use]
    pub fn is_for(&self, market: &MarketHandle) -> bool {
        &self.up_token_id == market.up_token_id() && &self.down_token_id == market.down_token_id()
    }
}

/// Quote state shared by the quote feed (writer of quotes), the continuity
/// controller (writer of the pair) and the orchestrator (writer of the held
/// token).
#[derive(Debug)]
pub struct QuoteFeed {
    target: watch::Sender<QuoteTarget>,
    board: watch::Sender<QuoteBoard>,
}

impl QuoteFeed {
    #[must_use]
    pub fn new(market: &MarketHandle) -> Self {
        let target = QuoteTarget {
            generation: 0,
            up_token_id: market.up_token_id().clone(),
            down_token_id: market.down_token_id().clone(),
            held: None,
        };
        let (board, _) = watch::channel(QuoteBoard::empty(&target));
        let (target, _) = watch::channel(target);
        Self { target, board }
    }

    /// Point the feed at a new token pair.
    ///
    /// Clears cached pair quotes and bumps the generation so an in-flight
    /// subscription knows to resubscribe. The held token and its last quote
    /// carry over.
    pub fn switch_market(&self, up_token_id: &TokenId, down_token_id: &TokenId) -> u64 {
        let mut next = self.target.borrow().clone();
        next.generation += 1;
        next.up_token_id = up_token_id.clone();
        next.down_token_id = down_token_id.clone();

        let mut board = QuoteBoard::empty(&next);
        if let Some(held) = &next.held {
            board.held = self.board.borrow().quote_for(held).cloned();
        }
        self.board.send_replace(board);
        let generation = next.generation;
        self.target.send_replace(next);
        generation
    }

    /// Track (or with `None`, stop tracking) the token of the open position.
    ///
    /// Subscribers are woken only when the set of subscribed tokens changes,
    /// i.e. when the held token lies outside the current pair.
    pub fn hold(&self, token_id: Option<TokenId>) {
        self.target.send_if_modified(|target| {
            if target.held == token_id {
                return false;
            }
            let was_extra = target.extra_held().is_some();
            target.held = token_id.clone();
            was_extra || target.extra_held().is_some()
        });
        self.board.send_if_modified(|board| {
            if board.held_token_id == token_id {
                return false;
            }
            board.held = token_id
                .as_ref()
                .and_then(|token| board.quote_for(token).cloned());
            board.held_token_id = token_id;
            true
        });
    }

    /// Store a quote if it belongs to the given generation's tokens.
    ///
    /// Returns whether the quote was kept.
    pub fn publish(&self, generation: u64, quote: Quote) -> bool {
        self.board.send_if_modified(|board| {
            if board.generation != generation {
                return false;
            }
            if quote.token_id() == &board.up_token_id {
                board.up = Some(quote);
                true
            } else if quote.token_id() == &board.down_token_id {
                board.down = Some(quote);
                true
            } else if board.held_token_id.as_ref() == Some(quote.token_id()) {
                board.held = Some(quote);
                true
            } else {
                false
            }
        })
    }

    #[must_use]
    pub fn target(&self) -> QuoteTarget {
        self.target.borrow().clone()
    }

    /// Receiver that wakes when the subscribed tokens change.
    #[must_use]
    pub fn watch_target(&self) -> watch::Receiver<QuoteTarget> {
        self.target.subscribe()
    }

    #[must_use]
    pub fn board(&self) -> QuoteBoard {
        self.board.borrow().clone()
    }
}
