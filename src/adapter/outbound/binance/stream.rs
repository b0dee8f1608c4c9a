//! Binance reference-price feed.
//!
//! Reads trades from the configured stream and appends each price to the
//! shared [`PriceFeed`] history.

use std::sync::Arc;

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::watch;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, trace, warn};

use super::dto::BinanceTrade;
use crate::application::snapshot::PriceFeed;
use crate::domain::PriceSample;
use crate::error::Result;
use crate::infrastructure::backoff::Backoff;
use crate::infrastructure::config::reconnection::ReconnectionConfig;

pub struct BinanceTradeStream {
    url: String,
    prices: Arc<PriceFeed>,
    reconnection: ReconnectionConfig,
}

impl BinanceTradeStream {
    #[must_use]
    pub fn new(url: String, prices: Arc<PriceFeed>, reconnection: ReconnectionConfig) -> Self {
        Self {
            url,
            prices,
            reconnection,
        }
    }

    /// Run until shutdown, reconnecting forever.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut backoff = Backoff::from(&self.reconnection);

        loop {
            if *shutdown.borrow() {
                return;
            }

            match self.session(&mut backoff, &mut shutdown).await {
                Ok(true) => return,
                Ok(false) => warn!("Binance stream closed"),
                Err(e) => warn!(error = %e, "Binance stream error"),
            }

            let delay = backoff.next_delay();
            warn!(
                attempt = backoff.attempt(),
                delay_ms = delay.as_millis() as u64,
                "Reconnecting to Binance"
            );
            tokio::select! {
                _ = sleep(delay) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        return;
                    }
                }
            }
        }
    }

    /// One connection. `Ok(true)` means shutdown was requested.
    async fn session(
        &self,
        backoff: &mut Backoff,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<bool> {
        info!(url = %self.url, "Connecting to Binance");
        let (mut ws, response) = connect_async(&self.url).await?;
        info!(status = %response.status(), "Binance connected");

        let mut first_message = true;
        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        let _ = ws.close(None).await;
                        return Ok(true);
                    }
                }
                msg = ws.next() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        if first_message {
                            backoff.reset();
                            first_message = false;
                        }
                        self.handle_text(&text);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        trace!("Received WebSocket ping");
                        ws.send(Message::Pong(data)).await?;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        info!(frame = ?frame, "WebSocket closed by server");
                        return Ok(false);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(false),
                }
            }
        }
    }

    fn handle_text(&self, text: &str) {
        let trade = match serde_json::from_str::<BinanceTrade>(text) {
            Ok(trade) => trade,
            Err(e) => {
                debug!(error = %e, "Unparsed Binance frame");
                return;
            }
        };
        match trade.price() {
            Some(price) => self.prices.push(PriceSample::new(Utc::now(), price)),
            None => debug!(raw = %trade.price, "Ignoring non-positive trade price"),
        }
    }
}
