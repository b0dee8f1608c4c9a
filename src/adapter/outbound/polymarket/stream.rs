//! Polymarket market-channel quote feed.
//!
//! Connects, subscribes to the current up/down pair, and publishes top of
//! book into the shared [`QuoteFeed`]. A market switch, or a held token
//! moving in or out of the subscription, drops the connection and
//! resubscribes straight away; transport failures go through the
//! reconnect backoff.

use std::sync::Arc;

use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace, warn};

use super::dto::message::{PolymarketSubscribeMessage, PolymarketWsMessage};
use crate::application::snapshot::{QuoteFeed, QuoteTarget};
use crate::domain::TokenId;
use crate::error::Result;
use crate::infrastructure::backoff::Backoff;
use crate::infrastructure::config::reconnection::ReconnectionConfig;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Why a single connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionEnd {
    Shutdown,
    Switched,
    Closed,
}

pub struct PolymarketQuoteStream {
    url: String,
    quotes: Arc<QuoteFeed>,
    reconnection: ReconnectionConfig,
}

impl PolymarketQuoteStream {
    #[must_use]
    pub fn new(url: String, quotes: Arc<QuoteFeed>, reconnection: ReconnectionConfig) -> Self {
        Self {
            url,
            quotes,
            reconnection,
        }
    }

    /// Run until shutdown, reconnecting forever.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut backoff = Backoff::from(&self.reconnection);
        let mut target_rx = self.quotes.watch_target();

        loop {
            if *shutdown.borrow() {
                return;
            }
            let target = target_rx.borrow_and_update().clone();

            match self
                .session(&target, &mut target_rx, &mut backoff, &mut shutdown)
                .await
            {
                Ok(SessionEnd::Shutdown) => return,
                Ok(SessionEnd::Switched) => {
                    info!(previous = target.generation, "Resubscribing for new token set");
                    continue;
                }
                Ok(SessionEnd::Closed) => warn!("Polymarket stream closed"),
                Err(e) => warn!(error = %e, "Polymarket stream error"),
            }

            let delay = backoff.next_delay();
            warn!(
                attempt = backoff.attempt(),
                delay_ms = delay.as_millis() as u64,
                "Reconnecting to Polymarket"
            );
            tokio::select! {
                _ = sleep(delay) => {}
                _ = target_rx.changed() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        return;
                    }
                }
            }
        }
    }

    async fn session(
        &self,
        target: &QuoteTarget,
        target_rx: &mut watch::Receiver<QuoteTarget>,
        backoff: &mut Backoff,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Result<SessionEnd> {
        info!(url = %self.url, "Connecting to Polymarket");
        let (mut ws, response) = connect_async(&self.url).await?;
        info!(status = %response.status(), "Polymarket connected");

        subscribe(&mut ws, target).await?;
        let mut first_message = true;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        let _ = ws.close(None).await;
                        return Ok(SessionEnd::Shutdown);
                    }
                }
                changed = target_rx.changed() => {
                    if changed.is_ok() {
                        let _ = ws.close(None).await;
                        return Ok(SessionEnd::Switched);
                    }
                }
                msg = ws.next() => match msg {
                    Some(Ok(Message::Text(text))) => {
                        if first_message {
                            backoff.reset();
                            first_message = false;
                        }
                        self.handle_text(&text, target.generation);
                    }
                    Some(Ok(Message::Ping(data))) => {
                        trace!("Received WebSocket ping");
                        ws.send(Message::Pong(data)).await?;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        info!(frame = ?frame, "WebSocket closed by server");
                        return Ok(SessionEnd::Closed);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(SessionEnd::Closed),
                }
            }
        }
    }

    fn handle_text(&self, text: &str, generation: u64) {
        match serde_json::from_str::<PolymarketWsMessage>(text) {
            Ok(message) => {
                for quote in message.into_quotes(Utc::now()) {
                    let token = quote.token_id().clone();
                    if !self.quotes.publish(generation, quote) {
                        trace!(token = %token, "Dropped quote for inactive token");
                    }
                }
            }
            Err(e) => {
                // Non-JSON keepalives ("PONG") land here too.
                debug!(error = %e, bytes = text.len(), "Unparsed Polymarket frame");
            }
        }
    }
}

async fn subscribe(ws: &mut WsStream, target: &QuoteTarget) -> Result<()> {
    let msg = PolymarketSubscribeMessage::new(
        target.token_ids().iter().map(ToString::to_string).collect(),
    );
    let json = serde_json::to_string(&msg)?;
    info!(
        up = %target.up_token_id,
        down = %target.down_token_id,
        held = ?target.extra_held().map(TokenId::as_str),
        generation = target.generation,
        "Subscribing to market"
    );
    ws.send(Message::Text(json)).await?;
    Ok(())
}
