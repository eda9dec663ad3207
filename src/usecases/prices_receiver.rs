//! Prices Receiver - Subscribe-and-Stream Use Case
//!
//! Drives one subscribe-and-stream session over a single socket connection:
//! connect → subscribe → receive loop. The transport's `receive()` arms
//! exactly one inbound delivery, so the receiver re-issues it after every
//! delivered message to emulate a continuous stream. Protocol outcomes are
//! reported to a weakly-held [`PricesListener`], never raised as errors.

use std::sync::{Arc, Weak};

use serde_json::json;
use tracing::{debug, info, warn};

use crate::ports::prices_listener::PricesListener;
use crate::ports::websocket::{WebsocketClient, WebsocketEvent};
use crate::usecases::wire::RemotePricesMessage;

/// The single topic this feed subscribes to.
pub const SUBSCRIBE_CHANNEL: &str = "coinIndex";

/// Build the fixed subscribe control message sent once per connection.
pub fn subscribe_payload() -> Vec<u8> {
    // Static shape, cannot fail to serialize.
    serde_json::to_vec(&json!({
        "op": "subscribe",
        "args": [SUBSCRIBE_CHANNEL],
    }))
    .unwrap_or_default()
}

/// Owns the socket protocol state machine for one live price session.
///
/// The state machine is the sequential event loop in
/// [`start_receive`](Self::start_receive): transport events arrive one at a time in causal
/// order, and each one maps to at most one listener notification plus at
/// most one follow-up transport command. Dropping the future that drives
/// `start_receive` tears the session down without any further listener
/// calls.
pub struct RemotePricesReceiver {
    url: String,
    client: Arc<dyn WebsocketClient>,
    listener: Weak<dyn PricesListener>,
}

impl RemotePricesReceiver {
    /// Create a receiver for `url` over `client`, reporting to `listener`.
    ///
    /// The listener is non-owning: its lifetime is managed by whoever holds
    /// the `Arc`, and notifications after it is dropped are skipped.
    pub fn new(
        url: impl Into<String>,
        client: Arc<dyn WebsocketClient>,
        listener: Weak<dyn PricesListener>,
    ) -> Self {
        Self {
            url: url.into(),
            client,
            listener,
        }
    }

    /// Connect and drive the session until the transport closes.
    ///
    /// Calling this again while a session is running is unspecified: the
    /// underlying transport owns one connection, and two concurrent drivers
    /// race for its events.
    pub async fn start_receive(&self) {
        info!(url = %self.url, "Connecting price stream");
        self.client.connect(&self.url).await;

        while let Some(event) = self.client.next_event().await {
            match event {
                WebsocketEvent::Opened => {
                    info!(channel = SUBSCRIBE_CHANNEL, "Price stream opened, subscribing");
                    self.notify(|l| l.on_opened());
                    self.client.send(subscribe_payload()).await;
                }
                WebsocketEvent::Closed => {
                    info!("Price stream closed");
                    self.notify(|l| l.on_closed());
                    break;
                }
                WebsocketEvent::SendFailure => {
                    warn!("Subscribe message failed to send");
                    self.notify(|l| l.on_subscribe_error());
                }
                WebsocketEvent::SendSuccess => {
                    debug!("Subscribed, arming first receive");
                    self.notify(|l| l.on_subscribe_success());
                    self.client.receive().await;
                }
                WebsocketEvent::ReceiveFailure => {
                    // No re-arm after a receive error; the stream stays
                    // silent until the transport closes.
                    warn!("Receive failed, stream will not re-arm");
                    self.notify(|l| l.on_receive_error());
                }
                WebsocketEvent::Data(payload) => {
                    self.handle_payload(&payload);
                    self.client.receive().await;
                }
            }
        }
    }

    /// Ask the transport to close. The session ends when the `Closed`
    /// event reaches the loop in `start_receive`.
    pub async fn stop_receive(&self) {
        self.client.disconnect().await;
    }

    /// Decode one inbound payload and report it.
    ///
    /// Rejection is all-or-nothing: empty bytes, a structurally invalid
    /// envelope, or an absent/empty `data` map all surface as a single
    /// invalid-data event and the payload is discarded whole.
    fn handle_payload(&self, payload: &[u8]) {
        if payload.is_empty() {
            self.notify(|l| l.on_receive_invalid_data());
            return;
        }

        let message: RemotePricesMessage = match serde_json::from_slice(payload) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, len = payload.len(), "Undecodable price message");
                self.notify(|l| l.on_receive_invalid_data());
                return;
            }
        };

        let has_entries = message.data.as_ref().is_some_and(|data| !data.is_empty());
        if has_entries {
            let snapshot = message.into_snapshot();
            debug!(entries = snapshot.len(), "Price snapshot received");
            self.notify(move |l| l.on_prices(snapshot));
        } else {
            self.notify(|l| l.on_receive_invalid_data());
        }
    }

    /// Notify the listener if its owner still holds it.
    fn notify<F>(&self, f: F)
    where
        F: FnOnce(&dyn PricesListener),
    {
        if let Some(listener) = self.listener.upgrade() {
            f(listener.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_payload_is_the_fixed_control_message() {
        let value: serde_json::Value =
            serde_json::from_slice(&subscribe_payload()).unwrap();
        assert_eq!(
            value,
            json!({"op": "subscribe", "args": ["coinIndex"]})
        );
    }
}
