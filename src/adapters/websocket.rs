//! Tungstenite WebSocket Adapter
//!
//! Implements the `WebsocketClient` port over tokio-tungstenite. Commands
//! push their outcomes onto an internal event queue; the consumer drains it
//! through `next_event`, one event at a time, in the order they happened.
//!
//! `receive()` reads exactly one data frame from the socket. Ping/pong and
//! other control frames are skipped inside that one call (pong replies are
//! handled by tungstenite itself), so a single armed receive still yields a
//! single `Data` event.

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::ports::websocket::{WebsocketClient, WebsocketEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsWriter = SplitSink<WsStream, Message>;
type WsReader = SplitStream<WsStream>;

/// `WebsocketClient` backed by one tokio-tungstenite connection.
///
/// Holds at most one connection at a time; a `connect` while already
/// connected replaces the previous stream halves without closing them
/// (callers are expected to drive one session per adapter instance).
pub struct TungsteniteWebsocketClient {
    events_tx: mpsc::UnboundedSender<WebsocketEvent>,
    events_rx: Mutex<mpsc::UnboundedReceiver<WebsocketEvent>>,
    writer: Mutex<Option<WsWriter>>,
    reader: Mutex<Option<WsReader>>,
}

impl TungsteniteWebsocketClient {
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            events_tx,
            events_rx: Mutex::new(events_rx),
            writer: Mutex::new(None),
            reader: Mutex::new(None),
        }
    }

    fn emit(&self, event: WebsocketEvent) {
        // The queue is unbounded and the receiver lives as long as self,
        // so a send only fails during teardown.
        let _ = self.events_tx.send(event);
    }

    /// Drop both stream halves. Further sends/receives fail cleanly.
    async fn clear_connection(&self) {
        *self.writer.lock().await = None;
        *self.reader.lock().await = None;
    }
}

impl Default for TungsteniteWebsocketClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebsocketClient for TungsteniteWebsocketClient {
    async fn connect(&self, url: &str) {
        match connect_async(url).await {
            Ok((stream, _)) => {
                let (writer, reader) = stream.split();
                *self.writer.lock().await = Some(writer);
                *self.reader.lock().await = Some(reader);
                info!(url, "WebSocket connected");
                self.emit(WebsocketEvent::Opened);
            }
            Err(e) => {
                warn!(url, error = %e, "WebSocket connection failed");
                self.emit(WebsocketEvent::Closed);
            }
        }
    }

    async fn disconnect(&self) {
        // Writer side only: an armed receive may be holding the reader
        // lock, and `Closed` must reach the consumer promptly either way.
        let mut writer = self.writer.lock().await;
        if let Some(sink) = writer.as_mut() {
            // Best effort close frame; the connection is gone either way.
            if let Err(e) = sink.send(Message::Close(None)).await {
                debug!(error = %e, "Close frame not delivered");
            }
        }
        *writer = None;
        drop(writer);

        info!("WebSocket disconnected");
        self.emit(WebsocketEvent::Closed);
    }

    async fn send(&self, payload: Vec<u8>) {
        let mut writer = self.writer.lock().await;
        match writer.as_mut() {
            Some(sink) => match sink.send(Message::Binary(payload)).await {
                Ok(()) => self.emit(WebsocketEvent::SendSuccess),
                Err(e) => {
                    warn!(error = %e, "WebSocket send failed");
                    self.emit(WebsocketEvent::SendFailure);
                }
            },
            None => self.emit(WebsocketEvent::SendFailure),
        }
    }

    async fn receive(&self) {
        let closed = {
            let mut reader = self.reader.lock().await;
            let Some(stream) = reader.as_mut() else {
                self.emit(WebsocketEvent::ReceiveFailure);
                return;
            };

            loop {
                match stream.next().await {
                    Some(Ok(Message::Binary(data))) => {
                        self.emit(WebsocketEvent::Data(data));
                        return;
                    }
                    Some(Ok(Message::Text(text))) => {
                        self.emit(WebsocketEvent::Data(text.into_bytes()));
                        return;
                    }
                    Some(Ok(Message::Close(_))) | None => break true,
                    Some(Ok(_)) => {
                        // Ping/pong/raw frame: not a delivery, keep waiting.
                        debug!("Skipping control frame");
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "WebSocket receive failed");
                        self.emit(WebsocketEvent::ReceiveFailure);
                        return;
                    }
                }
            }
        };

        if closed {
            self.clear_connection().await;
            self.emit(WebsocketEvent::Closed);
        }
    }

    async fn next_event(&self) -> Option<WebsocketEvent> {
        self.events_rx.lock().await.recv().await
    }
}
