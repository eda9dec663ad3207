//! WebSocket Client Port - Socket Transport Interface
//!
//! Defines the trait the prices receiver requires from a socket transport:
//! connection lifecycle commands plus a sequential event stream. `receive()`
//! arms exactly ONE inbound delivery — the transport is request/response at
//! the message level, and the receiver re-issues `receive()` after every
//! delivered message to emulate a continuous stream.

use async_trait::async_trait;

/// Events delivered by the socket transport, one at a time, in causal
/// order (connect outcome before any send outcome, send outcome before any
/// receive outcome). A transport that violates this ordering puts the
/// receiver into undefined behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebsocketEvent {
    /// The connection is open and ready for traffic.
    Opened,
    /// The connection closed, orderly or not. Always the final event.
    Closed,
    /// The last `send` was handed to the peer.
    SendSuccess,
    /// The last `send` failed.
    SendFailure,
    /// An armed `receive` failed without closing the connection.
    ReceiveFailure,
    /// An armed `receive` delivered one message payload.
    Data(Vec<u8>),
}

/// Trait for a single-session WebSocket transport.
///
/// Commands are fire-and-forget; their outcomes arrive through
/// [`next_event`](WebsocketClient::next_event). No timeouts are imposed
/// here — a hung transport hangs its consumer.
#[async_trait]
pub trait WebsocketClient: Send + Sync + 'static {
    /// Open a connection to `url`. Outcome arrives as `Opened` or `Closed`.
    async fn connect(&self, url: &str);

    /// Close the connection. The transport confirms with `Closed`.
    async fn disconnect(&self);

    /// Send one binary message. Outcome arrives as `SendSuccess` or
    /// `SendFailure`.
    async fn send(&self, payload: Vec<u8>);

    /// Arm exactly one inbound delivery. Outcome arrives as `Data`,
    /// `ReceiveFailure`, or `Closed`.
    async fn receive(&self);

    /// Wait for the next transport event. `None` means the transport is
    /// gone and no further events will ever arrive.
    async fn next_event(&self) -> Option<WebsocketEvent>;
}
