//! Prices Listener Port - Receiver Event Interface
//!
//! The produced capability of the prices receiver: one method per protocol
//! event, consumed by the presentation layer (or any other caller). The
//! receiver holds the listener through a `Weak` handle — the listener's
//! owner controls its lifetime, and a dropped listener is skipped silently.

use crate::domain::market::PriceSnapshot;

/// Observer for price-stream protocol events.
///
/// Methods are synchronous and expected to be cheap; anything slow should
/// be handed off to a channel or task by the implementor.
pub trait PricesListener: Send + Sync + 'static {
    /// The socket connection closed. Final event of a session.
    fn on_closed(&self);

    /// The socket connection opened; the subscribe message is on its way.
    fn on_opened(&self);

    /// The subscribe message could not be sent.
    fn on_subscribe_error(&self);

    /// The subscribe message was sent; streaming begins.
    fn on_subscribe_success(&self);

    /// An armed receive failed. The stream is not re-armed after this.
    fn on_receive_error(&self);

    /// An inbound message arrived but failed structural validation.
    fn on_receive_invalid_data(&self);

    /// One fully decoded batch of price updates.
    fn on_prices(&self, prices: PriceSnapshot);
}
