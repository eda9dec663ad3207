//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires from
//! the outside world. Adapters implement the transport traits; callers
//! implement the listener trait.
//!
//! Port categories:
//! - `HttpClient`: one-shot GET transport for the market-list loader
//! - `WebsocketClient`: socket transport driving the price stream
//! - `PricesListener`: events produced by the price stream receiver

pub mod http_client;
pub mod prices_listener;
pub mod websocket;

pub use http_client::{HttpClient, HttpResponse};
pub use prices_listener::PricesListener;
pub use websocket::{WebsocketClient, WebsocketEvent};
