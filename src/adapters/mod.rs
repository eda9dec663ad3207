//! Adapters Layer - Transport Implementations
//!
//! Concrete implementations of the transport ports:
//! - `ReqwestHttpClient`: HTTP GET over a pooled reqwest client
//! - `TungsteniteWebsocketClient`: single-session tokio-tungstenite socket

pub mod http;
pub mod websocket;

pub use http::ReqwestHttpClient;
pub use websocket::TungsteniteWebsocketClient;
