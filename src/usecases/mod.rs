//! Usecases Layer - Remote Market-Data Acquisition
//!
//! The two use cases of this crate:
//! - `RemoteMarketLoader`: one-shot instrument-list fetch over the HTTP port
//! - `RemotePricesReceiver`: subscribe-and-stream session over the socket port
//!
//! `wire` holds the serde decode targets shared by both.

pub mod market_loader;
pub mod prices_receiver;
pub mod wire;

pub use market_loader::{LoadError, RemoteMarketLoader};
pub use prices_receiver::RemotePricesReceiver;
