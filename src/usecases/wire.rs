//! Wire decode targets for upstream JSON payloads.
//!
//! Pure data — these structs exist only to give serde a shape to decode
//! into, and are converted to domain models immediately afterwards. Field
//! names mirror the upstream JSON; nothing here is validated beyond what
//! serde enforces structurally.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::market::{Market, MarketPrice, PriceSnapshot};

/// Envelope of the instrument-list HTTP response:
/// `{"code": int?, "data": [...]}`.
#[derive(Debug, Deserialize)]
pub struct RemoteMarketEnvelope {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub data: Option<Vec<RemoteMarket>>,
}

/// One instrument entry inside the HTTP envelope.
#[derive(Debug, Deserialize)]
pub struct RemoteMarket {
    pub symbol: String,
    pub future: bool,
}

impl RemoteMarket {
    pub fn into_model(self) -> Market {
        Market {
            symbol: self.symbol,
            future: self.future,
        }
    }
}

/// Envelope of one inbound WebSocket message:
/// `{"topic": str?, "data": {"<key>": {...}}}`.
///
/// Decoding the `data` map is all-or-nothing: one malformed entry fails
/// the whole message, which is exactly the rejection policy we want for
/// untrusted payloads.
#[derive(Debug, Deserialize)]
pub struct RemotePricesMessage {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub data: Option<HashMap<String, RemoteMarketPrice>>,
}

impl RemotePricesMessage {
    /// Convert the decoded entries into a domain snapshot.
    pub fn into_snapshot(self) -> PriceSnapshot {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(|(key, remote)| (key, remote.into_model()))
            .collect()
    }
}

/// One price entry inside a WebSocket message. Only `price` is mandatory.
#[derive(Debug, Deserialize)]
pub struct RemoteMarketPrice {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<i64>,
    pub price: f64,
}

impl RemoteMarketPrice {
    pub fn into_model(self) -> MarketPrice {
        MarketPrice {
            id: self.id,
            name: self.name,
            kind: self.kind,
            price: self.price,
        }
    }
}
