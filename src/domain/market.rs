//! Market-data domain types.
//!
//! `Market` comes from the instrument-list endpoint, `MarketPrice` from the
//! live WebSocket channel. Both are plain immutable values with equality
//! semantics only — no identity, no behavior.

use std::collections::HashMap;

/// A tradable instrument (spot or futures) identified by symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    /// Exchange instrument identifier, e.g. "BTCPFC". Never empty.
    pub symbol: String,
    /// Whether this is a futures instrument rather than spot.
    pub future: bool,
}

/// A decoded live price quote for one instrument/type combination.
///
/// `price` is the only field upstream guarantees; the rest are carried
/// through unchanged when present. Prices arrive as 64-bit floats — callers
/// needing exact-decimal semantics must not assume float round-trip.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketPrice {
    /// Instrument identifier, e.g. "ANT".
    pub id: Option<String>,
    /// Display name, usually the same as `id`.
    pub name: Option<String>,
    /// Instrument type code (wire field "type").
    pub kind: Option<i64>,
    /// Latest price.
    pub price: f64,
}

/// One batch of price updates keyed by the server-defined composite key
/// (e.g. `"<name>_<type>"`). Replaced wholesale on every receive event;
/// the feed core never merges or diffs snapshots.
pub type PriceSnapshot = HashMap<String, MarketPrice>;
