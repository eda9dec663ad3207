//! Domain layer - Core market-data models.
//!
//! Pure value types shared by the loader and the price receiver.
//! No external dependencies allowed here (hexagonal architecture inner ring).

pub mod market;

// Re-export core types for convenience
pub use market::{Market, MarketPrice, PriceSnapshot};
