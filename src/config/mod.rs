//! Configuration Module - TOML-based Feed Configuration
//!
//! Loads and validates configuration from `config.toml`. Endpoint URLs are
//! externalized here - nothing is hardcoded in the usecases layer.

pub mod loader;

use serde::Deserialize;

/// Top-level feed configuration.
///
/// Loaded from `config.toml` at startup and validated before any
/// connection is attempted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Upstream endpoint URLs.
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

/// Process identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Human-readable process name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Upstream endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    /// Instrument-list endpoint (HTTP GET).
    #[serde(default = "default_market_list_url")]
    pub market_list_url: String,
    /// Live price feed endpoint (WebSocket).
    #[serde(default = "default_prices_ws_url")]
    pub prices_ws_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            market_list_url: default_market_list_url(),
            prices_ws_url: default_prices_ws_url(),
        }
    }
}

fn default_name() -> String {
    "crypto-price-feed".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_market_list_url() -> String {
    "https://api.btse.com/futures/api/inquire/initial/market".to_string()
}

fn default_prices_ws_url() -> String {
    "wss://ws.btse.com/ws/futures".to_string()
}
