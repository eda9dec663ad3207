//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating the endpoint URLs, and
//! providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AppConfig =
        toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;

    validate_config(&config)?;

    info!(
        name = %config.feed.name,
        market_list = %config.endpoints.market_list_url,
        prices_ws = %config.endpoints.prices_ws_url,
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
    anyhow::ensure!(
        !config.endpoints.market_list_url.is_empty(),
        "Market list URL must not be empty"
    );
    anyhow::ensure!(
        config.endpoints.market_list_url.starts_with("http"),
        "Market list URL must be http(s), got {}",
        config.endpoints.market_list_url
    );
    anyhow::ensure!(
        !config.endpoints.prices_ws_url.is_empty(),
        "Prices WebSocket URL must not be empty"
    );
    anyhow::ensure!(
        config.endpoints.prices_ws_url.starts_with("ws"),
        "Prices WebSocket URL must be ws(s), got {}",
        config.endpoints.prices_ws_url
    );

    Ok(())
}
