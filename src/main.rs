//! Crypto Price Feed — Entry Point
//!
//! Initializes configuration and logging, loads the instrument list once,
//! then streams live prices until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml (falls back to defaults when absent)
//! 2. Init tracing (JSON structured logging, env-filter override)
//! 3. Create ReqwestHttpClient + RemoteMarketLoader, fetch the market list
//! 4. Create TungsteniteWebsocketClient + RemotePricesReceiver
//! 5. Spawn the receive session, log every snapshot
//! 6. Wait for SIGINT → stop_receive → session drains on the Closed event

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use crypto_price_feed::adapters::{ReqwestHttpClient, TungsteniteWebsocketClient};
use crypto_price_feed::config::{self, AppConfig};
use crypto_price_feed::domain::market::PriceSnapshot;
use crypto_price_feed::ports::prices_listener::PricesListener;
use crypto_price_feed::usecases::{RemoteMarketLoader, RemotePricesReceiver};

/// Listener that logs every protocol event through tracing.
struct LoggingListener;

impl PricesListener for LoggingListener {
    fn on_closed(&self) {
        info!("Price stream session ended");
    }

    fn on_opened(&self) {
        info!("Price stream session opened");
    }

    fn on_subscribe_error(&self) {
        warn!("Subscribe failed; stream is idle until the session closes");
    }

    fn on_subscribe_success(&self) {
        info!("Subscribed to the coinIndex channel");
    }

    fn on_receive_error(&self) {
        warn!("Receive failed; stream will stay silent for this session");
    }

    fn on_receive_invalid_data(&self) {
        warn!("Dropped an undecodable price message");
    }

    fn on_prices(&self, prices: PriceSnapshot) {
        for (key, price) in &prices {
            info!(key = %key, price = price.price, "Price update");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration ───────────────────────────────
    let config = match config::loader::load_config("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Using default configuration: {e:#}");
            AppConfig::default()
        }
    };

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.feed.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.feed.name,
        version = env!("CARGO_PKG_VERSION"),
        "Starting crypto price feed"
    );

    // ── 3. Fetch the tradable-instrument list ───────────────
    let http = Arc::new(ReqwestHttpClient::new().context("HTTP adapter setup failed")?);
    let loader = RemoteMarketLoader::new(config.endpoints.market_list_url.clone(), http);

    match loader.load().await {
        Ok(markets) => {
            let futures = markets.iter().filter(|m| m.future).count();
            info!(
                total = markets.len(),
                futures,
                spot = markets.len() - futures,
                "Market list loaded"
            );
        }
        Err(e) => warn!(error = %e, "Market list unavailable, streaming anyway"),
    }

    // ── 4. Wire the live price stream ───────────────────────
    let listener: Arc<dyn PricesListener> = Arc::new(LoggingListener);
    let socket = Arc::new(TungsteniteWebsocketClient::new());
    let receiver = Arc::new(RemotePricesReceiver::new(
        config.endpoints.prices_ws_url.clone(),
        socket,
        Arc::downgrade(&listener),
    ));

    // ── 5. Run the session until SIGINT ─────────────────────
    let session = {
        let receiver = Arc::clone(&receiver);
        tokio::spawn(async move { receiver.start_receive().await })
    };

    signal::ctrl_c().await.context("Failed to listen for SIGINT")?;
    info!("SIGINT received, shutting down");

    receiver.stop_receive().await;
    session.await.context("Price stream session panicked")?;

    info!("Shutdown complete");
    Ok(())
}
