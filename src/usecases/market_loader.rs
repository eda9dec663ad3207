//! Market Loader - Instrument List Use Case
//!
//! One HTTP round trip: GET the configured endpoint, validate status and
//! payload, decode into domain `Market` values. No retry, no caching —
//! overlapping `load` calls are independent requests, and retry policy
//! belongs to the caller.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::market::Market;
use crate::ports::http_client::HttpClient;
use crate::usecases::wire::{RemoteMarket, RemoteMarketEnvelope};

/// Terminal outcome classification for a single `load` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The transport never produced a response.
    #[error("could not reach the market list endpoint")]
    Connectivity,
    /// A response arrived but failed status or structural validation.
    #[error("market list response failed validation")]
    InvalidData,
}

/// Fetches and validates the tradable-instrument list.
pub struct RemoteMarketLoader {
    url: String,
    client: Arc<dyn HttpClient>,
}

impl RemoteMarketLoader {
    pub fn new(url: impl Into<String>, client: Arc<dyn HttpClient>) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// Load the market list.
    ///
    /// Succeeds only when the response is status 200, non-empty, decodes as
    /// the upstream envelope, and carries a non-empty `data` array. The
    /// returned order matches the response array exactly.
    ///
    /// # Errors
    /// `Connectivity` on transport failure, `InvalidData` on any
    /// validation failure.
    pub async fn load(&self) -> Result<Vec<Market>, LoadError> {
        let response = self.client.get(&self.url).await.map_err(|e| {
            warn!(url = %self.url, error = %e, "Market list request failed");
            LoadError::Connectivity
        })?;

        if response.status != 200 {
            warn!(status = response.status, "Unexpected market list status");
            return Err(LoadError::InvalidData);
        }
        if response.body.is_empty() {
            return Err(LoadError::InvalidData);
        }

        let envelope: RemoteMarketEnvelope =
            serde_json::from_slice(&response.body).map_err(|e| {
                debug!(error = %e, "Market list body is not a valid envelope");
                LoadError::InvalidData
            })?;

        let markets = envelope
            .data
            .filter(|data| !data.is_empty())
            .ok_or(LoadError::InvalidData)?;

        debug!(count = markets.len(), "Market list loaded");

        Ok(markets.into_iter().map(RemoteMarket::into_model).collect())
    }
}
