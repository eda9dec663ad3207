//! Reqwest HTTP Adapter
//!
//! Implements the `HttpClient` port over reqwest. Thin on purpose: one GET,
//! raw bytes and status out. Validation, decoding, and error taxonomy live
//! in the loader use case, not here.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::ports::http_client::{HttpClient, HttpResponse};

/// Default per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `HttpClient` backed by a shared reqwest client.
pub struct ReqwestHttpClient {
    http: Client,
}

impl ReqwestHttpClient {
    /// Build the adapter with its own connection pool.
    ///
    /// # Errors
    /// Fails only if the underlying TLS/client setup fails.
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("GET {url}: reading body failed"))?
            .to_vec();

        debug!(url, status, len = body.len(), "HTTP GET completed");

        Ok(HttpResponse { body, status })
    }
}
