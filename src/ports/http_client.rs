//! HTTP Client Port - Request/Response Transport Interface
//!
//! Defines the trait the market loader requires from an HTTP transport.
//! Adapters implement this over a real client (reqwest); tests mock it.

use async_trait::async_trait;

/// Raw outcome of a single HTTP GET: body bytes plus status code.
///
/// Kept transport-agnostic on purpose — no header map, no typed status.
/// The loader only ever inspects the status code and the body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response body, possibly empty.
    pub body: Vec<u8>,
    /// HTTP status code.
    pub status: u16,
}

/// Trait for issuing HTTP GET requests.
///
/// One call, one request. An `Err` means the transport never produced a
/// response (DNS, TLS, connection reset); any received response, whatever
/// its status, comes back as `Ok`.
#[async_trait]
pub trait HttpClient: Send + Sync + 'static {
    /// Issue a GET to `url` and deliver the raw response.
    async fn get(&self, url: &str) -> anyhow::Result<HttpResponse>;
}
