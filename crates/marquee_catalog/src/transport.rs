//! The seam between the client and the wire.

use async_trait::async_trait;
use derive_new::new;
use reqwest::Url;

/// What the provider sent back, before any interpretation.
#[derive(Debug, Clone, new)]
pub struct ProviderResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

/// The request was made but no usable reply came back.
///
/// Covers connection failures, resets mid-body, and client-side timeouts
/// alike: from the caller's point of view they are all connectivity loss.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("transport failure: {}", message)]
pub struct TransportFailure {
    /// Description of the underlying failure.
    pub message: String,
}

impl TransportFailure {
    /// Create a transport failure with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Where all catalog HTTP traffic crosses the process boundary.
///
/// Production code uses [`HttpTransport`]; tests substitute a scripted
/// implementation.
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    /// Perform a GET against the provider and return the raw reply.
    async fn get(&self, url: &Url) -> Result<ProviderResponse, TransportFailure>;
}

/// Production transport over a shared reqwest client.
///
/// The client is expected to carry the configured request timeout; an
/// elapsed timeout surfaces here as a [`TransportFailure`] and is
/// therefore retryable like any other connectivity loss.
#[derive(Debug, Clone, new)]
pub struct HttpTransport {
    http: reqwest::Client,
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<ProviderResponse, TransportFailure> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(from_reqwest)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(from_reqwest)?;
        Ok(ProviderResponse::new(status, body))
    }
}

// The failure text must not echo the URL: its query string carries the
// API key.
fn from_reqwest(err: reqwest::Error) -> TransportFailure {
    TransportFailure::new(err.without_url().to_string())
}
