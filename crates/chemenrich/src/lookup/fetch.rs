//! HTTP fetching seam.
//!
//! Lookups talk to the network only through [`Fetcher`], so the HMDB and
//! PubMed clients can be driven by [`MockFetcher`](super::MockFetcher) in
//! tests and by [`HttpFetcher`] in production.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

use crate::error::{EnrichError, Result};

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("chemenrich/", env!("CARGO_PKG_VERSION"));

/// Why a GET did not produce a page body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request exceeded the client timeout.
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} for url: {url}")]
    Status { status: u16, url: String },

    /// Connection, TLS, redirect or body decoding failure.
    #[error("{0}")]
    Transport(String),
}

/// Performs a single blocking GET and returns the response body.
///
/// Implementations must be thread-safe (Send + Sync) so one client can be
/// shared behind an `Arc`.
pub trait Fetcher: Send + Sync {
    fn get(&self, url: &str) -> std::result::Result<String, FetchError>;
}

/// [`Fetcher`] backed by a blocking reqwest client.
///
/// Certificates are verified against the platform's standard root bundle.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| EnrichError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn classify(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str) -> std::result::Result<String, FetchError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        response.text().map_err(|e| self.classify(url, e))
    }
}
