//! HTTP fetcher implementation
//!
//! This module handles the single HTTP request made per crawl:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests to fetch page content (redirects are followed)
//! - Error classification into a `FetchFailure`

use crate::config::FetchConfig;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchCause {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Network(String),
}

/// A failed fetch; local to one crawl, never fatal to the program
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch {url}: {cause}")]
pub struct FetchFailure {
    pub url: String,
    pub cause: FetchCause,
}

impl FetchFailure {
    pub fn new(url: impl Into<String>, cause: FetchCause) -> Self {
        Self {
            url: url.into(),
            cause,
        }
    }
}

/// Anything that can turn a URL into a response body
pub trait Fetcher {
    /// Fetches `url`, failing on network errors, timeouts and non-2xx statuses
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchFailure>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sumi_scribe::config::FetchConfig;
/// use sumi_scribe::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `Fetcher` backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::new(url, classify_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::new(url, FetchCause::Status(status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|e| FetchFailure::new(url, classify_error(&e)))
    }
}

fn classify_error(e: &reqwest::Error) -> FetchCause {
    if e.is_timeout() {
        FetchCause::Timeout
    } else if e.is_builder() {
        FetchCause::InvalidUrl(e.to_string())
    } else if e.is_connect() {
        FetchCause::Connect(e.to_string())
    } else {
        FetchCause::Network(e.to_string())
    }
}
