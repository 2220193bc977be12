//! Remote feed source
//!
//! Performs one page fetch against the remote API and translates transport
//! failures into the crate's error taxonomy. The source never retries: a
//! single call maps to at most one request, and retry policy (if any)
//! belongs to whoever drives the engine. Cancellation is dropping the
//! returned future; it is never converted into an error value.

mod types;

pub use types::{FeedResponse, ItemRecord, PageInfo};

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Configuration for the remote source
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the feed API (e.g. `https://api.example.com`)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl SourceConfig {
    /// Create a config for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("pagefeed/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Create a new config builder
    pub fn builder(base_url: impl Into<String>) -> SourceConfigBuilder {
        SourceConfigBuilder {
            config: Self::new(base_url),
        }
    }
}

/// Builder for source config
pub struct SourceConfigBuilder {
    config: SourceConfig,
}

impl SourceConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> SourceConfig {
        self.config
    }
}

/// The seam the pagination engine consumes.
///
/// `RemoteSource` is the production implementation; tests drive the engine
/// through in-memory fakes instead of a live server.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one page of the feed. `page` is 1-indexed.
    async fn fetch_page(&self, page: u32) -> Result<FeedResponse>;
}

/// HTTP-backed feed source
pub struct RemoteSource {
    client: Client,
    config: SourceConfig,
}

impl RemoteSource {
    /// Create a source from a config
    pub fn new(config: SourceConfig) -> Result<Self> {
        // Validate the base URL up front so a typo fails at construction,
        // not on the first fetch.
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::from)?;

        Ok(Self { client, config })
    }

    /// Create a source for a base URL with default settings
    pub fn for_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(SourceConfig::new(base_url))
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn items_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/items")
    }
}

#[async_trait]
impl PageSource for RemoteSource {
    async fn fetch_page(&self, page: u32) -> Result<FeedResponse> {
        let url = self.items_url();

        let mut req = self
            .client
            .get(&url)
            .query(&[("page", page.to_string())]);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req.send().await.map_err(|e| {
            warn!(page, error = %e, "page fetch failed");
            Error::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(page, status = status.as_u16(), "page fetch rejected");
            return Err(Error::unknown(format!(
                "HTTP {}: {}",
                status.as_u16(),
                if body.is_empty() {
                    "no response body"
                } else {
                    body.as_str()
                }
            )));
        }

        let body = response.text().await.map_err(Error::from)?;
        let feed: FeedResponse = serde_json::from_str(&body)?;

        debug!(page, records = feed.results.len(), "page fetched");
        Ok(feed)
    }
}

impl std::fmt::Debug for RemoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSource")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
