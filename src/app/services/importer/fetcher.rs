//! Source fetching
//!
//! `http://` and `https://` locators are downloaded with reqwest; anything
//! else is treated as a filesystem path. Every fetch is bounded by the
//! configured timeout, and a timeout is an ordinary fetch failure.

use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::{Error, Result};

/// Capability to turn a locator into raw source text
pub trait SourceFetcher: Send + Sync {
    /// Fetch the full text behind a locator
    fn fetch(&self, locator: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches over HTTP(S) or from local files
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
    timeout: Duration,
}

impl SourceClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }

    fn is_remote(locator: &str) -> bool {
        locator.starts_with("http://") || locator.starts_with("https://")
    }

    async fn fetch_remote(&self, locator: &str) -> Result<String> {
        let response = self
            .client
            .get(locator)
            .send()
            .await
            .map_err(|e| Error::source_fetch_with(locator, "request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::source_fetch(
                locator,
                format!("server returned {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| Error::source_fetch_with(locator, "failed to read body", e))
    }

    async fn fetch_local(&self, locator: &str) -> Result<String> {
        let path = locator.strip_prefix("file://").unwrap_or(locator);
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::source_fetch_with(locator, "failed to read file", e))
    }
}

impl SourceFetcher for SourceClient {
    async fn fetch(&self, locator: &str) -> Result<String> {
        debug!("Fetching {}", locator);
        let fetch = async {
            if Self::is_remote(locator) {
                self.fetch_remote(locator).await
            } else {
                self.fetch_local(locator).await
            }
        };

        let text = tokio::time::timeout(self.timeout, fetch)
            .await
            .map_err(|_| {
                Error::source_fetch(
                    locator,
                    format!("timed out after {:?}", self.timeout),
                )
            })??;

        debug!("Fetched {} bytes from {}", text.len(), locator);
        Ok(text)
    }
}
