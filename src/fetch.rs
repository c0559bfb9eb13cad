// Best-effort JSON fetching from upstream providers.
//
// Every provider call in this crate goes through the `JsonFetcher` trait so
// the aggregation pipeline can be tested with canned responses. The
// degrade-to-default policy lives at the call sites: a `FetchError` is mapped
// to `None` and logged, never propagated to an API caller.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} -> {status}")]
    Status { url: String, status: u16 },

    #[error("GET {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
}

/// Capability for fetching a JSON document from a URL.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// Production fetcher backed by a shared reqwest client with a bounded
/// per-request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })
    }
}

/// Fetch a JSON document, absorbing any failure into `None`.
///
/// Upstream unavailability is an expected condition for this service, so
/// failures are logged at info level and the caller substitutes defaults.
pub async fn fetch_or_none(fetcher: &dyn JsonFetcher, url: &str) -> Option<Value> {
    match fetcher.fetch_json(url).await {
        Ok(value) => Some(value),
        Err(e) => {
            info!("{e}");
            None
        }
    }
}
