//! HTTP client for RSS/Atom feeds.

use std::time::Duration;

use chrono::NaiveDate;
use cyberwatch_core::{Article, FeedConfig};
use reqwest::Client;

use crate::error::IngestError;
use crate::parse::parse_feed;
use crate::retry::retry_with_backoff;

/// Fetches feeds over HTTP with a per-request timeout and retry policy.
///
/// Transient errors (network failures, 429, 5xx) are retried with
/// exponential backoff up to `max_retries` additional attempts.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl FeedClient {
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Download and parse one feed.
    ///
    /// # Errors
    ///
    /// - [`IngestError::RateLimited`]: HTTP 429 after all retries.
    /// - [`IngestError::UnexpectedStatus`]: any other non-2xx status (5xx retried).
    /// - [`IngestError::Http`]: network or TLS failure after all retries.
    /// - [`IngestError::Parse`]: the body is not a feed (not retried).
    pub async fn fetch_feed(
        &self,
        feed: &FeedConfig,
        max_items: usize,
        today: NaiveDate,
    ) -> Result<Vec<Article>, IngestError> {
        let body = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.fetch_body(&feed.url)
        })
        .await?;

        let articles = parse_feed(&body, &feed.name, max_items, today)?;
        tracing::debug!(feed = %feed.name, count = articles.len(), "feed parsed");
        Ok(articles)
    }

    async fn fetch_body(&self, url: &str) -> Result<Vec<u8>, IngestError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "application/rss+xml, application/atom+xml, application/xml;q=0.9, */*;q=0.8",
            )
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(IngestError::RateLimited {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(IngestError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
