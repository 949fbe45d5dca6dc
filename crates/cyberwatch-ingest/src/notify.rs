//! Webhook notification sink for high-scoring articles.

use std::time::Duration;

use cyberwatch_relevance::ScoredArticle;
use reqwest::Client;
use serde::Serialize;

use crate::error::IngestError;

/// JSON body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPayload {
    pub title: String,
    pub source: String,
    pub link: String,
    pub score: u32,
}

impl From<&ScoredArticle> for AlertPayload {
    fn from(scored: &ScoredArticle) -> Self {
        Self {
            title: scored.article.display_title().to_string(),
            source: scored.article.source.clone(),
            link: scored.article.link.clone(),
            score: scored.score,
        }
    }
}

/// Posts alerts to a webhook URL. Delivery is best effort.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] if the HTTP client cannot be constructed.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// POST `payload` as JSON. Returns whether the sink accepted it.
    ///
    /// Failures (timeout, connection error, non-2xx) are logged and never
    /// returned, so an unavailable sink cannot stall ingestion.
    pub async fn notify(&self, payload: &AlertPayload) -> bool {
        match self.client.post(&self.url).json(payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(link = %payload.link, score = payload.score, "alert delivered");
                true
            }
            Ok(response) => {
                tracing::warn!(
                    status = response.status().as_u16(),
                    link = %payload.link,
                    "webhook rejected alert"
                );
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, link = %payload.link, "webhook delivery failed");
                false
            }
        }
    }
}
