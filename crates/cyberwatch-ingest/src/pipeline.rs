//! Scrape pipeline: fetch → persist new → score → gate → notify.

use std::collections::HashSet;

use chrono::NaiveDate;
use cyberwatch_core::{load_feeds, AppConfig, Article, FeedConfig};
use cyberwatch_relevance::{RelevanceConfig, ScoredArticle};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use sqlx::PgPool;

use crate::client::FeedClient;
use crate::error::IngestError;
use crate::notify::{AlertPayload, WebhookNotifier};

/// Counters reported after a scrape run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrapeSummary {
    /// Articles offered for storage.
    pub fetched: usize,
    /// Articles whose link was not stored yet.
    pub inserted: usize,
    /// Newly inserted articles that passed the alert gate.
    pub alerts: usize,
    pub failed_inserts: usize,
}

/// Fetch every feed with at most `max_concurrent` requests in flight.
///
/// Results keep the order of `feeds`. A feed that fails is logged and
/// contributes no articles.
pub async fn collect_feeds(
    client: &FeedClient,
    feeds: &[FeedConfig],
    max_items: usize,
    max_concurrent: usize,
    today: NaiveDate,
) -> Vec<Article> {
    let fetches: Vec<_> = feeds
        .iter()
        .map(|feed| async move { (feed, client.fetch_feed(feed, max_items, today).await) })
        .collect();
    let results: Vec<(&FeedConfig, Result<Vec<Article>, IngestError>)> = stream::iter(fetches)
        .buffered(max_concurrent.max(1))
        .collect()
        .await;

    let mut articles = Vec::new();
    let mut failed_feeds = 0usize;
    for (feed, result) in results {
        match result {
            Ok(items) => {
                tracing::info!(feed = %feed.name, count = items.len(), "feed fetched");
                articles.extend(items);
            }
            Err(e) => {
                failed_feeds += 1;
                tracing::warn!(feed = %feed.name, url = %feed.url, error = %e, "feed fetch failed");
            }
        }
    }

    if failed_feeds > 0 {
        tracing::warn!(failed_feeds, total_feeds = feeds.len(), "some feeds failed");
    }
    articles
}

/// Drop the articles at the given 1-based positions.
///
/// Positions outside `1..=articles.len()` are ignored.
#[must_use]
pub fn exclude_by_position(articles: Vec<Article>, positions: &[usize]) -> Vec<Article> {
    if positions.is_empty() {
        return articles;
    }
    let skip: HashSet<usize> = positions.iter().copied().collect();
    articles
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !skip.contains(&(i + 1)))
        .map(|(_, a)| a)
        .collect()
}

/// Score `articles` and keep those that pass the alert gate, in input order.
#[must_use]
pub fn select_alerts(articles: Vec<Article>, relevance: &RelevanceConfig) -> Vec<ScoredArticle> {
    let scorer = relevance.scorer();
    let gate = relevance.alert_gate();
    articles
        .into_iter()
        .map(|a| scorer.score_article(a))
        .filter(|s| gate.should_alert(s.score))
        .collect()
}

/// Store articles not seen before, then alert on the relevant new ones.
///
/// Only rows inserted by this call are scored, so a story is announced at
/// most once. Insert failures are logged and counted; notification failures
/// are logged by the notifier. Neither aborts the run.
pub async fn persist_and_alert(
    pool: &PgPool,
    articles: Vec<Article>,
    relevance: &RelevanceConfig,
    notifier: Option<&WebhookNotifier>,
) -> ScrapeSummary {
    let mut summary = ScrapeSummary {
        fetched: articles.len(),
        ..ScrapeSummary::default()
    };

    let mut fresh = Vec::new();
    for article in articles {
        match cyberwatch_db::insert_article_if_absent(pool, &article).await {
            Ok(true) => fresh.push(article),
            Ok(false) => {}
            Err(e) => {
                summary.failed_inserts += 1;
                tracing::error!(link = %article.link, error = %e, "failed to store article");
            }
        }
    }
    summary.inserted = fresh.len();

    let alerts = select_alerts(fresh, relevance);
    summary.alerts = alerts.len();
    for scored in &alerts {
        let payload = AlertPayload::from(scored);
        match notifier {
            Some(notifier) => {
                notifier.notify(&payload).await;
            }
            None => {
                tracing::info!(
                    source = %payload.source,
                    title = %payload.title,
                    score = payload.score,
                    "alert raised (no webhook configured)"
                );
            }
        }
    }

    summary
}

/// Run one complete scrape using the application configuration.
///
/// # Errors
///
/// Returns [`IngestError`] if the feed list cannot be loaded or an HTTP
/// client cannot be built. Per-feed and per-article failures are not errors.
pub async fn run_scrape(
    pool: &PgPool,
    config: &AppConfig,
    relevance: &RelevanceConfig,
    skip: &[usize],
    today: NaiveDate,
) -> Result<ScrapeSummary, IngestError> {
    let feeds = load_feeds(&config.feeds_path)?;
    let client = FeedClient::new(
        config.fetch_timeout_secs,
        &config.fetch_user_agent,
        config.fetch_max_retries,
        config.fetch_retry_backoff_base_secs,
    )?;
    let notifier = config
        .webhook_url
        .as_deref()
        .map(|url| WebhookNotifier::new(url, config.webhook_timeout_secs))
        .transpose()?;

    let articles = collect_feeds(
        &client,
        &feeds.feeds,
        config.fetch_max_items,
        config.fetch_max_concurrent_feeds,
        today,
    )
    .await;
    let articles = exclude_by_position(articles, skip);

    let summary = persist_and_alert(pool, articles, relevance, notifier.as_ref()).await;
    tracing::info!(
        fetched = summary.fetched,
        inserted = summary.inserted,
        alerts = summary.alerts,
        failed_inserts = summary.failed_inserts,
        "scrape complete"
    );
    Ok(summary)
}
