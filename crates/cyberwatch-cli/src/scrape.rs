//! `scrape` command handlers.

use std::collections::HashSet;

use cyberwatch_core::{load_feeds, AppConfig};
use cyberwatch_ingest::{collect_feeds, FeedClient};
use cyberwatch_relevance::RelevanceConfig;

/// Fetch every feed and store new articles, alerting on relevant ones.
///
/// # Errors
///
/// Returns an error if the feed list cannot be loaded or the HTTP clients
/// cannot be built. Individual feed and insert failures are logged only.
pub(crate) async fn run_scrape(
    pool: &sqlx::PgPool,
    config: &AppConfig,
    relevance: &RelevanceConfig,
    skip: &[usize],
) -> anyhow::Result<()> {
    let today = cyberwatch_core::today();
    let summary = cyberwatch_ingest::run_scrape(pool, config, relevance, skip, today).await?;
    println!(
        "fetched {} article(s): {} new, {} alert(s), {} failed insert(s)",
        summary.fetched, summary.inserted, summary.alerts, summary.failed_inserts
    );
    Ok(())
}

/// Fetch every feed and print the numbered, scored articles.
///
/// Touches neither the database nor the webhook. Positions printed here are
/// the ones `--skip` refers to.
///
/// # Errors
///
/// Returns an error if the feed list cannot be loaded or the feed client
/// cannot be built.
pub(crate) async fn run_scrape_dry_run(
    config: &AppConfig,
    relevance: &RelevanceConfig,
    skip: &[usize],
) -> anyhow::Result<()> {
    let feeds = load_feeds(&config.feeds_path)?;
    tracing::info!(feeds = feeds.feeds.len(), "dry-run: fetching feeds");
    let client = FeedClient::new(
        config.fetch_timeout_secs,
        &config.fetch_user_agent,
        config.fetch_max_retries,
        config.fetch_retry_backoff_base_secs,
    )?;

    let articles = collect_feeds(
        &client,
        &feeds.feeds,
        config.fetch_max_items,
        config.fetch_max_concurrent_feeds,
        cyberwatch_core::today(),
    )
    .await;

    if articles.is_empty() {
        println!("dry-run: no articles fetched from {} feed(s)", feeds.feeds.len());
        return Ok(());
    }

    let skip: HashSet<usize> = skip.iter().copied().collect();
    let scorer = relevance.scorer();
    let gate = relevance.alert_gate();
    let mut would_alert = 0usize;

    println!("{:>4}  {:>5}  {:<28}TITLE", "#", "SCORE", "SOURCE");
    for (i, article) in articles.iter().enumerate() {
        let position = i + 1;
        let score = scorer.score(article.title.as_deref());
        let marker = if skip.contains(&position) {
            " (skipped)"
        } else {
            if gate.should_alert(score) {
                would_alert += 1;
            }
            ""
        };
        println!(
            "{position:>4}  {score:>5}  {:<28}{}{marker}",
            crate::ellipsize(&article.source, 26),
            crate::ellipsize(article.display_title(), 70),
        );
    }

    println!(
        "dry-run: {} article(s), {} skipped, {} at or above alert threshold {}",
        articles.len(),
        (1..=articles.len()).filter(|p| skip.contains(p)).count(),
        would_alert,
        gate.threshold()
    );
    Ok(())
}
