//! `feed` command: the ranked article list with headline numbers.

use std::path::PathBuf;

use anyhow::Context;
use cyberwatch_core::Article;
use cyberwatch_relevance::{
    scored_articles_csv, window_start, ArticleFilter, FeedSummary, RelevanceConfig,
};

#[derive(Debug)]
pub(crate) struct FeedOptions {
    pub days: u32,
    pub query: Option<String>,
    pub sources: Vec<String>,
    pub limit: usize,
    pub export: Option<PathBuf>,
}

/// # Errors
///
/// Returns an error if the database query fails or the export file cannot
/// be written.
pub(crate) async fn run_feed(
    pool: &sqlx::PgPool,
    relevance: &RelevanceConfig,
    options: &FeedOptions,
) -> anyhow::Result<()> {
    let since = window_start(cyberwatch_core::today(), options.days);
    let rows = cyberwatch_db::list_articles_since(pool, since, None).await?;

    let filter = ArticleFilter {
        since: Some(since),
        sources: options.sources.clone(),
        title_query: options.query.clone(),
    };
    let ranked = relevance
        .ranker()
        .rank(filter.apply(rows.into_iter().map(Article::from)));
    let summary = FeedSummary::from_ranked(&ranked);

    println!(
        "articles: {}  relevant: {}  top source: {}  latest: {}",
        summary.total,
        summary.relevant,
        summary.top_source.as_deref().unwrap_or("-"),
        summary
            .latest
            .map_or_else(|| "-".to_string(), |d| d.to_string())
    );

    if ranked.is_empty() {
        println!("no articles match these filters");
    } else {
        println!();
        println!("{:>5}  {:<12}{:<28}TITLE", "SCORE", "DATE", "SOURCE");
        for scored in ranked.iter().take(options.limit) {
            println!(
                "{:>5}  {:<12}{:<28}{}",
                scored.score,
                scored.article.published.to_string(),
                crate::ellipsize(&scored.article.source, 26),
                crate::ellipsize(scored.article.display_title(), 70)
            );
        }
        if ranked.len() > options.limit {
            println!("... {} more", ranked.len() - options.limit);
        }
    }

    if let Some(path) = &options.export {
        std::fs::write(path, scored_articles_csv(&ranked))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("exported {} article(s) to {}", ranked.len(), path.display());
    }
    Ok(())
}
