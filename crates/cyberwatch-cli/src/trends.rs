use cyberwatch_core::Article;
use cyberwatch_relevance::{window_start, RelevanceConfig, TrendWindow};

const TOP_SOURCES: usize = 5;

/// Print the busiest sources and most frequent title keywords of the window.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_trends(
    pool: &sqlx::PgPool,
    relevance: &RelevanceConfig,
    days: Option<u32>,
    top: Option<usize>,
) -> anyhow::Result<()> {
    let days = days.unwrap_or(relevance.trends.window_days);
    let top = top.unwrap_or(relevance.trends.top_n);
    let today = cyberwatch_core::today();

    let rows = cyberwatch_db::list_articles_since(pool, window_start(today, days), None).await?;
    let articles: Vec<Article> = rows.into_iter().map(Article::from).collect();
    let window = TrendWindow::ending(today, days, &articles);
    if window.is_empty() {
        println!("no articles in the last {days} day(s); run `scrape` first");
        return Ok(());
    }

    println!(
        "{} article(s) from {} to {}",
        window.len(),
        window.start,
        window.end
    );

    println!();
    println!("{:<40}ARTICLES", "TOP SOURCES");
    for volume in window.source_volume(TOP_SOURCES) {
        println!("{:<40}{}", crate::ellipsize(&volume.source, 38), volume.count);
    }

    println!();
    println!("{:<40}MENTIONS", "TOP KEYWORDS");
    let keywords = window.top_keywords(&relevance.trend_analyzer(), top);
    if keywords.is_empty() {
        println!("(none)");
    }
    for keyword in keywords {
        println!("{:<40}{}", keyword.token, keyword.count);
    }
    Ok(())
}
