use cyberwatch_core::Article;
use cyberwatch_relevance::{SearchRanker, TITLE_MATCH_BONUS};

/// Search stored articles and print the best matches.
///
/// Title matches are starred. Candidates come from the database; ordering is
/// done by [`SearchRanker`] so it agrees with the dashboard.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_search(pool: &sqlx::PgPool, term: &str, limit: usize) -> anyhow::Result<()> {
    let rows = cyberwatch_db::search_candidates(pool, term).await?;
    let ranker = SearchRanker::new(term);
    let hits = ranker.rank(rows.into_iter().map(Article::from));

    if hits.is_empty() {
        println!("no articles match '{}'", ranker.term());
        return Ok(());
    }

    println!("{} match(es) for '{}'", hits.len(), ranker.term());
    for (i, hit) in hits.iter().take(limit).enumerate() {
        let marker = if hit.score >= TITLE_MATCH_BONUS { "⭐" } else { "  " };
        println!(
            "{marker} {:>2}. {}  {} | {}",
            i + 1,
            hit.article.published,
            hit.article.source,
            hit.article.display_title()
        );
        println!("       {}", hit.article.link);
    }
    Ok(())
}
