//! Database operations for the `articles` table.

use chrono::{DateTime, NaiveDate, Utc};
use cyberwatch_core::Article;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `articles` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: i64,
    pub published_date: NaiveDate,
    pub source: String,
    pub title: Option<String>,
    pub link: String,
    pub created_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        Article {
            source: row.source,
            title: row.title,
            link: row.link,
            published: row.published_date,
        }
    }
}

const ARTICLE_COLUMNS: &str = "id, published_date, source, title, link, created_at";

/// Inserts an article unless one with the same `link` already exists.
///
/// Returns `true` when a new row was written. The unique constraint on
/// `link` is the only deduplication in the system.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_article_if_absent(pool: &PgPool, article: &Article) -> Result<bool, DbError> {
    let result = sqlx::query(
        "INSERT INTO articles (published_date, source, title, link) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (link) DO NOTHING",
    )
    .bind(article.published)
    .bind(&article.source)
    .bind(article.title.as_deref())
    .bind(&article.link)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Articles published on or after `since`, newest first.
///
/// `limit` caps the number of rows; `None` returns them all.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_articles_since(
    pool: &PgPool,
    since: NaiveDate,
    limit: Option<i64>,
) -> Result<Vec<ArticleRow>, DbError> {
    let rows = sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles \
         WHERE published_date >= $1 \
         ORDER BY published_date DESC, id DESC \
         LIMIT $2"
    ))
    .bind(since)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Articles whose title or source contains `term`, case-insensitively.
///
/// This only narrows the candidate set; relevance ordering happens in the
/// caller so every tool ranks with the same algorithm.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_candidates(pool: &PgPool, term: &str) -> Result<Vec<ArticleRow>, DbError> {
    let pattern = like_pattern(term.trim());
    let rows = sqlx::query_as::<_, ArticleRow>(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles \
         WHERE title ILIKE $1 ESCAPE '\\' OR source ILIKE $1 ESCAPE '\\' \
         ORDER BY published_date DESC, id DESC"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Distinct source labels, alphabetically.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_sources(pool: &PgPool) -> Result<Vec<String>, DbError> {
    let sources =
        sqlx::query_scalar::<_, String>("SELECT DISTINCT source FROM articles ORDER BY source")
            .fetch_all(pool)
            .await?;
    Ok(sources)
}

/// Total number of stored articles.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_articles(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// `%term%` with LIKE metacharacters escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
