//! Postgres persistence for Cyber-Watch articles.
//!
//! The database is the only authority on whether an article was seen before:
//! rows are keyed by link and inserted only when absent.

use std::collections::HashSet;
use std::time::Duration;

use cyberwatch_core::AppConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

pub mod articles;

pub use articles::{
    count_articles, insert_article_if_absent, list_articles_since, list_sources,
    search_candidates, ArticleRow,
};

// Resolved from crates/cyberwatch-db/Cargo.toml to <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Connection pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 10,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Open a pool against `database_url`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if no connection can be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(database_url)
        .await?;
    tracing::debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Apply every embedded migration the database has not recorded yet.
///
/// Returns how many were applied by this call.
///
/// # Errors
///
/// Returns [`sqlx::migrate::MigrateError`] if any migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, sqlx::migrate::MigrateError> {
    let already = applied_versions(pool).await;
    MIGRATOR.run(pool).await?;

    let applied = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .filter(|m| !already.contains(&m.version))
        .count();
    tracing::info!(applied, total = MIGRATOR.iter().count(), "migrations up to date");
    Ok(applied)
}

/// Versions recorded as successful. Empty on a fresh database, where the
/// bookkeeping table does not exist yet.
async fn applied_versions(pool: &PgPool) -> HashSet<i64> {
    sqlx::query_scalar::<_, i64>("SELECT version FROM _sqlx_migrations WHERE success")
        .fetch_all(pool)
        .await
        .map(|versions| versions.into_iter().collect())
        .unwrap_or_default()
}

/// Round-trip a trivial query.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}

/// [`ping`] wrapped in [`DbError`] for callers that report health.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the database does not answer.
pub async fn health_check(pool: &PgPool) -> Result<(), DbError> {
    Ok(ping(pool).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_is_small() {
        let config = PoolConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout_secs, 10);
    }

    #[test]
    fn embedded_migrations_include_articles_table() {
        assert!(MIGRATOR.iter().any(|m| m.description.contains("articles")));
    }
}
