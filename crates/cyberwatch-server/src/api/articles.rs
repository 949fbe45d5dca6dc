use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use cyberwatch_core::Article;
use cyberwatch_relevance::{scored_articles_csv, window_start, ArticleFilter, FeedSummary, ScoredArticle};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{
    map_db_error, normalize_limit, today, validate_days, ApiError, ApiResponse, AppState,
    ResponseMeta,
};

const DEFAULT_DAYS: u32 = 90;

#[derive(Debug, Default, Deserialize)]
pub(super) struct ArticlesQuery {
    pub days: Option<u32>,
    /// Case-insensitive title filter.
    pub q: Option<String>,
    /// Comma-separated source labels.
    pub sources: Option<String>,
    pub limit: Option<i64>,
}

impl ArticlesQuery {
    fn source_list(&self) -> Vec<String> {
        self.sources
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Load the articles of the requested window, apply filters, and rank them.
async fn ranked_window(
    state: &AppState,
    req_id: &RequestId,
    query: &ArticlesQuery,
) -> Result<Vec<ScoredArticle>, ApiError> {
    let days = validate_days(&req_id.0, query.days, DEFAULT_DAYS)?;
    let since = window_start(today(), days);

    let rows = cyberwatch_db::list_articles_since(&state.pool, since, None)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let filter = ArticleFilter {
        since: Some(since),
        sources: query.source_list(),
        title_query: query.q.clone(),
    };
    let articles = filter.apply(rows.into_iter().map(Article::from));
    Ok(state.relevance.ranker().rank(articles))
}

pub(super) async fn list_articles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ArticlesQuery>,
) -> Result<Json<ApiResponse<Vec<ScoredArticle>>>, ApiError> {
    let mut data = ranked_window(&state, &req_id, &query).await?;
    data.truncate(normalize_limit(query.limit));

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn articles_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ArticlesQuery>,
) -> Result<Json<ApiResponse<FeedSummary>>, ApiError> {
    let ranked = ranked_window(&state, &req_id, &query).await?;

    Ok(Json(ApiResponse {
        data: FeedSummary::from_ranked(&ranked),
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Full ranked window as CSV. `limit` is ignored.
pub(super) async fn export_articles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ArticlesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let ranked = ranked_window(&state, &req_id, &query).await?;
    let filename = format!("cyberwatch_{}.csv", today().format("%Y%m%d"));

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        scored_articles_csv(&ranked),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_list_splits_and_trims() {
        let query = ArticlesQuery {
            sources: Some(" Korben, ,[CYBER] Zataz ".to_string()),
            ..ArticlesQuery::default()
        };
        assert_eq!(query.source_list(), vec!["Korben", "[CYBER] Zataz"]);
    }

    #[test]
    fn missing_sources_means_no_filter() {
        assert!(ArticlesQuery::default().source_list().is_empty());
    }
}
