use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use cyberwatch_core::Article;
use cyberwatch_relevance::{KeywordCount, SourceVolume, TrendWindow};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, today, validate_days, ApiError, ApiResponse, AppState, ResponseMeta};

const TOP_SOURCES: usize = 5;

#[derive(Debug, Deserialize)]
pub(super) struct TrendsQuery {
    pub days: Option<u32>,
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(super) struct TrendsData {
    start: NaiveDate,
    end: NaiveDate,
    article_count: usize,
    keywords: Vec<KeywordCount>,
    sources: Vec<SourceVolume>,
}

pub(super) async fn list_trends(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<TrendsQuery>,
) -> Result<Json<ApiResponse<TrendsData>>, ApiError> {
    let settings = &state.relevance.trends;
    let days = validate_days(&req_id.0, query.days, settings.window_days)?;
    let top = query.top.unwrap_or(settings.top_n);
    if top == 0 {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "top must be greater than zero",
        ));
    }

    let end = today();
    let since = cyberwatch_relevance::window_start(end, days);
    let rows = cyberwatch_db::list_articles_since(&state.pool, since, None)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    let articles: Vec<Article> = rows.into_iter().map(Article::from).collect();

    let window = TrendWindow::ending(end, days, &articles);
    tracing::debug!(
        fetched = articles.len(),
        in_window = window.len(),
        "trend window built"
    );
    let keywords = window.top_keywords(&state.relevance.trend_analyzer(), top);

    Ok(Json(ApiResponse {
        data: TrendsData {
            start: window.start,
            end: window.end,
            article_count: window.len(),
            sources: window.source_volume(TOP_SOURCES),
            keywords,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_sources(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let data = cyberwatch_db::list_sources(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
