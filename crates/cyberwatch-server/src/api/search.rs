use axum::{
    extract::{Query, State},
    Extension, Json,
};
use cyberwatch_core::Article;
use cyberwatch_relevance::{SearchHit, SearchRanker};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_db_error, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

const MIN_TERM_CHARS: usize = 2;

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

pub(super) async fn search_articles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<SearchHit>>>, ApiError> {
    let term = query.q.as_deref().map(str::trim).unwrap_or_default();
    if term.chars().count() < MIN_TERM_CHARS {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!("q must be at least {MIN_TERM_CHARS} characters"),
        ));
    }

    let rows = cyberwatch_db::search_candidates(&state.pool, term)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let mut data = SearchRanker::new(term).rank(rows.into_iter().map(Article::from));
    data.truncate(normalize_limit(query.limit));
    tracing::debug!(term, hits = data.len(), "search served");

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
