use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use postakod_core::{LocationRecord, SearchTerm};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{PopularQuery, SearchQuery};

/// Run and log a search. A blank `q` yields `[]`.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<LocationRecord>>, ApiError> {
    let limit = query.capped_limit(state.search_limit);
    Ok(Json(state.search.search_and_log(&query.q, limit).await?))
}

pub async fn popular_searches(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PopularQuery>,
) -> Result<Json<Vec<SearchTerm>>, ApiError> {
    Ok(Json(state.search.popular_searches(query.capped_limit()).await?))
}
