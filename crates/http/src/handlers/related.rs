use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use postakod_core::{LocationRecord, NeighboringDistrict};

use crate::AppState;
use crate::api_error::ApiError;

pub async fn neighboring_districts(
    State(state): State<Arc<AppState>>,
    Path((il, ilce)): Path<(String, String)>,
) -> Result<Json<Vec<NeighboringDistrict>>, ApiError> {
    Ok(Json(state.related.neighboring_districts(&il, &ilce).await?))
}

pub async fn similar_neighborhoods(
    State(state): State<Arc<AppState>>,
    Path((il, ilce, mahalle)): Path<(String, String, String)>,
) -> Result<Json<Vec<LocationRecord>>, ApiError> {
    Ok(Json(state.related.similar_to(&il, &ilce, &mahalle).await?))
}
