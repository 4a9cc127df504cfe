//! Province / district / neighborhood / postal-code pages.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use postakod_core::{DirectoryStats, DistrictNeighborhoods, Lookup, PostalCodeLocations, ProvinceDistricts, ProvinceSummary};

use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::NeighborhoodResponse;

pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<DirectoryStats>, ApiError> {
    Ok(Json(state.directory.stats().await?))
}

pub async fn cities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProvinceSummary>>, ApiError> {
    Ok(Json(state.directory.list_provinces().await?))
}

pub async fn province(
    State(state): State<Arc<AppState>>,
    Path(il): Path<String>,
) -> Result<Json<ProvinceDistricts>, ApiError> {
    match state.directory.list_districts(&il).await? {
        Lookup::Found(districts) => Ok(Json(districts)),
        Lookup::NotFound => Err(ApiError::not_found("İl bulunamadı")),
    }
}

pub async fn district(
    State(state): State<Arc<AppState>>,
    Path((il, ilce)): Path<(String, String)>,
) -> Result<Json<DistrictNeighborhoods>, ApiError> {
    match state.directory.list_neighborhoods(&il, &ilce).await? {
        Lookup::Found(neighborhoods) => Ok(Json(neighborhoods)),
        Lookup::NotFound => Err(ApiError::not_found("İlçe bulunamadı")),
    }
}

pub async fn neighborhood(
    State(state): State<Arc<AppState>>,
    Path((il, ilce, mahalle)): Path<(String, String, String)>,
) -> Result<Json<NeighborhoodResponse>, ApiError> {
    let Lookup::Found(detail) = state.directory.neighborhood_detail(&il, &ilce, &mahalle).await? else {
        return Err(ApiError::not_found("Mahalle bulunamadı"));
    };
    let related_neighborhoods = state
        .related
        .sibling_neighborhoods(&detail.province_slug, &detail.district_slug, &detail.neighborhood_slug)
        .await?;
    Ok(Json(NeighborhoodResponse { detail, related_neighborhoods }))
}

pub async fn postal_code(
    State(state): State<Arc<AppState>>,
    Path(pk): Path<String>,
) -> Result<Json<PostalCodeLocations>, ApiError> {
    match state.directory.locations_for_postal_code(&pk).await? {
        Lookup::Found(locations) => Ok(Json(locations)),
        Lookup::NotFound => Err(ApiError::not_found("Posta kodu bulunamadı")),
    }
}
