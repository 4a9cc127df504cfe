//! Sitemap index, URL sets and robots.txt.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use postakod_core::Lookup;
use postakod_service::SitemapUrl;

use crate::AppState;
use crate::api_error::ApiError;
use crate::sitemap_xml::{self, CONTENT_TYPE};

fn xml(body: String) -> Response {
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}

fn urlset(urls: &[SitemapUrl]) -> Response {
    xml(sitemap_xml::render_urlset(urls, Utc::now().date_naive()))
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let locations = state.sitemap.index_locations().await?;
    Ok(xml(sitemap_xml::render_index(&locations, Utc::now().date_naive())))
}

pub async fn static_pages(State(state): State<Arc<AppState>>) -> Response {
    urlset(&state.sitemap.static_urls())
}

pub async fn cities(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    Ok(urlset(&state.sitemap.province_urls().await?))
}

pub async fn districts(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    Ok(urlset(&state.sitemap.district_urls().await?))
}

pub async fn postal_codes(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    Ok(urlset(&state.sitemap.postal_code_urls().await?))
}

/// `part` is `"{n}.xml"` or a bare `"{n}"`, counted from 1.
pub async fn neighborhoods(
    State(state): State<Arc<AppState>>,
    Path(part): Path<String>,
) -> Result<Response, ApiError> {
    let number = part.strip_suffix(".xml").unwrap_or(&part);
    let Ok(number) = number.parse::<usize>() else {
        return Err(ApiError::not_found("Sitemap bulunamadı"));
    };
    match state.sitemap.shard(number).await? {
        Lookup::Found(urls) => Ok(urlset(&urls)),
        Lookup::NotFound => Err(ApiError::not_found("Sitemap bulunamadı")),
    }
}

pub async fn robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=UTF-8")],
        sitemap_xml::robots_txt(state.sitemap.base_url()),
    )
}
