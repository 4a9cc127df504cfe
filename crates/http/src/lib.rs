//! HTTP API and sitemap server for postakod.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(clippy::arithmetic_side_effects, reason = "Arithmetic is safe in context")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::shadow_reuse, reason = "Shadowing for Arc clones is idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;
mod sitemap_xml;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use postakod_core::DirectoryConfig;
use postakod_service::{DirectoryService, RelatedService, SearchService, ServiceError, SitemapService};
use postakod_storage::StorageBackend;
use tower_http::cors::CorsLayer;

pub use response_types::{NeighborhoodResponse, VersionResponse};

/// Shared application state for all HTTP handlers.
///
/// Every service wraps the same storage backend.
pub struct AppState {
    pub directory: DirectoryService,
    pub related: RelatedService,
    pub search: SearchService,
    pub sitemap: SitemapService,
    /// Result limit when `/api/search` is called without `limit`.
    pub search_limit: usize,
}

impl AppState {
    pub fn new(storage: Arc<StorageBackend>, config: &DirectoryConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            directory: DirectoryService::new(Arc::clone(&storage)),
            related: RelatedService::new(Arc::clone(&storage)),
            search: SearchService::new(Arc::clone(&storage)),
            sitemap: SitemapService::new(storage, &config.base_url, config.shard_count)?,
            search_limit: config.search_limit,
        })
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/stats", get(handlers::directory::stats))
        .route("/api/cities", get(handlers::directory::cities))
        .route("/api/il/{il}", get(handlers::directory::province))
        .route("/api/ilce/{il}/{ilce}", get(handlers::directory::district))
        .route("/api/mahalle/{il}/{ilce}/{mahalle}", get(handlers::directory::neighborhood))
        .route("/api/kod/{pk}", get(handlers::directory::postal_code))
        .route("/api/search", get(handlers::search::search))
        .route("/api/popular-searches", get(handlers::search::popular_searches))
        .route("/api/neighboring-districts/{il}/{ilce}", get(handlers::related::neighboring_districts))
        .route("/api/similar-mahalleler/{il}/{ilce}/{mahalle}", get(handlers::related::similar_neighborhoods))
        .route("/sitemap.xml", get(handlers::sitemap::index))
        .route("/sitemaps/static.xml", get(handlers::sitemap::static_pages))
        .route("/sitemaps/cities.xml", get(handlers::sitemap::cities))
        .route("/sitemaps/districts.xml", get(handlers::sitemap::districts))
        .route("/sitemaps/postal-codes.xml", get(handlers::sitemap::postal_codes))
        .route("/sitemaps/neighborhoods/{part}", get(handlers::sitemap::neighborhoods))
        .route("/robots.txt", get(handlers::sitemap::robots))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}

#[cfg(test)]
mod tests;
