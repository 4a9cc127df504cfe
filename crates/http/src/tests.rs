use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use postakod_core::{DirectoryConfig, LocationRecord};
use postakod_storage::StorageBackend;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};

#[expect(clippy::unwrap_used, reason = "test code")]
fn record(province: &str, district: &str, neighborhood: &str, code: &str) -> LocationRecord {
    LocationRecord::new(province, district, None, neighborhood, code).unwrap()
}

#[expect(clippy::unwrap_used, reason = "test code")]
fn app() -> Router {
    let storage = Arc::new(StorageBackend::new_memory(vec![
        record("İstanbul", "Kadıköy", "Acıbadem", "34710"),
        record("İstanbul", "Kadıköy", "Acıbadem", "34718"),
        record("İstanbul", "Kadıköy", "Moda", "34710"),
        record("İstanbul", "Üsküdar", "Acıbadem", "34660"),
        record("Ankara", "Çankaya", "Kızılay", "06420"),
    ]));
    let config = DirectoryConfig {
        base_url: "https://example.test".to_owned(),
        shard_count: 2,
        ..DirectoryConfig::default()
    };
    create_router(Arc::new(AppState::new(storage, &config).unwrap()))
}

#[expect(clippy::unwrap_used, reason = "test code")]
async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app.clone().oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[expect(clippy::unwrap_used, reason = "test code")]
async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn neighborhood_page_includes_codes_and_siblings() {
    let app = app();
    let (status, body) = get_json(&app, "/api/mahalle/istanbul/kadikoy/acibadem").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["neighborhood"], "Acıbadem");
    assert_eq!(body["postalCodes"], serde_json::json!(["34710", "34718"]));
    assert_eq!(body["relatedNeighborhoods"][0]["neighborhoodSlug"], "moda");
}

#[tokio::test]
async fn unknown_paths_return_404_json() {
    let app = app();
    for uri in ["/api/il/atlantis", "/api/ilce/istanbul/yok", "/api/mahalle/istanbul/kadikoy/yok", "/api/kod/99999"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn malformed_postal_code_is_400() {
    let (status, body) = get_json(&app(), "/api/kod/34a10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn postal_code_lookup_lists_locations() {
    let (status, body) = get_json(&app(), "/api/kod/34710").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["postalCode"], "34710");
    assert_eq!(body["locations"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn province_and_district_listings() {
    let app = app();
    let (status, body) = get_json(&app, "/api/il/istanbul").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["province"], "İstanbul");
    assert_eq!(body["districts"].as_array().map(Vec::len), Some(2));

    let (status, body) = get_json(&app, "/api/ilce/istanbul/kadikoy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["neighborhoods"].as_array().map(Vec::len), Some(2));

    let (_, body) = get_json(&app, "/api/cities").await;
    assert_eq!(body[0]["provinceSlug"], "ankara");
}

#[tokio::test]
async fn search_is_logged_and_ranked() {
    let app = app();
    let (status, body) = get_json(&app, "/api/search?q=KADIK%C3%96Y").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(3));

    let (_, body) = get_json(&app, "/api/search?q=%20%20").await;
    assert_eq!(body, serde_json::json!([]));

    let (_, popular) = get_json(&app, "/api/popular-searches").await;
    assert_eq!(popular.as_array().map(Vec::len), Some(1));
    assert_eq!(popular[0]["query"], "KADIKÖY");
    assert_eq!(popular[0]["count"], 1);
}

#[tokio::test]
async fn search_limit_applies() {
    let (_, body) = get_json(&app(), "/api/search?q=34&limit=1").await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn related_endpoints() {
    let app = app();
    let (_, body) = get_json(&app, "/api/neighboring-districts/istanbul/kadikoy").await;
    assert_eq!(body[0]["districtSlug"], "uskudar");

    let (_, body) = get_json(&app, "/api/similar-mahalleler/istanbul/kadikoy/acibadem").await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["district"], "Üsküdar");
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn sitemap_index_is_xml() {
    let response = app()
        .oneshot(Request::builder().uri("/sitemap.xml").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml; charset=UTF-8");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("<loc>https://example.test/sitemaps/neighborhoods/2.xml</loc>"));
    assert!(!body.contains("neighborhoods/3.xml"));
}

#[tokio::test]
async fn neighborhood_shards_are_bounded() {
    let app = app();
    let (status, body) = get(&app, "/sitemaps/neighborhoods/1.xml").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<url>").count(), 2);

    for uri in ["/sitemaps/neighborhoods/0.xml", "/sitemaps/neighborhoods/3.xml", "/sitemaps/neighborhoods/abc"] {
        assert_eq!(get(&app, uri).await.0, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn static_sitemap_and_robots() {
    let app = app();
    let (status, body) = get(&app, "/sitemaps/static.xml").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<loc>https://example.test/</loc>"));
    assert!(body.contains("<loc>https://example.test/hakkimizda</loc>"));

    let (_, body) = get(&app, "/sitemaps/postal-codes.xml").await;
    assert!(body.contains("<loc>https://example.test/kod/06420</loc>"));

    let (status, robots) = get(&app, "/robots.txt").await;
    assert_eq!(status, StatusCode::OK);
    assert!(robots.contains("Sitemap: https://example.test/sitemap.xml"));
}
