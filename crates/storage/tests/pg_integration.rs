//! Integration tests for PgStore.
//! Run with: DATABASE_URL=... cargo test -p postakod-storage --features postgres -- --ignored pg_

#![cfg(feature = "postgres")]
#![allow(clippy::unwrap_used, reason = "integration test code")]

use std::sync::atomic::{AtomicU32, Ordering};

use postakod_core::{LocationRecord, PostalCode, SlugTriple, fold_for_search};
use postakod_storage::{CandidateFilter, LocationStore, PgStore, SearchLogStore, SlugRewrite};

async fn create_pg_store() -> PgStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for PgStore integration tests");
    PgStore::new(&url).await.expect("Failed to connect to PostgreSQL")
}

/// Province name unique to this test run so tests do not see each other's rows.
fn unique_province(tag: &str) -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("Test {tag} {} {n}", std::process::id())
}

fn record(province: &str, district: &str, neighborhood: &str, code: &str) -> LocationRecord {
    LocationRecord::new(province, district, None, neighborhood, code).unwrap()
}

#[tokio::test]
#[ignore]
async fn pg_insert_batch_skips_duplicates() {
    let store = create_pg_store().await;
    let province = unique_province("insert");
    let rows = vec![
        record(&province, "Kadıköy", "Acıbadem", "34710"),
        record(&province, "Kadıköy", "Acıbadem", "34718"),
        record(&province, "Kadıköy", "Acıbadem", "34710"),
    ];

    let inserted = store.insert_batch(&rows).await.unwrap();
    assert_eq!(inserted, 2);

    let slug = rows[0].province_slug.clone();
    let fetched = store.records_for_neighborhood(&slug, "kadikoy", "acibadem").await.unwrap();
    let codes: Vec<&str> = fetched.iter().map(|r| r.postal_code.as_str()).collect();
    assert_eq!(codes, vec!["34710", "34718"]);
}

#[tokio::test]
#[ignore]
async fn pg_text_candidates_fold_turkish_letters() {
    let store = create_pg_store().await;
    let province = unique_province("fold");
    let rows = vec![record(&province, "Kadıköy", "Moda", "34710")];
    store.insert_batch(&rows).await.unwrap();

    for query in ["kadikoy", "KADIKÖY", "kadıköy"] {
        let pattern = fold_for_search(query);
        let hits = store.search_candidates(CandidateFilter::Text(&pattern)).await.unwrap();
        assert!(
            hits.iter().any(|r| r.province_slug == rows[0].province_slug),
            "query {query} missed the row"
        );
    }

    let prefix = store.search_candidates(CandidateFilter::PostalPrefix("347")).await.unwrap();
    assert!(prefix.iter().all(|r| r.postal_code.as_str().starts_with("347")));
}

#[tokio::test]
#[ignore]
async fn pg_rewrite_slugs_repairs_drift() {
    let store = create_pg_store().await;
    let province = unique_province("drift");
    let mut drifted = record(&province, "Kadıköy", "Acıbadem", "34718");
    drifted.neighborhood_slug = "acbadem".to_owned();
    let correct = record(&province, "Kadıköy", "Acıbadem", "34710");
    store.insert_batch(&[correct.clone(), drifted]).await.unwrap();

    let outcome = store
        .rewrite_slugs(&[SlugRewrite {
            province: province.clone(),
            district: "Kadıköy".to_owned(),
            neighborhood: "Acıbadem".to_owned(),
            slugs: SlugTriple {
                province_slug: correct.province_slug.clone(),
                district_slug: "kadikoy".to_owned(),
                neighborhood_slug: "acibadem".to_owned(),
            },
        }])
        .await
        .unwrap();
    assert_eq!(outcome.rows_updated, 1);

    let fixed = store.records_for_neighborhood(&correct.province_slug, "kadikoy", "acibadem").await.unwrap();
    assert_eq!(fixed.len(), 2);
}

#[tokio::test]
#[ignore]
async fn pg_postal_code_lookup_and_stats() {
    let store = create_pg_store().await;
    let province = unique_province("lookup");
    store.insert_batch(&[record(&province, "Çankaya", "Kızılay", "06420")]).await.unwrap();

    let code = PostalCode::parse("06420").unwrap();
    let hits = store.records_for_postal_code(&code).await.unwrap();
    assert!(hits.iter().any(|r| r.province == province));

    let stats = store.stats().await.unwrap();
    assert!(stats.record_count >= 1);
    assert!(stats.postal_code_count >= 1);
}

#[tokio::test]
#[ignore]
async fn pg_search_log_round_trip() {
    let store = create_pg_store().await;
    let query = unique_province("query");
    store.log_search(&query, 3).await.unwrap();
    store.log_search(&query, 3).await.unwrap();

    let popular = store.popular_searches(1_000).await.unwrap();
    let term = popular.iter().find(|t| t.query == query).unwrap();
    assert_eq!(term.count, 2);
}
