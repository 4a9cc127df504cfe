use postakod_core::{PostalCode, fold_for_search};

use super::{create_test_store, record, sample_records};
use crate::traits::LocationStore;
use crate::types::CandidateFilter;
use crate::MemoryStore;

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn from_records_drops_duplicate_keys() {
    let mut records = sample_records();
    records.push(record("İstanbul", "Kadıköy", "Acıbadem", "34710"));
    let store = MemoryStore::from_records(records);

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.record_count, 5);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn insert_batch_reports_only_new_rows() {
    let store = create_test_store();

    let inserted = store
        .insert_batch(&[
            record("İstanbul", "Kadıköy", "Moda", "34710"),
            record("İzmir", "Konak", "Alsancak", "35220"),
            record("İzmir", "Konak", "Alsancak", "35220"),
        ])
        .await
        .unwrap();

    assert_eq!(inserted, 1);
    assert_eq!(store.stats().await.unwrap().record_count, 6);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn scoped_reads_keep_insertion_order() {
    let store = create_test_store();

    let district = store.records_in_district("istanbul", "kadikoy").await.unwrap();
    let codes: Vec<&str> = district.iter().map(|r| r.postal_code.as_str()).collect();
    assert_eq!(codes, vec!["34710", "34718", "34710"]);

    let neighborhood = store.records_for_neighborhood("istanbul", "kadikoy", "acibadem").await.unwrap();
    assert_eq!(neighborhood.len(), 2);

    assert_eq!(store.records_in_province("istanbul").await.unwrap().len(), 4);
    assert!(store.records_in_province("izmir").await.unwrap().is_empty());
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn postal_code_and_name_lookups() {
    let store = create_test_store();

    let code = PostalCode::parse("34710").unwrap();
    assert_eq!(store.records_for_postal_code(&code).await.unwrap().len(), 2);

    let named = store.records_named("Acıbadem").await.unwrap();
    assert_eq!(named.len(), 3);
    assert!(store.records_named("acibadem").await.unwrap().is_empty());
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn postal_prefix_candidates_are_anchored() {
    let store = create_test_store();

    let hits = store.search_candidates(CandidateFilter::PostalPrefix("347")).await.unwrap();
    assert_eq!(hits.len(), 3);
    assert!(store.search_candidates(CandidateFilter::PostalPrefix("710")).await.unwrap().is_empty());

    let pattern = fold_for_search("moda");
    let all = store.search_candidates(CandidateFilter::Text(&pattern)).await.unwrap();
    assert_eq!(all.len(), 5);
}

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn aggregates_match_records() {
    let store = create_test_store();

    let stats = store.stats().await.unwrap();
    assert_eq!(stats.province_count, 2);
    assert_eq!(stats.district_count, 3);
    assert_eq!(stats.neighborhood_count, 4);
    assert_eq!(stats.postal_code_count, 4);

    let paths = store.neighborhood_paths().await.unwrap();
    let urls: Vec<String> = paths.iter().map(|p| p.url_path()).collect();
    assert_eq!(
        urls,
        vec![
            "ankara/cankaya/kizilay",
            "istanbul/kadikoy/acibadem",
            "istanbul/kadikoy/moda",
            "istanbul/uskudar/acibadem",
        ]
    );

    let codes = store.distinct_postal_codes().await.unwrap();
    assert_eq!(codes.first().map(PostalCode::as_str), Some("06420"));
    assert_eq!(store.district_paths().await.unwrap().len(), 3);
    assert_eq!(store.province_summaries().await.unwrap().len(), 2);
}
