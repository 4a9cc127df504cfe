use std::sync::Arc;

use postakod_core::LocationRecord;
use postakod_storage::StorageBackend;

use crate::LocationSearch;

fn record(p: &str, d: &str, n: &str, code: &str) -> LocationRecord {
    LocationRecord::new(p, d, None, n, code).unwrap()
}

fn search_over(records: Vec<LocationRecord>) -> LocationSearch {
    LocationSearch::new(Arc::new(StorageBackend::new_memory(records)))
}

fn directory() -> LocationSearch {
    search_over(vec![
        record("İstanbul", "Kadıköy", "Acıbadem", "34710"),
        record("İstanbul", "Kadıköy", "Acıbadem", "34718"),
        record("İstanbul", "Üsküdar", "Acıbadem", "34660"),
        record("İstanbul", "Kadıköy", "Moda", "34710"),
        record("Ankara", "Çankaya", "Kızılay", "06420"),
        record("İzmir", "Karşıyaka", "Bostanlı", "35590"),
    ])
}

#[tokio::test]
async fn finds_kadikoy_regardless_of_diacritics_and_case() {
    let search = directory();
    for query in ["kadikoy", "KADIKÖY", "kadıköy", "Kadıköy"] {
        let hits = search.search(query, 100).await.unwrap();
        assert_eq!(hits.len(), 3, "query {query}");
        assert!(hits.iter().all(|r| r.district == "Kadıköy"));
    }
}

#[tokio::test]
async fn numeric_query_matches_postal_prefix_only() {
    let search = directory();

    let hits = search.search("347", 100).await.unwrap();
    assert_eq!(hits.len(), 3);
    assert!(hits.iter().all(|r| r.postal_code.as_str().starts_with("347")));

    assert!(search.search("710", 100).await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_query_returns_nothing() {
    let search = directory();
    assert!(search.search("", 100).await.unwrap().is_empty());
    assert!(search.search("   \t", 100).await.unwrap().is_empty());
}

#[tokio::test]
async fn metacharacters_match_literally() {
    let search = search_over(vec![
        record("İstanbul", "Kadıköy", "Acıbadem", "34710"),
        record("İstanbul", "Kadıköy", "Caferağa (Moda)", "34710"),
    ]);

    assert!(search.search(".*", 100).await.unwrap().is_empty());
    assert!(search.search("[a-z]", 100).await.unwrap().is_empty());
    let hits = search.search("(moda)", 100).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].neighborhood, "Caferağa (Moda)");
}

#[tokio::test]
async fn results_follow_turkish_collation_and_limit() {
    let search = directory();

    let hits = search.search("a", 100).await.unwrap();
    let order: Vec<(&str, &str, &str)> =
        hits.iter().map(|r| (r.province.as_str(), r.district.as_str(), r.neighborhood.as_str())).collect();
    assert_eq!(
        order,
        vec![
            ("Ankara", "Çankaya", "Kızılay"),
            ("İstanbul", "Kadıköy", "Acıbadem"),
            ("İstanbul", "Kadıköy", "Acıbadem"),
            ("İstanbul", "Kadıköy", "Moda"),
            ("İstanbul", "Üsküdar", "Acıbadem"),
            ("İzmir", "Karşıyaka", "Bostanlı"),
        ]
    );

    let limited = search.search("a", 2).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[1].postal_code.as_str(), "34710");
}

#[tokio::test]
async fn equal_names_keep_store_order() {
    let search = directory();
    let hits = search.search("acıbadem", 100).await.unwrap();
    let codes: Vec<&str> = hits.iter().map(|r| r.postal_code.as_str()).collect();
    assert_eq!(codes, vec!["34710", "34718", "34660"]);
}
