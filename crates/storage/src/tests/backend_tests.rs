use super::sample_records;
use crate::traits::{LocationStore, SearchLogStore};
use crate::StorageBackend;

#[tokio::test]
#[expect(clippy::unwrap_used, reason = "test code")]
async fn memory_backend_dispatches() {
    let backend = StorageBackend::new_memory(sample_records());
    assert_eq!(backend.kind(), "memory");

    assert_eq!(backend.stats().await.unwrap().record_count, 5);
    assert_eq!(backend.records_in_district("ankara", "cankaya").await.unwrap().len(), 1);

    backend.log_search("kızılay", 1).await.unwrap();
    assert_eq!(backend.popular_searches(5).await.unwrap().len(), 1);
}
