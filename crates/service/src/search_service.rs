use std::sync::Arc;

use postakod_core::constants::MAX_QUERY_LIMIT;
use postakod_core::{LocationRecord, SearchTerm};
use postakod_search::LocationSearch;
use postakod_storage::{SearchLogStore, StorageBackend};

use crate::ServiceError;

/// Search plus the search log.
#[derive(Clone)]
pub struct SearchService {
    storage: Arc<StorageBackend>,
    search: LocationSearch,
}

impl SearchService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        let search = LocationSearch::new(Arc::clone(&storage));
        Self { storage, search }
    }

    /// Run a search without recording it.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<LocationRecord>, ServiceError> {
        Ok(self.search.search(query, limit).await?)
    }

    /// Run a search and record `(trimmed query, result count)`.
    ///
    /// Blank queries are neither run nor logged. A failure to write the log
    /// is reported at warn level and does not fail the search.
    pub async fn search_and_log(&self, query: &str, limit: usize) -> Result<Vec<LocationRecord>, ServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let results = self.search.search(query, limit).await?;
        if let Err(e) = self.storage.log_search(query, results.len()).await {
            tracing::warn!(query, error = %e, "failed to record search");
        }
        Ok(results)
    }

    pub async fn popular_searches(&self, limit: usize) -> Result<Vec<SearchTerm>, ServiceError> {
        Ok(self.storage.popular_searches(limit.min(MAX_QUERY_LIMIT)).await?)
    }
}
