use async_trait::async_trait;
use postakod_core::SearchTerm;

use crate::error::StorageError;

/// Append-only log of executed searches.
#[async_trait]
pub trait SearchLogStore: Send + Sync {
    /// Record the raw query and how many results it produced.
    async fn log_search(&self, query: &str, result_count: usize) -> Result<(), StorageError>;

    /// Most frequent queries, highest count first, ties by query text.
    async fn popular_searches(&self, limit: usize) -> Result<Vec<SearchTerm>, StorageError>;
}
