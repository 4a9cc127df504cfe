//! Diacritic-insensitive search over location records
//!
//! The store narrows the candidate set; [`matcher`] decides what matches and
//! in which order results come back.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

pub mod matcher;

use std::sync::Arc;

use postakod_core::LocationRecord;
use postakod_storage::{CandidateFilter, LocationStore, StorageBackend, StorageError};

pub use matcher::SearchQuery;

/// Search facade over a [`StorageBackend`].
///
/// Side-effect free: logging a search is the caller's concern.
#[derive(Debug, Clone)]
pub struct LocationSearch {
    storage: Arc<StorageBackend>,
}

impl LocationSearch {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Records matching `query`, ordered by province, district and
    /// neighborhood, at most `min(limit, MAX_QUERY_LIMIT)` of them.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<LocationRecord>, StorageError> {
        let parsed = SearchQuery::parse(query);
        let candidates = match &parsed {
            SearchQuery::Empty => return Ok(Vec::new()),
            SearchQuery::PostalPrefix(prefix) => {
                self.storage.search_candidates(CandidateFilter::PostalPrefix(prefix)).await?
            },
            SearchQuery::Text { pattern, .. } => self.storage.search_candidates(CandidateFilter::Text(pattern)).await?,
        };
        let candidate_count = candidates.len();
        let hits = matcher::select(&parsed, candidates, limit);
        tracing::debug!(query, candidate_count, hits = hits.len(), "search completed");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests;
