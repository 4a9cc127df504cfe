//! Request/query types (Deserialize)

use postakod_core::constants::{DEFAULT_POPULAR_SEARCH_LIMIT, MAX_QUERY_LIMIT};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

impl SearchQuery {
    /// Requested limit, or `default`, capped to [`MAX_QUERY_LIMIT`].
    pub fn capped_limit(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).min(MAX_QUERY_LIMIT)
    }
}

const fn default_popular_limit() -> usize {
    DEFAULT_POPULAR_SEARCH_LIMIT
}

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    #[serde(default = "default_popular_limit")]
    pub limit: usize,
}

impl PopularQuery {
    pub fn capped_limit(&self) -> usize {
        self.limit.min(MAX_QUERY_LIMIT)
    }
}
