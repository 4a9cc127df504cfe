//! Environment-driven configuration with warn-level logging for invalid values.

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_SEARCH_LIMIT, DEFAULT_SHARD_COUNT, MAX_QUERY_LIMIT};

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        Err(_) => default,
    }
}

/// Runtime settings shared by the HTTP server and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// PostgreSQL connection string (`DATABASE_URL`).
    pub database_url: Option<String>,
    /// Public origin used to build absolute sitemap URLs, without trailing slash.
    pub base_url: String,
    /// Configured number of neighborhood sitemap shards.
    pub shard_count: usize,
    /// Result cap applied when a search request omits `limit`.
    pub search_limit: usize,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            shard_count: DEFAULT_SHARD_COUNT,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl DirectoryConfig {
    /// Read `DATABASE_URL`, `POSTAKOD_BASE_URL`, `POSTAKOD_SITEMAP_SHARDS`
    /// and `POSTAKOD_SEARCH_LIMIT`.
    #[must_use]
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());
        let base_url = std::env::var("POSTAKOD_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        let mut shard_count = env_parse_with_default("POSTAKOD_SITEMAP_SHARDS", DEFAULT_SHARD_COUNT);
        if shard_count == 0 {
            tracing::warn!(default = DEFAULT_SHARD_COUNT, "POSTAKOD_SITEMAP_SHARDS is zero, using default");
            shard_count = DEFAULT_SHARD_COUNT;
        }
        let search_limit = env_parse_with_default("POSTAKOD_SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_QUERY_LIMIT);

        Self {
            database_url,
            base_url: base_url.trim().trim_end_matches('/').to_owned(),
            shard_count,
            search_limit,
        }
    }
}
