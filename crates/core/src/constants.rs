//! Shared constants for postakod.
//!
//! Centralizes limits used by the search, sitemap and storage layers.

/// Maximum number of results for any query (DoS protection).
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Default number of search results when the caller does not pass a limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

/// Default number of entries returned by the popular-searches listing.
pub const DEFAULT_POPULAR_SEARCH_LIMIT: usize = 10;

/// Default number of neighborhood sitemap shards.
pub const DEFAULT_SHARD_COUNT: usize = 50;

/// Per-file URL cap imposed by the sitemap protocol.
pub const SITEMAP_MAX_URLS_PER_FILE: usize = 50_000;

/// Length of a Turkish postal code.
pub const POSTAL_CODE_LEN: usize = 5;

/// Leading digits of a postal code that identify the province.
pub const PROVINCE_PREFIX_LEN: usize = 2;

/// Rows per INSERT statement on the batch-insert path.
pub const INSERT_BATCH_SIZE: usize = 1000;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Public origin used when `POSTAKOD_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://postakodrehberi.com";
