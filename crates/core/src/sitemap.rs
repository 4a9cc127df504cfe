//! Bounded-size sitemap partitioning.

use crate::constants::SITEMAP_MAX_URLS_PER_FILE;
use crate::error::{DirectoryError, Result};

/// Split `items` into exactly `shard_count` contiguous shards.
///
/// Each shard holds at most `ceil(items.len() / shard_count)` items and the
/// shards concatenated in index order reproduce `items`. Trailing shards may
/// be empty; empty input yields `shard_count` empty shards.
pub fn partition<T: Clone>(items: &[T], shard_count: usize) -> Result<Vec<Vec<T>>> {
    if shard_count == 0 {
        return Err(DirectoryError::InvalidInput("shard count must be at least 1".to_owned()));
    }
    let per_shard = items.len().div_ceil(shard_count).max(1);
    let mut shards: Vec<Vec<T>> = items.chunks(per_shard).map(<[T]>::to_vec).collect();
    shards.resize_with(shard_count, Vec::new);
    Ok(shards)
}

/// Shard count actually used for `total` items.
///
/// The configured count is raised when a shard would otherwise exceed the
/// per-file URL limit of the sitemap protocol.
#[must_use]
pub fn effective_shard_count(total: usize, configured: usize) -> usize {
    configured.max(total.div_ceil(SITEMAP_MAX_URLS_PER_FILE)).max(1)
}
