use async_trait::async_trait;
use postakod_core::{DirectoryStats, DistrictRef, LocationRecord, NeighborhoodPath, PostalCode, ProvinceSummary};

use crate::error::StorageError;
use crate::types::{CandidateFilter, RewriteOutcome, SlugGroup, SlugRewrite};

/// Read access to location records plus the two write paths the core needs.
///
/// Record-returning methods yield rows in store insertion order. An unknown
/// slug or postal code yields an empty vector.
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn records_in_province(&self, province_slug: &str) -> Result<Vec<LocationRecord>, StorageError>;

    async fn records_in_district(
        &self,
        province_slug: &str,
        district_slug: &str,
    ) -> Result<Vec<LocationRecord>, StorageError>;

    async fn records_for_neighborhood(
        &self,
        province_slug: &str,
        district_slug: &str,
        neighborhood_slug: &str,
    ) -> Result<Vec<LocationRecord>, StorageError>;

    async fn records_for_postal_code(&self, code: &PostalCode) -> Result<Vec<LocationRecord>, StorageError>;

    /// Records whose neighborhood display name equals `neighborhood` exactly.
    async fn records_named(&self, neighborhood: &str) -> Result<Vec<LocationRecord>, StorageError>;

    /// Superset of the records a search could match.
    async fn search_candidates(&self, filter: CandidateFilter<'_>) -> Result<Vec<LocationRecord>, StorageError>;

    /// One summary per province, unsorted.
    async fn province_summaries(&self) -> Result<Vec<ProvinceSummary>, StorageError>;

    /// Distinct neighborhood paths in slug byte order.
    async fn neighborhood_paths(&self) -> Result<Vec<NeighborhoodPath>, StorageError>;

    /// Distinct district paths in slug byte order.
    async fn district_paths(&self) -> Result<Vec<DistrictRef>, StorageError>;

    /// Distinct postal codes, ascending.
    async fn distinct_postal_codes(&self) -> Result<Vec<PostalCode>, StorageError>;

    async fn stats(&self) -> Result<DirectoryStats, StorageError>;

    /// Insert records, silently skipping duplicates. Returns rows inserted.
    async fn insert_batch(&self, records: &[LocationRecord]) -> Result<u64, StorageError>;

    /// Rows grouped by display triple and stored slugs.
    async fn slug_groups(&self) -> Result<Vec<SlugGroup>, StorageError>;

    /// Apply all rewrites atomically.
    async fn rewrite_slugs(&self, rewrites: &[SlugRewrite]) -> Result<RewriteOutcome, StorageError>;
}
