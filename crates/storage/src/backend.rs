//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use postakod_core::{
    DirectoryStats, DistrictRef, LocationRecord, NeighborhoodPath, PostalCode, ProvinceSummary, SearchTerm,
};

use crate::error::StorageError;
use crate::memory::MemoryStore;
use crate::traits::{LocationStore, SearchLogStore};
use crate::types::{CandidateFilter, RewriteOutcome, SlugGroup, SlugRewrite};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Memory(s) => <MemoryStore as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStore as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Memory(MemoryStore),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStore),
}

impl StorageBackend {
    #[must_use]
    pub fn new_memory(records: impl IntoIterator<Item = LocationRecord>) -> Self {
        Self::Memory(MemoryStore::from_records(records))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStore::new(database_url).await?))
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── LocationStore ────────────────────────────────────────────────

#[async_trait]
impl LocationStore for StorageBackend {
    async fn records_in_province(&self, province_slug: &str) -> Result<Vec<LocationRecord>, StorageError> {
        dispatch!(self, LocationStore, records_in_province(province_slug))
    }

    async fn records_in_district(
        &self,
        province_slug: &str,
        district_slug: &str,
    ) -> Result<Vec<LocationRecord>, StorageError> {
        dispatch!(self, LocationStore, records_in_district(province_slug, district_slug))
    }

    async fn records_for_neighborhood(
        &self,
        province_slug: &str,
        district_slug: &str,
        neighborhood_slug: &str,
    ) -> Result<Vec<LocationRecord>, StorageError> {
        dispatch!(self, LocationStore, records_for_neighborhood(province_slug, district_slug, neighborhood_slug))
    }

    async fn records_for_postal_code(&self, code: &PostalCode) -> Result<Vec<LocationRecord>, StorageError> {
        dispatch!(self, LocationStore, records_for_postal_code(code))
    }

    async fn records_named(&self, neighborhood: &str) -> Result<Vec<LocationRecord>, StorageError> {
        dispatch!(self, LocationStore, records_named(neighborhood))
    }

    async fn search_candidates(&self, filter: CandidateFilter<'_>) -> Result<Vec<LocationRecord>, StorageError> {
        dispatch!(self, LocationStore, search_candidates(filter))
    }

    async fn province_summaries(&self) -> Result<Vec<ProvinceSummary>, StorageError> {
        dispatch!(self, LocationStore, province_summaries())
    }

    async fn neighborhood_paths(&self) -> Result<Vec<NeighborhoodPath>, StorageError> {
        dispatch!(self, LocationStore, neighborhood_paths())
    }

    async fn district_paths(&self) -> Result<Vec<DistrictRef>, StorageError> {
        dispatch!(self, LocationStore, district_paths())
    }

    async fn distinct_postal_codes(&self) -> Result<Vec<PostalCode>, StorageError> {
        dispatch!(self, LocationStore, distinct_postal_codes())
    }

    async fn stats(&self) -> Result<DirectoryStats, StorageError> {
        dispatch!(self, LocationStore, stats())
    }

    async fn insert_batch(&self, records: &[LocationRecord]) -> Result<u64, StorageError> {
        dispatch!(self, LocationStore, insert_batch(records))
    }

    async fn slug_groups(&self) -> Result<Vec<SlugGroup>, StorageError> {
        dispatch!(self, LocationStore, slug_groups())
    }

    async fn rewrite_slugs(&self, rewrites: &[SlugRewrite]) -> Result<RewriteOutcome, StorageError> {
        dispatch!(self, LocationStore, rewrite_slugs(rewrites))
    }
}

// ── SearchLogStore ───────────────────────────────────────────────

#[async_trait]
impl SearchLogStore for StorageBackend {
    async fn log_search(&self, query: &str, result_count: usize) -> Result<(), StorageError> {
        dispatch!(self, SearchLogStore, log_search(query, result_count))
    }

    async fn popular_searches(&self, limit: usize) -> Result<Vec<SearchTerm>, StorageError> {
        dispatch!(self, SearchLogStore, popular_searches(limit))
    }
}
