//! In-memory backend.
//!
//! Holds the full record list behind a `tokio::sync::RwLock`. Used by tests,
//! by the CLI when no database is configured, and as the reference behavior
//! the PostgreSQL backend must agree with.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use postakod_core::hierarchy;
use postakod_core::{
    DirectoryStats, DistrictRef, LocationRecord, NeighborhoodPath, PostalCode, ProvinceSummary, SearchTerm,
    SlugTriple,
};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::{LocationStore, SearchLogStore};
use crate::types::{CandidateFilter, RewriteOutcome, SlugGroup, SlugRewrite};

type RecordKey = (NeighborhoodPath, PostalCode);

fn key_of(record: &LocationRecord) -> RecordKey {
    (record.path(), record.postal_code.clone())
}

#[derive(Debug, Default)]
struct Records {
    rows: Vec<LocationRecord>,
    keys: HashSet<RecordKey>,
}

impl Records {
    fn insert(&mut self, record: &LocationRecord) -> bool {
        if self.keys.insert(key_of(record)) {
            self.rows.push(record.clone());
            true
        } else {
            false
        }
    }

    fn filtered(&self, pred: impl Fn(&LocationRecord) -> bool) -> Vec<LocationRecord> {
        self.rows.iter().filter(|r| pred(r)).cloned().collect()
    }
}

#[allow(dead_code, reason = "mirrors the search_logs columns; only query is aggregated")]
#[derive(Debug, Clone)]
struct LoggedSearch {
    query: String,
    result_count: usize,
    created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Records>>,
    searches: Arc<RwLock<Vec<LoggedSearch>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `records`; duplicates after the first are dropped.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = LocationRecord>) -> Self {
        let mut inner = Records::default();
        for record in records {
            inner.insert(&record);
        }
        Self { records: Arc::new(RwLock::new(inner)), searches: Arc::default() }
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn records_in_province(&self, province_slug: &str) -> Result<Vec<LocationRecord>, StorageError> {
        Ok(self.records.read().await.filtered(|r| r.province_slug == province_slug))
    }

    async fn records_in_district(
        &self,
        province_slug: &str,
        district_slug: &str,
    ) -> Result<Vec<LocationRecord>, StorageError> {
        Ok(self
            .records
            .read()
            .await
            .filtered(|r| r.province_slug == province_slug && r.district_slug == district_slug))
    }

    async fn records_for_neighborhood(
        &self,
        province_slug: &str,
        district_slug: &str,
        neighborhood_slug: &str,
    ) -> Result<Vec<LocationRecord>, StorageError> {
        Ok(self.records.read().await.filtered(|r| {
            r.province_slug == province_slug
                && r.district_slug == district_slug
                && r.neighborhood_slug == neighborhood_slug
        }))
    }

    async fn records_for_postal_code(&self, code: &PostalCode) -> Result<Vec<LocationRecord>, StorageError> {
        Ok(self.records.read().await.filtered(|r| r.postal_code == *code))
    }

    async fn records_named(&self, neighborhood: &str) -> Result<Vec<LocationRecord>, StorageError> {
        Ok(self.records.read().await.filtered(|r| r.neighborhood == neighborhood))
    }

    async fn search_candidates(&self, filter: CandidateFilter<'_>) -> Result<Vec<LocationRecord>, StorageError> {
        let records = self.records.read().await;
        Ok(match filter {
            CandidateFilter::PostalPrefix(prefix) => {
                records.filtered(|r| r.postal_code.as_str().starts_with(prefix))
            },
            // No index to consult: every row is a candidate.
            CandidateFilter::Text(_) => records.rows.clone(),
        })
    }

    async fn province_summaries(&self) -> Result<Vec<ProvinceSummary>, StorageError> {
        Ok(hierarchy::summarize_provinces(&self.records.read().await.rows))
    }

    async fn neighborhood_paths(&self) -> Result<Vec<NeighborhoodPath>, StorageError> {
        Ok(hierarchy::neighborhood_paths(&self.records.read().await.rows))
    }

    async fn district_paths(&self) -> Result<Vec<DistrictRef>, StorageError> {
        Ok(hierarchy::district_paths(&self.records.read().await.rows))
    }

    async fn distinct_postal_codes(&self) -> Result<Vec<PostalCode>, StorageError> {
        Ok(hierarchy::distinct_postal_codes(&self.records.read().await.rows))
    }

    async fn stats(&self) -> Result<DirectoryStats, StorageError> {
        Ok(hierarchy::compute_stats(&self.records.read().await.rows))
    }

    async fn insert_batch(&self, records: &[LocationRecord]) -> Result<u64, StorageError> {
        let mut inner = self.records.write().await;
        let inserted = records.iter().filter(|r| inner.insert(r)).count();
        Ok(u64::try_from(inserted).unwrap_or(u64::MAX))
    }

    async fn slug_groups(&self) -> Result<Vec<SlugGroup>, StorageError> {
        let inner = self.records.read().await;
        let mut groups: BTreeMap<(String, String, String, SlugTriple), SlugGroup> = BTreeMap::new();
        for record in &inner.rows {
            let stored = record.slugs();
            let key = (record.province.clone(), record.district.clone(), record.neighborhood.clone(), stored.clone());
            let group = groups.entry(key).or_insert_with(|| SlugGroup {
                province: record.province.clone(),
                district: record.district.clone(),
                neighborhood: record.neighborhood.clone(),
                stored,
                postal_codes: Vec::new(),
                row_count: 0,
            });
            group.row_count += 1;
            if !group.postal_codes.contains(&record.postal_code) {
                group.postal_codes.push(record.postal_code.clone());
            }
        }
        Ok(groups
            .into_values()
            .map(|mut group| {
                group.postal_codes.sort();
                group
            })
            .collect())
    }

    async fn rewrite_slugs(&self, rewrites: &[SlugRewrite]) -> Result<RewriteOutcome, StorageError> {
        let mut guard = self.records.write().await;
        let inner = &mut *guard;
        let mut outcome = RewriteOutcome::default();

        for rewrite in rewrites {
            let target = NeighborhoodPath {
                province_slug: rewrite.slugs.province_slug.clone(),
                district_slug: rewrite.slugs.district_slug.clone(),
                neighborhood_slug: rewrite.slugs.neighborhood_slug.clone(),
            };
            let mut keep = Vec::with_capacity(inner.rows.len());
            for mut record in inner.rows.drain(..) {
                let drifted = record.province == rewrite.province
                    && record.district == rewrite.district
                    && record.neighborhood == rewrite.neighborhood
                    && record.path() != target;
                if !drifted {
                    keep.push(record);
                    continue;
                }
                inner.keys.remove(&key_of(&record));
                if inner.keys.contains(&(target.clone(), record.postal_code.clone())) {
                    outcome.duplicates_removed += 1;
                    continue;
                }
                record.province_slug.clone_from(&target.province_slug);
                record.district_slug.clone_from(&target.district_slug);
                record.neighborhood_slug.clone_from(&target.neighborhood_slug);
                inner.keys.insert(key_of(&record));
                outcome.rows_updated += 1;
                keep.push(record);
            }
            inner.rows = keep;
        }
        Ok(outcome)
    }
}

#[async_trait]
impl SearchLogStore for MemoryStore {
    async fn log_search(&self, query: &str, result_count: usize) -> Result<(), StorageError> {
        self.searches.write().await.push(LoggedSearch {
            query: query.to_owned(),
            result_count,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn popular_searches(&self, limit: usize) -> Result<Vec<SearchTerm>, StorageError> {
        let searches = self.searches.read().await;
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for search in searches.iter() {
            *counts.entry(search.query.as_str()).or_default() += 1;
        }
        let mut terms: Vec<SearchTerm> =
            counts.into_iter().map(|(query, count)| SearchTerm { query: query.to_owned(), count }).collect();
        terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.query.cmp(&b.query)));
        terms.truncate(limit);
        Ok(terms)
    }
}
