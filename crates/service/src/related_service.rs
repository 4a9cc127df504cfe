use std::collections::HashSet;
use std::sync::Arc;

use postakod_core::hierarchy;
use postakod_core::{DistrictRef, LocationRecord, NeighborhoodSummary, NeighboringDistrict};
use postakod_storage::{LocationStore, StorageBackend};

use crate::ServiceError;
use crate::directory_service::segment;

/// Related-entity finder: sibling districts, same-named neighborhoods
/// elsewhere, and sibling neighborhoods. Empty results are normal.
#[derive(Clone)]
pub struct RelatedService {
    storage: Arc<StorageBackend>,
}

impl RelatedService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Other districts of the same province with their neighborhood counts.
    pub async fn neighboring_districts(
        &self,
        province_slug: &str,
        district_slug: &str,
    ) -> Result<Vec<NeighboringDistrict>, ServiceError> {
        let (Some(p), Some(d)) = (segment(province_slug), segment(district_slug)) else {
            return Ok(Vec::new());
        };
        let records = self.storage.records_in_province(&p).await?;
        Ok(hierarchy::neighboring_districts(&records, &d))
    }

    /// Neighborhoods named exactly `neighborhood` outside `origin`, one
    /// record per neighborhood path, sorted by location.
    pub async fn similarly_named_neighborhoods(
        &self,
        neighborhood: &str,
        origin: &DistrictRef,
    ) -> Result<Vec<LocationRecord>, ServiceError> {
        let records = self.storage.records_named(neighborhood).await?;
        let mut seen = HashSet::new();
        let mut similar: Vec<LocationRecord> = records
            .into_iter()
            .filter(|r| r.province_slug != origin.province_slug || r.district_slug != origin.district_slug)
            .filter(|r| seen.insert(r.path()))
            .collect();
        hierarchy::sort_by_location(&mut similar);
        Ok(similar)
    }

    /// [`Self::similarly_named_neighborhoods`] for the neighborhood at a slug
    /// path. An unknown path yields an empty list.
    pub async fn similar_to(
        &self,
        province_slug: &str,
        district_slug: &str,
        neighborhood_slug: &str,
    ) -> Result<Vec<LocationRecord>, ServiceError> {
        let (Some(p), Some(d), Some(n)) = (segment(province_slug), segment(district_slug), segment(neighborhood_slug))
        else {
            return Ok(Vec::new());
        };
        let records = self.storage.records_for_neighborhood(&p, &d, &n).await?;
        let Some(origin) = records.first() else {
            return Ok(Vec::new());
        };
        self.similarly_named_neighborhoods(&origin.neighborhood, &origin.district_ref()).await
    }

    /// Other neighborhoods of the same district.
    pub async fn sibling_neighborhoods(
        &self,
        province_slug: &str,
        district_slug: &str,
        neighborhood_slug: &str,
    ) -> Result<Vec<NeighborhoodSummary>, ServiceError> {
        let (Some(p), Some(d), Some(n)) = (segment(province_slug), segment(district_slug), segment(neighborhood_slug))
        else {
            return Ok(Vec::new());
        };
        let records = self.storage.records_in_district(&p, &d).await?;
        Ok(hierarchy::distinct_neighborhoods(&records).into_iter().filter(|s| s.neighborhood_slug != n).collect())
    }
}
