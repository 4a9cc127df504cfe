use std::sync::Arc;

use postakod_core::hierarchy;
use postakod_core::{
    DirectoryStats, DistrictNeighborhoods, Lookup, NeighborhoodDetail, PostalCode, PostalCodeLocations,
    ProvinceDistricts, ProvinceSummary, compare_turkish, normalize,
};
use postakod_storage::{LocationStore, StorageBackend};

use crate::ServiceError;

/// Normalize an incoming URL segment; `None` when nothing sluggable remains.
pub(crate) fn segment(raw: &str) -> Option<String> {
    let slug = normalize(raw);
    (!slug.is_empty()).then_some(slug)
}

/// Hierarchical resolver: province → district → neighborhood, and postal
/// code → locations.
#[derive(Clone)]
pub struct DirectoryService {
    storage: Arc<StorageBackend>,
}

impl DirectoryService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Every province, sorted by display name.
    pub async fn list_provinces(&self) -> Result<Vec<ProvinceSummary>, ServiceError> {
        let mut provinces = self.storage.province_summaries().await?;
        provinces.sort_by(|a, b| compare_turkish(&a.province, &b.province));
        Ok(provinces)
    }

    pub async fn province_exists(&self, province_slug: &str) -> Result<bool, ServiceError> {
        Ok(self.list_districts(province_slug).await?.is_found())
    }

    pub async fn list_districts(&self, province_slug: &str) -> Result<Lookup<ProvinceDistricts>, ServiceError> {
        let Some(province_slug) = segment(province_slug) else {
            return Ok(Lookup::NotFound);
        };
        let records = self.storage.records_in_province(&province_slug).await?;
        let Some(first) = records.first() else {
            tracing::debug!(%province_slug, "province not found");
            return Ok(Lookup::NotFound);
        };
        Ok(Lookup::Found(ProvinceDistricts {
            province: first.province.clone(),
            province_slug: first.province_slug.clone(),
            districts: hierarchy::summarize_districts(&records),
        }))
    }

    pub async fn list_neighborhoods(
        &self,
        province_slug: &str,
        district_slug: &str,
    ) -> Result<Lookup<DistrictNeighborhoods>, ServiceError> {
        let (Some(province_slug), Some(district_slug)) = (segment(province_slug), segment(district_slug)) else {
            return Ok(Lookup::NotFound);
        };
        let records = self.storage.records_in_district(&province_slug, &district_slug).await?;
        let Some(first) = records.first() else {
            tracing::debug!(%province_slug, %district_slug, "district not found");
            return Ok(Lookup::NotFound);
        };
        Ok(Lookup::Found(DistrictNeighborhoods {
            province: first.province.clone(),
            province_slug: first.province_slug.clone(),
            district: first.district.clone(),
            district_slug: first.district_slug.clone(),
            neighborhoods: hierarchy::distinct_neighborhoods(&records),
        }))
    }

    pub async fn neighborhood_detail(
        &self,
        province_slug: &str,
        district_slug: &str,
        neighborhood_slug: &str,
    ) -> Result<Lookup<NeighborhoodDetail>, ServiceError> {
        let (Some(p), Some(d), Some(n)) = (segment(province_slug), segment(district_slug), segment(neighborhood_slug))
        else {
            return Ok(Lookup::NotFound);
        };
        let records = self.storage.records_for_neighborhood(&p, &d, &n).await?;
        Ok(hierarchy::collect_detail(&records).into())
    }

    /// Locations served by `code`.
    ///
    /// A malformed code is a caller error; a well-formed but unknown one is
    /// [`Lookup::NotFound`].
    pub async fn locations_for_postal_code(&self, code: &str) -> Result<Lookup<PostalCodeLocations>, ServiceError> {
        let postal_code = PostalCode::parse(code)?;
        let records = self.storage.records_for_postal_code(&postal_code).await?;
        if records.is_empty() {
            return Ok(Lookup::NotFound);
        }
        Ok(Lookup::Found(PostalCodeLocations {
            locations: hierarchy::postal_code_locations(&records),
            postal_code,
        }))
    }

    pub async fn stats(&self) -> Result<DirectoryStats, ServiceError> {
        Ok(self.storage.stats().await?)
    }
}
