//! Location records and the read-only views derived from them.

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, Result};
use crate::normalize::normalize_name;
use crate::postal_code::PostalCode;

/// One row of the directory: a neighborhood paired with one of its postal codes.
///
/// A neighborhood served by several postal codes appears once per code. The
/// three slugs are stored alongside the display names; they are computed by
/// [`LocationRecord::new`] and checked by [`LocationRecord::slugs_consistent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub province: String,
    pub district: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subarea: Option<String>,
    pub neighborhood: String,
    pub postal_code: PostalCode,
    pub province_slug: String,
    pub district_slug: String,
    pub neighborhood_slug: String,
}

impl LocationRecord {
    /// Build a record from display names, deriving every slug.
    ///
    /// Fields are trimmed; a blank `subarea` is stored as absent.
    pub fn new(
        province: &str,
        district: &str,
        subarea: Option<&str>,
        neighborhood: &str,
        postal_code: &str,
    ) -> Result<Self> {
        let province_slug = normalize_name(province)
            .map_err(|e| DirectoryError::InvalidInput(format!("province: {e}")))?;
        let district_slug = normalize_name(district)
            .map_err(|e| DirectoryError::InvalidInput(format!("district: {e}")))?;
        let neighborhood_slug = normalize_name(neighborhood)
            .map_err(|e| DirectoryError::InvalidInput(format!("neighborhood: {e}")))?;
        let postal_code = PostalCode::parse(postal_code)?;

        Ok(Self {
            province: province.trim().to_owned(),
            district: district.trim().to_owned(),
            subarea: subarea.map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned),
            neighborhood: neighborhood.trim().to_owned(),
            postal_code,
            province_slug,
            district_slug,
            neighborhood_slug,
        })
    }

    /// Whether the stored slugs still equal the slugs of the display names.
    #[must_use]
    pub fn slugs_consistent(&self) -> bool {
        let expected = SlugTriple::derive(&self.province, &self.district, &self.neighborhood);
        expected.as_ref().is_some_and(|slugs| *slugs == self.slugs())
    }

    #[must_use]
    pub fn slugs(&self) -> SlugTriple {
        SlugTriple {
            province_slug: self.province_slug.clone(),
            district_slug: self.district_slug.clone(),
            neighborhood_slug: self.neighborhood_slug.clone(),
        }
    }

    #[must_use]
    pub fn path(&self) -> NeighborhoodPath {
        NeighborhoodPath {
            province_slug: self.province_slug.clone(),
            district_slug: self.district_slug.clone(),
            neighborhood_slug: self.neighborhood_slug.clone(),
        }
    }

    #[must_use]
    pub fn district_ref(&self) -> DistrictRef {
        DistrictRef {
            province_slug: self.province_slug.clone(),
            district_slug: self.district_slug.clone(),
        }
    }

    #[must_use]
    pub fn location(&self) -> PostalCodeLocation {
        PostalCodeLocation {
            province: self.province.clone(),
            province_slug: self.province_slug.clone(),
            district: self.district.clone(),
            district_slug: self.district_slug.clone(),
            neighborhood: self.neighborhood.clone(),
            neighborhood_slug: self.neighborhood_slug.clone(),
            subarea: self.subarea.clone(),
        }
    }
}

/// The three slugs of a record, as stored or as recomputed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugTriple {
    pub province_slug: String,
    pub district_slug: String,
    pub neighborhood_slug: String,
}

impl SlugTriple {
    /// Slugs for a display triple; `None` when any name has no slug.
    #[must_use]
    pub fn derive(province: &str, district: &str, neighborhood: &str) -> Option<Self> {
        Some(Self {
            province_slug: normalize_name(province).ok()?,
            district_slug: normalize_name(district).ok()?,
            neighborhood_slug: normalize_name(neighborhood).ok()?,
        })
    }
}

/// Slug path of a neighborhood page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodPath {
    pub province_slug: String,
    pub district_slug: String,
    pub neighborhood_slug: String,
}

impl NeighborhoodPath {
    /// `{province}/{district}/{neighborhood}`, without leading slash.
    #[must_use]
    pub fn url_path(&self) -> String {
        format!("{}/{}/{}", self.province_slug, self.district_slug, self.neighborhood_slug)
    }
}

/// Slug path of a district page; also identifies a district as a search origin.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictRef {
    pub province_slug: String,
    pub district_slug: String,
}

impl DistrictRef {
    #[must_use]
    pub fn new(province_slug: impl Into<String>, district_slug: impl Into<String>) -> Self {
        Self { province_slug: province_slug.into(), district_slug: district_slug.into() }
    }

    #[must_use]
    pub fn url_path(&self) -> String {
        format!("{}/{}", self.province_slug, self.district_slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceSummary {
    pub province: String,
    pub province_slug: String,
    pub district_count: usize,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictSummary {
    pub district: String,
    pub district_slug: String,
    /// Distinct postal codes across the district's records.
    pub postal_code_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodSummary {
    pub neighborhood: String,
    pub neighborhood_slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodDetail {
    pub province: String,
    pub province_slug: String,
    pub district: String,
    pub district_slug: String,
    pub neighborhood: String,
    pub neighborhood_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subarea: Option<String>,
    /// Distinct, ascending.
    pub postal_codes: Vec<PostalCode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalCodeLocation {
    pub province: String,
    pub province_slug: String,
    pub district: String,
    pub district_slug: String,
    pub neighborhood: String,
    pub neighborhood_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subarea: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighboringDistrict {
    pub district: String,
    pub district_slug: String,
    /// Distinct neighborhood slugs in the district.
    pub neighborhood_count: usize,
}

/// Districts of one province, sorted by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvinceDistricts {
    pub province: String,
    pub province_slug: String,
    pub districts: Vec<DistrictSummary>,
}

/// Neighborhoods of one district, de-duplicated by slug and sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictNeighborhoods {
    pub province: String,
    pub province_slug: String,
    pub district: String,
    pub district_slug: String,
    pub neighborhoods: Vec<NeighborhoodSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalCodeLocations {
    pub postal_code: PostalCode,
    pub locations: Vec<PostalCodeLocation>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    pub province_count: usize,
    pub district_count: usize,
    pub neighborhood_count: usize,
    pub postal_code_count: usize,
    pub record_count: usize,
}

/// Aggregated search-log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTerm {
    pub query: String,
    pub count: u64,
}
