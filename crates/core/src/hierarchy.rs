//! Pure aggregation over location records.
//!
//! Every function here takes records in store order and returns views sorted
//! by Turkish collation of their display names. Backends that cannot push an
//! aggregation down to the database fall back to these helpers.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::location::{
    DirectoryStats, DistrictRef, DistrictSummary, LocationRecord, NeighborhoodDetail, NeighborhoodPath,
    NeighborhoodSummary, NeighboringDistrict, PostalCodeLocation, ProvinceSummary,
};
use crate::normalize::compare_turkish;
use crate::postal_code::PostalCode;

/// Stable sort by province, district, then neighborhood display name.
pub fn sort_by_location(records: &mut [LocationRecord]) {
    records.sort_by(|a, b| {
        compare_turkish(&a.province, &b.province)
            .then_with(|| compare_turkish(&a.district, &b.district))
            .then_with(|| compare_turkish(&a.neighborhood, &b.neighborhood))
    });
}

/// Districts of `records` with their distinct postal-code counts.
///
/// The first display name seen for a slug wins.
#[must_use]
pub fn summarize_districts(records: &[LocationRecord]) -> Vec<DistrictSummary> {
    let mut order: Vec<(&str, &str)> = Vec::new();
    let mut codes: HashMap<&str, HashSet<&PostalCode>> = HashMap::new();
    for record in records {
        let entry = codes.entry(record.district_slug.as_str()).or_insert_with(|| {
            order.push((record.district_slug.as_str(), record.district.as_str()));
            HashSet::new()
        });
        entry.insert(&record.postal_code);
    }

    let mut districts: Vec<DistrictSummary> = order
        .into_iter()
        .map(|(slug, name)| DistrictSummary {
            district: name.to_owned(),
            district_slug: slug.to_owned(),
            postal_code_count: codes.get(slug).map_or(0, HashSet::len),
        })
        .collect();
    districts.sort_by(|a, b| compare_turkish(&a.district, &b.district));
    districts
}

/// Neighborhoods of `records`, one per slug.
#[must_use]
pub fn distinct_neighborhoods(records: &[LocationRecord]) -> Vec<NeighborhoodSummary> {
    let mut seen = HashSet::new();
    let mut neighborhoods: Vec<NeighborhoodSummary> = records
        .iter()
        .filter(|r| seen.insert(r.neighborhood_slug.as_str()))
        .map(|r| NeighborhoodSummary {
            neighborhood: r.neighborhood.clone(),
            neighborhood_slug: r.neighborhood_slug.clone(),
        })
        .collect();
    neighborhoods.sort_by(|a, b| compare_turkish(&a.neighborhood, &b.neighborhood));
    neighborhoods
}

/// Detail view for the records of a single neighborhood.
///
/// `None` for an empty slice. Names come from the first record, the subarea
/// from the first record that has one.
#[must_use]
pub fn collect_detail(records: &[LocationRecord]) -> Option<NeighborhoodDetail> {
    let first = records.first()?;
    let postal_codes: BTreeSet<&PostalCode> = records.iter().map(|r| &r.postal_code).collect();
    Some(NeighborhoodDetail {
        province: first.province.clone(),
        province_slug: first.province_slug.clone(),
        district: first.district.clone(),
        district_slug: first.district_slug.clone(),
        neighborhood: first.neighborhood.clone(),
        neighborhood_slug: first.neighborhood_slug.clone(),
        subarea: records.iter().find_map(|r| r.subarea.clone()),
        postal_codes: postal_codes.into_iter().cloned().collect(),
    })
}

/// Locations served by one postal code, sorted and without duplicates.
#[must_use]
pub fn postal_code_locations(records: &[LocationRecord]) -> Vec<PostalCodeLocation> {
    let mut sorted = records.to_vec();
    sort_by_location(&mut sorted);
    let mut seen = HashSet::new();
    sorted
        .iter()
        .filter(|r| seen.insert(r.path()))
        .map(LocationRecord::location)
        .collect()
}

#[must_use]
pub fn summarize_provinces(records: &[LocationRecord]) -> Vec<ProvinceSummary> {
    let mut order: Vec<(&str, &str)> = Vec::new();
    let mut groups: HashMap<&str, (HashSet<&str>, usize)> = HashMap::new();
    for record in records {
        let (districts, count) = groups.entry(record.province_slug.as_str()).or_insert_with(|| {
            order.push((record.province_slug.as_str(), record.province.as_str()));
            (HashSet::new(), 0)
        });
        districts.insert(record.district_slug.as_str());
        *count += 1;
    }

    let mut provinces: Vec<ProvinceSummary> = order
        .into_iter()
        .map(|(slug, name)| {
            let (district_count, record_count) =
                groups.get(slug).map_or((0, 0), |(districts, count)| (districts.len(), *count));
            ProvinceSummary {
                province: name.to_owned(),
                province_slug: slug.to_owned(),
                district_count,
                record_count,
            }
        })
        .collect();
    provinces.sort_by(|a, b| compare_turkish(&a.province, &b.province));
    provinces
}

/// Districts of a province other than `exclude`, with neighborhood counts.
///
/// `records` must all belong to the same province.
#[must_use]
pub fn neighboring_districts(records: &[LocationRecord], exclude_district_slug: &str) -> Vec<NeighboringDistrict> {
    let mut order: Vec<(&str, &str)> = Vec::new();
    let mut neighborhoods: HashMap<&str, HashSet<&str>> = HashMap::new();
    for record in records.iter().filter(|r| r.district_slug != exclude_district_slug) {
        neighborhoods
            .entry(record.district_slug.as_str())
            .or_insert_with(|| {
                order.push((record.district_slug.as_str(), record.district.as_str()));
                HashSet::new()
            })
            .insert(record.neighborhood_slug.as_str());
    }

    let mut districts: Vec<NeighboringDistrict> = order
        .into_iter()
        .map(|(slug, name)| NeighboringDistrict {
            district: name.to_owned(),
            district_slug: slug.to_owned(),
            neighborhood_count: neighborhoods.get(slug).map_or(0, HashSet::len),
        })
        .collect();
    districts.sort_by(|a, b| compare_turkish(&a.district, &b.district));
    districts
}

/// Distinct neighborhood paths in slug order.
#[must_use]
pub fn neighborhood_paths(records: &[LocationRecord]) -> Vec<NeighborhoodPath> {
    records.iter().map(LocationRecord::path).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Distinct district paths in slug order.
#[must_use]
pub fn district_paths(records: &[LocationRecord]) -> Vec<DistrictRef> {
    records.iter().map(LocationRecord::district_ref).collect::<BTreeSet<_>>().into_iter().collect()
}

/// Distinct postal codes, ascending.
#[must_use]
pub fn distinct_postal_codes(records: &[LocationRecord]) -> Vec<PostalCode> {
    records.iter().map(|r| r.postal_code.clone()).collect::<BTreeSet<_>>().into_iter().collect()
}

#[must_use]
pub fn compute_stats(records: &[LocationRecord]) -> DirectoryStats {
    let provinces: HashSet<&str> = records.iter().map(|r| r.province_slug.as_str()).collect();
    let districts: HashSet<(&str, &str)> =
        records.iter().map(|r| (r.province_slug.as_str(), r.district_slug.as_str())).collect();
    let neighborhoods: HashSet<(&str, &str, &str)> = records
        .iter()
        .map(|r| (r.province_slug.as_str(), r.district_slug.as_str(), r.neighborhood_slug.as_str()))
        .collect();
    let codes: HashSet<&PostalCode> = records.iter().map(|r| &r.postal_code).collect();

    DirectoryStats {
        province_count: provinces.len(),
        district_count: districts.len(),
        neighborhood_count: neighborhoods.len(),
        postal_code_count: codes.len(),
        record_count: records.len(),
    }
}
