//! Response types (Serialize)

use postakod_core::{NeighborhoodDetail, NeighborhoodSummary};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}

/// Neighborhood page payload: the detail plus the rest of its district.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodResponse {
    #[serde(flatten)]
    pub detail: NeighborhoodDetail,
    pub related_neighborhoods: Vec<NeighborhoodSummary>,
}
