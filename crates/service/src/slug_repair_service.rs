//! Slug drift detection and repair.
//!
//! Slugs are stored next to the display names. When the normalizer changes
//! or rows are edited by hand, the stored slugs can drift away from
//! `normalize(display name)`; this job finds and rewrites them.

use std::collections::BTreeMap;
use std::sync::Arc;

use postakod_core::provinces::{prefix_agrees_with, province_for_postal_code};
use postakod_core::{PostalCode, SlugTriple};
use postakod_storage::{LocationStore, RewriteOutcome, SlugRewrite, StorageBackend};
use serde::Serialize;

use crate::ServiceError;

/// A group of rows whose stored slugs differ from the recomputed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugDrift {
    pub province: String,
    pub district: String,
    pub neighborhood: String,
    pub stored: SlugTriple,
    pub expected: SlugTriple,
    pub row_count: usize,
}

/// A postal code whose numeric prefix belongs to another province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefixMismatch {
    pub province: String,
    pub district: String,
    pub neighborhood: String,
    pub postal_code: PostalCode,
    pub prefix_province: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugReport {
    pub groups_checked: usize,
    pub drifted: Vec<SlugDrift>,
    /// Display triples with a name that has no slug at all.
    pub unsluggable: usize,
    pub prefix_mismatches: Vec<PrefixMismatch>,
}

impl SlugReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.drifted.is_empty() && self.unsluggable == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairReport {
    pub diagnosis: SlugReport,
    pub outcome: RewriteOutcome,
}

#[derive(Clone)]
pub struct SlugRepairService {
    storage: Arc<StorageBackend>,
}

impl SlugRepairService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>) -> Self {
        Self { storage }
    }

    /// Recompute every slug and report drift without changing anything.
    pub async fn diagnose(&self) -> Result<SlugReport, ServiceError> {
        let groups = self.storage.slug_groups().await?;
        let mut report = SlugReport { groups_checked: groups.len(), ..SlugReport::default() };

        for group in groups {
            for code in &group.postal_codes {
                if prefix_agrees_with(code, &group.province) == Some(false) {
                    report.prefix_mismatches.push(PrefixMismatch {
                        province: group.province.clone(),
                        district: group.district.clone(),
                        neighborhood: group.neighborhood.clone(),
                        postal_code: code.clone(),
                        prefix_province: province_for_postal_code(code).unwrap_or_default().to_owned(),
                    });
                }
            }

            let Some(expected) = SlugTriple::derive(&group.province, &group.district, &group.neighborhood) else {
                tracing::warn!(
                    province = %group.province,
                    district = %group.district,
                    neighborhood = %group.neighborhood,
                    "display name has no slug, cannot repair"
                );
                report.unsluggable += 1;
                continue;
            };
            if expected != group.stored {
                report.drifted.push(SlugDrift {
                    province: group.province,
                    district: group.district,
                    neighborhood: group.neighborhood,
                    stored: group.stored,
                    expected,
                    row_count: group.row_count,
                });
            }
        }

        tracing::info!(
            groups = report.groups_checked,
            drifted = report.drifted.len(),
            unsluggable = report.unsluggable,
            prefix_mismatches = report.prefix_mismatches.len(),
            "slug diagnosis finished"
        );
        Ok(report)
    }

    /// Rewrite every drifted group in a single transaction.
    pub async fn repair(&self) -> Result<RepairReport, ServiceError> {
        let diagnosis = self.diagnose().await?;

        // Several stored variants of one display triple need only one rewrite.
        let rewrites: BTreeMap<(&str, &str, &str), &SlugTriple> = diagnosis
            .drifted
            .iter()
            .map(|d| ((d.province.as_str(), d.district.as_str(), d.neighborhood.as_str()), &d.expected))
            .collect();
        let rewrites: Vec<SlugRewrite> = rewrites
            .into_iter()
            .map(|((province, district, neighborhood), slugs)| SlugRewrite {
                province: province.to_owned(),
                district: district.to_owned(),
                neighborhood: neighborhood.to_owned(),
                slugs: slugs.clone(),
            })
            .collect();

        if rewrites.is_empty() {
            return Ok(RepairReport { diagnosis, outcome: RewriteOutcome::default() });
        }
        let outcome = self.storage.rewrite_slugs(&rewrites).await?;
        Ok(RepairReport { diagnosis, outcome })
    }
}
