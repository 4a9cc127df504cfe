//! Storage types shared across modules

use postakod_core::{PostalCode, SearchPattern, SlugTriple};
use serde::{Deserialize, Serialize};

/// Coarse filter a backend may push down when collecting search candidates.
///
/// Backends are free to return a superset; the search matcher decides.
#[derive(Debug, Clone, Copy)]
pub enum CandidateFilter<'a> {
    /// Postal codes starting with these digits.
    PostalPrefix(&'a str),
    /// Any name column containing the pattern.
    Text(&'a SearchPattern),
}

/// Rows sharing one display triple and one stored slug triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugGroup {
    pub province: String,
    pub district: String,
    pub neighborhood: String,
    pub stored: SlugTriple,
    /// Distinct, ascending.
    pub postal_codes: Vec<PostalCode>,
    pub row_count: usize,
}

/// Replace the slugs of every row with the given display triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlugRewrite {
    pub province: String,
    pub district: String,
    pub neighborhood: String,
    pub slugs: SlugTriple,
}

/// Rows touched by a batch of [`SlugRewrite`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOutcome {
    pub rows_updated: u64,
    /// Drifted rows dropped because a correctly slugged copy already existed.
    pub duplicates_removed: u64,
}
