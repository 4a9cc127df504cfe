//! Read-only directory queries printed as JSON.

use std::sync::Arc;

use anyhow::Result;
use postakod_core::{DirectoryConfig, Lookup, PostalCode};
use postakod_service::{DirectoryService, SearchService};

use crate::{open_storage, print_json};

pub(crate) async fn run_search(config: &DirectoryConfig, query: &str, limit: Option<usize>) -> Result<()> {
    let storage = Arc::new(open_storage(config).await?);
    let results = SearchService::new(storage).search(query, limit.unwrap_or(config.search_limit)).await?;
    print_json(&results)
}

pub(crate) async fn run_lookup(config: &DirectoryConfig, postal_code: &str) -> Result<()> {
    // Reject malformed codes before touching the database.
    PostalCode::parse(postal_code)?;
    let storage = Arc::new(open_storage(config).await?);
    match DirectoryService::new(storage).locations_for_postal_code(postal_code).await? {
        Lookup::Found(locations) => print_json(&locations),
        Lookup::NotFound => anyhow::bail!("postal code not found: {postal_code}"),
    }
}

pub(crate) async fn run_districts(config: &DirectoryConfig, province: &str) -> Result<()> {
    let storage = Arc::new(open_storage(config).await?);
    match DirectoryService::new(storage).list_districts(province).await? {
        Lookup::Found(districts) => print_json(&districts),
        Lookup::NotFound => anyhow::bail!("province not found: {province}"),
    }
}

pub(crate) async fn run_stats(config: &DirectoryConfig) -> Result<()> {
    let storage = Arc::new(open_storage(config).await?);
    print_json(&DirectoryService::new(storage).stats().await?)
}
