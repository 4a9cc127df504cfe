use std::sync::Arc;

use anyhow::Result;
use postakod_core::DirectoryConfig;
use postakod_service::SlugRepairService;

use crate::{open_storage, print_json};

pub(crate) async fn run(config: &DirectoryConfig, dry_run: bool) -> Result<()> {
    let storage = Arc::new(open_storage(config).await?);
    let service = SlugRepairService::new(storage);

    if dry_run {
        let report = service.diagnose().await?;
        return print_json(&report);
    }

    let repaired = service.repair().await?;
    tracing::info!(
        rows_updated = repaired.outcome.rows_updated,
        duplicates_removed = repaired.outcome.duplicates_removed,
        "slug repair finished"
    );
    print_json(&repaired)
}
