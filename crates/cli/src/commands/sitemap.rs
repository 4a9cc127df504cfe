use std::sync::Arc;

use anyhow::Result;
use postakod_core::{DirectoryConfig, Lookup};
use postakod_service::SitemapService;

use crate::{open_storage, print_json};

/// Without `shard`, print the sitemap index; with it, that shard's URLs.
pub(crate) async fn run(config: &DirectoryConfig, shard: Option<usize>) -> Result<()> {
    let storage = Arc::new(open_storage(config).await?);
    let sitemap = SitemapService::new(storage, &config.base_url, config.shard_count)?;
    let Some(number) = shard else {
        return print_json(&sitemap.index_locations().await?);
    };
    match sitemap.shard(number).await? {
        Lookup::Found(urls) => print_json(&urls),
        Lookup::NotFound => {
            let available = sitemap.shard_count().await?;
            anyhow::bail!("shard {number} out of range (1..={available})")
        },
    }
}
