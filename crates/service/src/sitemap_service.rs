use std::sync::Arc;

use postakod_core::sitemap::{effective_shard_count, partition};
use postakod_core::Lookup;
use postakod_storage::{LocationStore, StorageBackend};
use serde::Serialize;

use crate::ServiceError;

/// Static pages listed in the static sitemap, after the homepage.
const STATIC_PAGES: [&str; 6] =
    ["ara", "hakkimizda", "iletisim", "gizlilik-politikasi", "kullanim-sartlari", "cerez-politikasi"];

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapUrl {
    pub loc: String,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Sitemap partitioner and URL builder.
///
/// Neighborhood URLs are split into a fixed number of shards so that no
/// sitemap file grows past the protocol's URL limit.
#[derive(Clone)]
pub struct SitemapService {
    storage: Arc<StorageBackend>,
    base_url: String,
    shard_count: usize,
}

impl SitemapService {
    /// `base_url` is used without a trailing slash; `shard_count` must be at
    /// least 1.
    pub fn new(storage: Arc<StorageBackend>, base_url: &str, shard_count: usize) -> Result<Self, ServiceError> {
        if shard_count == 0 {
            return Err(ServiceError::InvalidInput("sitemap shard count must be at least 1".to_owned()));
        }
        Ok(Self { storage, base_url: base_url.trim_end_matches('/').to_owned(), shard_count })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, changefreq: &'static str, priority: &'static str) -> SitemapUrl {
        SitemapUrl { loc: format!("{}/{path}", self.base_url), changefreq, priority }
    }

    /// Homepage and informational pages.
    #[must_use]
    pub fn static_urls(&self) -> Vec<SitemapUrl> {
        std::iter::once(self.url("", "daily", "1.0"))
            .chain(STATIC_PAGES.iter().map(|page| self.url(page, "monthly", "0.5")))
            .collect()
    }

    pub async fn province_urls(&self) -> Result<Vec<SitemapUrl>, ServiceError> {
        let mut slugs: Vec<String> =
            self.storage.province_summaries().await?.into_iter().map(|p| p.province_slug).collect();
        slugs.sort();
        Ok(slugs.iter().map(|slug| self.url(slug, "weekly", "0.9")).collect())
    }

    pub async fn district_urls(&self) -> Result<Vec<SitemapUrl>, ServiceError> {
        let paths = self.storage.district_paths().await?;
        Ok(paths.iter().map(|p| self.url(&p.url_path(), "weekly", "0.8")).collect())
    }

    pub async fn postal_code_urls(&self) -> Result<Vec<SitemapUrl>, ServiceError> {
        let codes = self.storage.distinct_postal_codes().await?;
        Ok(codes.iter().map(|code| self.url(&format!("kod/{code}"), "monthly", "0.6")).collect())
    }

    /// Every neighborhood URL, in slug order.
    pub async fn neighborhood_urls(&self) -> Result<Vec<SitemapUrl>, ServiceError> {
        let paths = self.storage.neighborhood_paths().await?;
        Ok(paths.iter().map(|p| self.url(&p.url_path(), "monthly", "0.7")).collect())
    }

    /// Number of neighborhood shards actually served.
    pub async fn shard_count(&self) -> Result<usize, ServiceError> {
        let total = self.storage.neighborhood_paths().await?.len();
        Ok(effective_shard_count(total, self.shard_count))
    }

    /// All neighborhood shards, in order.
    pub async fn shards(&self) -> Result<Vec<Vec<SitemapUrl>>, ServiceError> {
        let urls = self.neighborhood_urls().await?;
        let count = effective_shard_count(urls.len(), self.shard_count);
        Ok(partition(&urls, count)?)
    }

    /// Shard `number`, counted from 1. Out of range is [`Lookup::NotFound`].
    pub async fn shard(&self, number: usize) -> Result<Lookup<Vec<SitemapUrl>>, ServiceError> {
        if number == 0 {
            return Ok(Lookup::NotFound);
        }
        let mut shards = self.shards().await?;
        if number > shards.len() {
            tracing::debug!(number, available = shards.len(), "sitemap shard out of range");
            return Ok(Lookup::NotFound);
        }
        Ok(Lookup::Found(shards.swap_remove(number - 1)))
    }

    /// Absolute locations of every sitemap file, for the sitemap index.
    pub async fn index_locations(&self) -> Result<Vec<String>, ServiceError> {
        let shard_count = self.shard_count().await?;
        let base = &self.base_url;
        let mut locations = vec![
            format!("{base}/sitemaps/static.xml"),
            format!("{base}/sitemaps/cities.xml"),
            format!("{base}/sitemaps/districts.xml"),
        ];
        locations.extend((1..=shard_count).map(|n| format!("{base}/sitemaps/neighborhoods/{n}.xml")));
        locations.push(format!("{base}/sitemaps/postal-codes.xml"));
        Ok(locations)
    }
}
