pub(crate) mod migrate;
pub(crate) mod query;
pub(crate) mod repair;
pub(crate) mod serve;
pub(crate) mod sitemap;
