//! Core types for postakod
//!
//! Domain types, the Turkish locale normalizer and the pure helpers shared by
//! every other crate: hierarchy aggregation, sitemap partitioning and
//! environment configuration.

pub mod constants;
pub mod env_config;
mod error;
pub mod hierarchy;
mod location;
mod lookup;
pub mod normalize;
mod postal_code;
pub mod provinces;
pub mod sitemap;

pub use env_config::DirectoryConfig;
pub use error::*;
pub use location::*;
pub use lookup::Lookup;
pub use normalize::{compare_turkish, fold_for_search, normalize, normalize_name, SearchPattern};
pub use postal_code::{is_numeric_query, PostalCode};
