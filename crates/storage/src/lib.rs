//! Storage layer for postakod
//!
//! Location records and the search log behind async traits, with an
//! in-memory backend and a PostgreSQL backend (feature `postgres`) unified
//! by [`StorageBackend`].

mod backend;
pub mod error;
mod memory;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
#[cfg(test)]
mod tests;
pub mod traits;
mod types;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use pg_migrations::run_pg_migrations;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStore;
pub use traits::{LocationStore, SearchLogStore};
pub use types::{CandidateFilter, RewriteOutcome, SlugGroup, SlugRewrite};
