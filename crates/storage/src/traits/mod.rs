//! Storage backend trait abstraction
//!
//! Async domain traits implemented by every backend and by
//! [`crate::StorageBackend`] through enum dispatch.

pub mod location;
pub mod search_log;

pub use location::LocationStore;
pub use search_log::SearchLogStore;
