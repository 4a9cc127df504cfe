//! Service layer for postakod
//!
//! Centralizes business logic between the HTTP/CLI surfaces and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod directory_service;
mod error;
mod related_service;
mod search_service;
mod sitemap_service;
mod slug_repair_service;

pub use directory_service::DirectoryService;
pub use error::ServiceError;
pub use related_service::RelatedService;
pub use search_service::SearchService;
pub use sitemap_service::{SitemapService, SitemapUrl};
pub use slug_repair_service::{PrefixMismatch, RepairReport, SlugDrift, SlugRepairService, SlugReport};
