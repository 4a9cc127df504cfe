//! Typed error enum for the service layer.
//!
//! Unknown slugs and postal codes are not errors: they surface as
//! [`postakod_core::Lookup::NotFound`] or an empty list. What remains is
//! storage failure and caller contract violations.

use postakod_core::DirectoryError;
use postakod_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage failures and bad input.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, duplicate, corrupt row, etc.).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input (malformed postal code, zero shards).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::InvalidInput(_) => false,
        }
    }

    /// Whether this error represents a duplicate/conflict.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_duplicate())
    }
}

impl From<DirectoryError> for ServiceError {
    fn from(err: DirectoryError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
