use std::result::Result as StdResult;

use thiserror::Error;

/// Caller contract violations detected by the core.
///
/// There is no "not found" variant: unknown slugs, unknown postal codes
/// and empty searches are expressed as [`crate::Lookup::NotFound`] or an empty
/// list, never as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid postal code '{0}': expected exactly 5 ASCII digits")]
    InvalidPostalCode(String),
}

pub type Result<T> = StdResult<T, DirectoryError>;
