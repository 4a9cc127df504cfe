use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{POSTAL_CODE_LEN, PROVINCE_PREFIX_LEN};
use crate::error::{DirectoryError, Result};

/// A Turkish postal code: exactly five ASCII digits, leading zeros kept.
///
/// Serialized as a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Validate and wrap `raw` (surrounding whitespace is ignored).
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.len() == POSTAL_CODE_LEN && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(DirectoryError::InvalidPostalCode(raw.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two leading digits identifying the province.
    #[must_use]
    pub fn province_prefix(&self) -> &str {
        &self.0[..PROVINCE_PREFIX_LEN]
    }
}

/// Whether `query` is a non-empty run of ASCII digits, i.e. a postal-code
/// lookup rather than a name search.
#[must_use]
pub fn is_numeric_query(query: &str) -> bool {
    !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for PostalCode {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PostalCode {
    type Error = DirectoryError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PostalCode> for String {
    fn from(code: PostalCode) -> Self {
        code.0
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
