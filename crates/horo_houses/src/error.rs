//! Error types for house-system selection.

use thiserror::Error;

/// Errors from resolving a house-system identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HouseError {
    /// Numeric code outside 0..=13.
    #[error("unknown house system code {0}")]
    UnknownCode(i32),
    /// Name that matches no house system.
    #[error("unknown house system '{0}'")]
    UnknownName(String),
}
