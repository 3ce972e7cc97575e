//! Ephemeris provider errors.

use thiserror::Error;

use crate::Body;

/// Per-call failure from an ephemeris provider.
///
/// Range problems (`UnsupportedBody`, `UnsupportedDate`) are kept apart from
/// data problems so callers can decide what to retry.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// The provider has no data for this body.
    #[error("body {0} not supported by this ephemeris")]
    UnsupportedBody(Body),
    /// The Julian Day is outside the provider's coverage.
    #[error("julian day {jd} outside ephemeris range")]
    UnsupportedDate { jd: f64 },
    /// Reading or decoding ephemeris data failed.
    #[error("ephemeris data error: {0}")]
    Data(String),
    /// Any other backend failure.
    #[error("ephemeris backend error: {0}")]
    Backend(String),
}

impl From<std::io::Error> for EphemerisError {
    fn from(e: std::io::Error) -> Self {
        Self::Data(e.to_string())
    }
}

impl From<serde_json::Error> for EphemerisError {
    fn from(e: serde_json::Error) -> Self {
        Self::Data(e.to_string())
    }
}
