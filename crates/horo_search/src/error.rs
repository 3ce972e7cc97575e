//! Error types for the search engine.

use horo_chart::ChartError;
use horo_core::EphemerisError;
use horo_time::TimeError;
use thiserror::Error;

/// Errors from scans and event searches.
///
/// "No event" is not an error: searches return `Ok(None)` for that.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// A per-step chart could not be computed.
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    /// Date stepping left the supported calendar.
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error("invalid search config: {0}")]
    InvalidConfig(&'static str),
}
