//! Error types for chart computation.

use horo_core::EphemerisError;
use horo_houses::HouseError;
use horo_time::TimeError;
use thiserror::Error;

/// Fatal chart failures.
///
/// All of these are raised before a chart is assembled; a per-body
/// ephemeris failure is not fatal and never shows up here.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Date or clock time is invalid or outside the supported range.
    #[error("invalid subject time: {0}")]
    Time(#[from] TimeError),
    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("UTC offset {0} outside [-14, 14] hours")]
    InvalidUtcOffset(f64),
    /// Unknown house-system code or name.
    #[error(transparent)]
    House(#[from] HouseError),
    /// Obliquity or sidereal time could not be obtained.
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("invalid chart config: {0}")]
    InvalidConfig(&'static str),
}
