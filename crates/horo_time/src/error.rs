//! Error types for calendar and time handling.

use thiserror::Error;

/// Errors from calendar validation and date stepping.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Day or month does not exist in the selected calendar.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    /// Year is outside the supported calendar range.
    #[error("year {year} outside supported range {min}..={max}")]
    OutOfRange { year: i64, min: i32, max: i32 },
    /// Clock time is not a finite number of hours.
    #[error("invalid clock time: {0}")]
    InvalidClock(f64),
    /// Unparseable or zero-length step.
    #[error("invalid step: {0}")]
    InvalidStep(String),
}
