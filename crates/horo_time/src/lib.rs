//! Time kernel for chart computation.
//!
//! This crate provides:
//! - Julian Day from a calendar date and back (Julian or Gregorian calendar)
//! - Delta-T (TT − UT) approximation with boundary clamping
//! - Calendar dates, instants and step granularities with month-end clamping
//! - Reference mean obliquity and sidereal time

pub mod calendar;
pub mod delta_t;
pub mod error;
pub mod julian;
pub mod sidereal;

pub use calendar::{
    CalendarDate, Instant, MAX_YEAR, MIN_YEAR, StepGranularity, decimal_hours_to_hms,
    days_in_month, hms_to_decimal_hours, is_leap_year,
};
pub use delta_t::{DELTA_T_FIRST_YEAR, DELTA_T_LAST_YEAR, delta_t_days, delta_t_seconds};
pub use error::TimeError;
pub use julian::{J2000_JD, calendar_from_jd, julian_day};
pub use sidereal::{gmst_deg, local_sidereal_time_deg, mean_obliquity_deg};
