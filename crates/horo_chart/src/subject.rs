//! The immutable description of a charted event.

use horo_houses::HouseSystem;
use horo_time::{CalendarDate, Instant};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Largest accepted |UTC offset| in hours.
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// Date, local clock time, place and house system of one event.
///
/// A subject is never mutated; a moving subject in a transit scan is a new
/// value per step built with [`Subject::at`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub date: CalendarDate,
    /// Local clock time in decimal hours, [0, 24).
    pub hours: f64,
    /// Local clock minus UT, in hours (e.g. +1.0 for CET).
    pub utc_offset_hours: f64,
    /// Geographic longitude, degrees east positive.
    pub longitude_deg: f64,
    /// Geographic latitude, degrees north positive.
    pub latitude_deg: f64,
    pub house_system: HouseSystem,
}

impl Subject {
    /// Subject with a UT clock (offset 0).
    pub fn new(
        date: CalendarDate,
        hours: f64,
        longitude_deg: f64,
        latitude_deg: f64,
        house_system: HouseSystem,
    ) -> Self {
        Self {
            date,
            hours,
            utc_offset_hours: 0.0,
            longitude_deg,
            latitude_deg,
            house_system,
        }
    }

    pub fn with_utc_offset(mut self, hours: f64) -> Self {
        self.utc_offset_hours = hours;
        self
    }

    /// Check every precondition of chart computation.
    pub fn validate(&self) -> Result<(), ChartError> {
        Instant::new(self.date, self.hours)?;
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(ChartError::InvalidLatitude(self.latitude_deg));
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err(ChartError::InvalidLongitude(self.longitude_deg));
        }
        if !self.utc_offset_hours.is_finite() || self.utc_offset_hours.abs() > MAX_UTC_OFFSET_HOURS
        {
            return Err(ChartError::InvalidUtcOffset(self.utc_offset_hours));
        }
        Ok(())
    }

    /// Local date and clock as an [`Instant`].
    pub fn instant(&self) -> Result<Instant, ChartError> {
        Ok(Instant::new(self.date, self.hours)?)
    }

    /// The same place and house system at another local instant.
    pub fn at(&self, instant: Instant) -> Self {
        Self {
            date: instant.date,
            hours: instant.hours,
            ..*self
        }
    }

    /// Julian Day in UT.
    pub fn julian_day_ut(&self) -> f64 {
        self.date.julian_day(self.hours) - self.utc_offset_hours / 24.0
    }
}
