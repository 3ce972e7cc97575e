//! Calendar dates, instants and date stepping.
//!
//! Gregorian dates delegate arithmetic to `chrono`; Julian-calendar dates
//! step through the Julian Day. Month and year steps clamp the day of month
//! to the last valid day of the target month, so Jan 31 + 1 month lands on
//! the last day of February.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;
use crate::julian::{calendar_from_jd, julian_day};

/// Earliest supported calendar year (astronomical numbering).
pub const MIN_YEAR: i32 = -3000;
/// Latest supported calendar year.
pub const MAX_YEAR: i32 = 3000;

/// A calendar date together with the calendar it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    /// Astronomical year (1 BC = 0).
    pub year: i32,
    /// Month 1..=12.
    pub month: u32,
    /// Day of month, 1-based.
    pub day: u32,
    /// `true` for the Gregorian calendar, `false` for the Julian calendar.
    pub gregorian: bool,
}

/// Leap-year rule of the selected calendar.
pub fn is_leap_year(year: i32, gregorian: bool) -> bool {
    if gregorian {
        (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
    } else {
        year.rem_euclid(4) == 0
    }
}

/// Number of days in a month, or 0 for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32, gregorian: bool) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year, gregorian) => 29,
        2 => 28,
        _ => 0,
    }
}

fn check_year(year: i64) -> Result<i32, TimeError> {
    if (MIN_YEAR as i64..=MAX_YEAR as i64).contains(&year) {
        Ok(year as i32)
    } else {
        Err(TimeError::OutOfRange {
            year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        })
    }
}

impl CalendarDate {
    /// Validated date. Rejects non-existent days and years outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, month: u32, day: u32, gregorian: bool) -> Result<Self, TimeError> {
        let date = Self {
            year,
            month,
            day,
            gregorian,
        };
        date.validate()?;
        Ok(date)
    }

    /// Gregorian date, validated.
    pub fn gregorian(year: i32, month: u32, day: u32) -> Result<Self, TimeError> {
        Self::new(year, month, day, true)
    }

    /// Check the date exists in its calendar and lies in the supported range.
    pub fn validate(&self) -> Result<(), TimeError> {
        check_year(self.year as i64)?;
        let exists = if self.gregorian {
            NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_some()
        } else {
            self.day >= 1 && self.day <= days_in_month(self.year, self.month, false)
        };
        if exists {
            Ok(())
        } else {
            Err(TimeError::InvalidDate {
                year: self.year,
                month: self.month,
                day: self.day,
            })
        }
    }

    /// Julian Day at the given clock time (decimal hours) on this date.
    pub fn julian_day(&self, decimal_hour: f64) -> f64 {
        julian_day(self.day, self.month, self.year, decimal_hour, self.gregorian)
    }

    /// The same day as a `chrono` date, for Gregorian dates only.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        if self.gregorian {
            NaiveDate::from_ymd_opt(self.year, self.month, self.day)
        } else {
            None
        }
    }

    /// Move by whole days.
    pub fn add_days(&self, days: i64) -> Result<Self, TimeError> {
        let moved = match self.to_naive() {
            Some(naive) => {
                let delta = TimeDelta::try_days(days).ok_or(TimeError::OutOfRange {
                    year: self.year as i64,
                    min: MIN_YEAR,
                    max: MAX_YEAR,
                })?;
                let next = naive
                    .checked_add_signed(delta)
                    .ok_or(TimeError::OutOfRange {
                        year: self.year as i64 + days / 365,
                        min: MIN_YEAR,
                        max: MAX_YEAR,
                    })?;
                Self::from(next)
            }
            None => {
                let jd = self.julian_day(12.0) + days as f64;
                calendar_from_jd(jd, self.gregorian).0
            }
        };
        check_year(moved.year as i64)?;
        Ok(moved)
    }

    /// Move by calendar months, clamping the day to the target month's end.
    pub fn add_months(&self, months: i64) -> Result<Self, TimeError> {
        if let Some(naive) = self.to_naive() {
            let span = Months::new(u32::try_from(months.unsigned_abs()).map_err(|_| {
                TimeError::OutOfRange {
                    year: self.year as i64 + months / 12,
                    min: MIN_YEAR,
                    max: MAX_YEAR,
                }
            })?);
            let next = if months >= 0 {
                naive.checked_add_months(span)
            } else {
                naive.checked_sub_months(span)
            };
            let next = next.ok_or(TimeError::OutOfRange {
                year: self.year as i64 + months / 12,
                min: MIN_YEAR,
                max: MAX_YEAR,
            })?;
            check_year(next.year() as i64)?;
            return Ok(Self::from(next));
        }

        let index = self.year as i64 * 12 + (self.month as i64 - 1) + months;
        let year = check_year(index.div_euclid(12))?;
        let month = index.rem_euclid(12) as u32 + 1;
        let day = self.day.min(days_in_month(year, month, false));
        Ok(Self {
            year,
            month,
            day,
            gregorian: false,
        })
    }

    /// Move by calendar years, clamping Feb 29 to Feb 28 when needed.
    pub fn add_years(&self, years: i64) -> Result<Self, TimeError> {
        self.add_months(years.saturating_mul(12))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(d: NaiveDate) -> Self {
        Self {
            year: d.year(),
            month: d.month(),
            day: d.day(),
            gregorian: true,
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if !self.gregorian {
            f.write_str(" (Julian)")?;
        }
        Ok(())
    }
}

/// Clock time (hours, minutes, seconds) to decimal hours.
pub fn hms_to_decimal_hours(hours: u32, minutes: u32, seconds: f64) -> f64 {
    hours as f64 + minutes as f64 / 60.0 + seconds / 3600.0
}

/// Decimal hours to whole (hours, minutes, seconds), truncating.
pub fn decimal_hours_to_hms(decimal_hours: f64) -> (u32, u32, u32) {
    let total = (decimal_hours.abs() * 3600.0 + 1e-7).floor() as u64;
    ((total / 3600) as u32, ((total / 60) % 60) as u32, (total % 60) as u32)
}

/// A date plus a clock time in decimal hours.
///
/// Whether the clock is local or UT is up to the owner; a chart subject
/// carries the offset separately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Instant {
    pub date: CalendarDate,
    /// Clock time in decimal hours, [0, 24).
    pub hours: f64,
}

impl Instant {
    pub fn new(date: CalendarDate, hours: f64) -> Result<Self, TimeError> {
        if !hours.is_finite() || !(0.0..24.0).contains(&hours) {
            return Err(TimeError::InvalidClock(hours));
        }
        date.validate()?;
        Ok(Self { date, hours })
    }

    /// Julian Day of this instant, taking the clock as UT.
    pub fn julian_day(&self) -> f64 {
        self.date.julian_day(self.hours)
    }

    /// The instant `count` steps after this one.
    ///
    /// Stepping is anchored: `advanced(step, k)` is computed from `self` in
    /// one move, so month-end clamping on one step never carries into the
    /// next.
    pub fn advanced(&self, step: StepGranularity, count: u32) -> Result<Self, TimeError> {
        let k = count as i64;
        match step {
            StepGranularity::Minutes(n) => self.add_hours(n as f64 * k as f64 / 60.0),
            StepGranularity::Hours(n) => self.add_hours(n as f64 * k as f64),
            StepGranularity::Days(n) => Ok(Self {
                date: self.date.add_days(n as i64 * k)?,
                hours: self.hours,
            }),
            StepGranularity::Weeks(n) => Ok(Self {
                date: self.date.add_days(7 * n as i64 * k)?,
                hours: self.hours,
            }),
            StepGranularity::Months(n) => Ok(Self {
                date: self.date.add_months(n as i64 * k)?,
                hours: self.hours,
            }),
            StepGranularity::Years(n) => Ok(Self {
                date: self.date.add_years(n as i64 * k)?,
                hours: self.hours,
            }),
        }
    }

    fn add_hours(&self, delta: f64) -> Result<Self, TimeError> {
        let total = self.hours + delta;
        // round to whole milliseconds
        let total = (total * 3_600_000.0).round() / 3_600_000.0;
        let carry = (total / 24.0).floor();
        let hours = (total - carry * 24.0).clamp(0.0, 24.0);
        let (date, hours) = if hours >= 24.0 {
            (self.date.add_days(carry as i64 + 1)?, 0.0)
        } else {
            (self.date.add_days(carry as i64)?, hours)
        };
        Ok(Self { date, hours })
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = decimal_hours_to_hms(self.hours);
        write!(f, "{} {:02}:{:02}:{:02}", self.date, h, m, s)
    }
}

/// How far a moving subject advances per scan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepGranularity {
    Minutes(u32),
    Hours(u32),
    Days(u32),
    Weeks(u32),
    /// Calendar months, day clamped to the month's end.
    Months(u32),
    /// Calendar years, Feb 29 clamped to Feb 28.
    Years(u32),
}

impl StepGranularity {
    /// Step count; zero-length steps never terminate a scan.
    pub const fn count(self) -> u32 {
        match self {
            Self::Minutes(n)
            | Self::Hours(n)
            | Self::Days(n)
            | Self::Weeks(n)
            | Self::Months(n)
            | Self::Years(n) => n,
        }
    }

    /// Approximate step length in days, for sizing refinement brackets.
    pub fn approx_days(self) -> f64 {
        let n = self.count() as f64;
        match self {
            Self::Minutes(_) => n / 1440.0,
            Self::Hours(_) => n / 24.0,
            Self::Days(_) => n,
            Self::Weeks(_) => 7.0 * n,
            Self::Months(_) => 30.436_875 * n,
            Self::Years(_) => 365.2425 * n,
        }
    }

    pub fn validate(self) -> Result<(), TimeError> {
        if self.count() == 0 {
            return Err(TimeError::InvalidStep("step count must be positive".into()));
        }
        Ok(())
    }
}

impl Default for StepGranularity {
    fn default() -> Self {
        Self::Days(1)
    }
}

impl fmt::Display for StepGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self {
            Self::Minutes(_) => "min",
            Self::Hours(_) => "h",
            Self::Days(_) => "d",
            Self::Weeks(_) => "w",
            Self::Months(_) => "mo",
            Self::Years(_) => "y",
        };
        write!(f, "{}{}", self.count(), unit)
    }
}

impl FromStr for StepGranularity {
    type Err = TimeError;

    /// Parse `"1d"`, `"2w"`, `"1mo"`, `"1y"`, `"6h"`, `"30min"`. A bare unit
    /// means a count of one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, unit) = s.split_at(split);
        let n = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<u32>()
                .map_err(|_| TimeError::InvalidStep(s.clone()))?
        };
        let step = match unit.trim() {
            "min" | "mins" | "minute" | "minutes" => Self::Minutes(n),
            "h" | "hour" | "hours" => Self::Hours(n),
            "d" | "day" | "days" => Self::Days(n),
            "w" | "week" | "weeks" => Self::Weeks(n),
            "mo" | "month" | "months" => Self::Months(n),
            "y" | "year" | "years" => Self::Years(n),
            _ => return Err(TimeError::InvalidStep(s.clone())),
        };
        step.validate()?;
        Ok(step)
    }
}
