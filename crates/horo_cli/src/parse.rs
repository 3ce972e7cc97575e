//! Argument parsing for dates, clock times and angles.

use anyhow::{Context, Result, bail};
use chrono::{NaiveTime, Timelike};
use horo_time::{CalendarDate, hms_to_decimal_hours};

/// `YYYY-MM-DD`, with an optional leading `-` for astronomical years
/// before 1. `julian` reads the date in the Julian calendar.
pub fn parse_date(s: &str, julian: bool) -> Result<CalendarDate> {
    let trimmed = s.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let parts: Vec<&str> = body.split('-').collect();
    if parts.len() != 3 {
        bail!("expected YYYY-MM-DD, got {s}");
    }
    let year: i32 = parts[0].parse().with_context(|| format!("bad year in {s}"))?;
    let month: u32 = parts[1].parse().with_context(|| format!("bad month in {s}"))?;
    let day: u32 = parts[2].parse().with_context(|| format!("bad day in {s}"))?;
    let year = if negative { -year } else { year };
    Ok(CalendarDate::new(year, month, day, !julian)?)
}

/// `HH:MM` or `HH:MM:SS` to decimal hours.
pub fn parse_clock(s: &str) -> Result<f64> {
    let t = NaiveTime::parse_from_str(s.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s.trim(), "%H:%M"))
        .with_context(|| format!("expected HH:MM or HH:MM:SS, got {s}"))?;
    Ok(hms_to_decimal_hours(t.hour(), t.minute(), t.second() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gregorian_and_julian_dates() {
        let d = parse_date("1990-06-15", false).expect("valid");
        assert_eq!((d.year, d.month, d.day, d.gregorian), (1990, 6, 15, true));
        let d = parse_date("1500-02-29", true).expect("Julian leap day");
        assert!(!d.gregorian);
        assert!(parse_date("1500-02-29", false).is_err());
    }

    #[test]
    fn negative_years() {
        let d = parse_date("-0500-03-01", true).expect("valid");
        assert_eq!(d.year, -500);
    }

    #[test]
    fn malformed_dates() {
        assert!(parse_date("1990/06/15", false).is_err());
        assert!(parse_date("1990-13-01", false).is_err());
        assert!(parse_date("9999-01-01", false).is_err());
    }

    #[test]
    fn clock_forms() {
        assert_eq!(parse_clock("12:00").expect("valid"), 12.0);
        assert!((parse_clock("14:30:36").expect("valid") - 14.51).abs() < 1e-12);
        assert!(parse_clock("25:00").is_err());
        assert!(parse_clock("noon").is_err());
    }
}
