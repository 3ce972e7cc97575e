//! Julian Day conversions.
//!
//! The forward conversion uses the classic `floor(365.25·y) + floor(30.6·m)`
//! construction with the Gregorian century correction applied when the
//! caller selects the Gregorian calendar. The inverse follows Meeus,
//! *Astronomical Algorithms*, ch. 7, with the same calendar switch.

use crate::calendar::CalendarDate;

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Day for a calendar date and a clock time in decimal hours.
///
/// `gregorian` selects the Gregorian calendar; otherwise the date is read as
/// Julian calendar. `decimal_hour` may lie outside 0..24; the excess moves
/// the result by whole days.
pub fn julian_day(day: u32, month: u32, year: i32, decimal_hour: f64, gregorian: bool) -> f64 {
    let y = (if month < 3 { year - 1 } else { year }) as f64;
    let m = (if month < 3 { month + 13 } else { month + 1 }) as f64;

    let mut jd = ((y + 4712.0) * 365.25).floor() + (30.6 * m + 0.000_001).floor() + day as f64
        + decimal_hour / 24.0
        - 63.5;

    if gregorian {
        let centuries = (y.abs() / 100.0).floor() - (y.abs() / 400.0).floor();
        let correction = if y < 0.0 { -centuries } else { centuries };
        jd = jd - correction + 2.0;
        // negative century years that are not multiples of 400 lose one more day
        if y < 0.0 && (y / 100.0).fract() == 0.0 && (y / 400.0).fract() != 0.0 {
            jd -= 1.0;
        }
    }
    jd
}

/// Calendar date and decimal hours for a Julian Day.
///
/// Valid for Julian Days at or after the start of year -4712.
pub fn calendar_from_jd(jd: f64, gregorian: bool) -> (CalendarDate, f64) {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let a = if gregorian {
        let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
        z + 1.0 + alpha - (alpha / 4.0).floor()
    } else {
        z
    };
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = (if e < 14.0 { e - 1.0 } else { e - 13.0 }) as u32;
    let year = (if month > 2 { c - 4716.0 } else { c - 4715.0 }) as i32;

    let hours = (f * 24.0).clamp(0.0, 24.0);
    (
        CalendarDate {
            year,
            month,
            day,
            gregorian,
        },
        hours,
    )
}
