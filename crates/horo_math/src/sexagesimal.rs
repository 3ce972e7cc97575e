//! Degrees-minutes-seconds conversions.
//!
//! Two notations are in use:
//! - true decimal degrees, where `12.5` means 12°30'
//! - `GG.MMSS` decimal format, where `12.30` means 12°30' and `15.3045`
//!   means 15°30'45"
//!
//! All component splits truncate; seconds are whole numbers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::angle::normalize_degrees;
use crate::zodiac::Sign;

/// Slack added before truncating, so values like 15.3045 that are stored as
/// 15.30449999... still split into (15, 30, 45).
const TRUNCATION_EPS: f64 = 1e-7;

/// Non-negative degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sexagesimal {
    /// Whole degrees.
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds (0..59).
    pub seconds: u8,
}

impl Sexagesimal {
    pub const ZERO: Self = Self {
        degrees: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Split true decimal degrees. The sign of the input is dropped.
    pub fn from_degrees(deg: f64) -> Self {
        let total = (deg.abs() * 3600.0 + TRUNCATION_EPS).floor() as u64;
        Self::from_total_seconds(total)
    }

    fn from_total_seconds(total: u64) -> Self {
        Self {
            degrees: (total / 3600).min(u16::MAX as u64) as u16,
            minutes: ((total / 60) % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    /// Back to true decimal degrees.
    pub fn to_degrees(self) -> f64 {
        self.degrees as f64 + self.minutes as f64 / 60.0 + self.seconds as f64 / 3600.0
    }
}

impl fmt::Display for Sexagesimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}°{:02}'{:02}\"",
            self.degrees, self.minutes, self.seconds
        )
    }
}

/// Split a `GG.MMSS` value into its components.
///
/// The integer part gives degrees, the next two decimals minutes and the two
/// after that seconds. Minute or second digits of 60 and above carry over.
pub fn degrees_to_sexagesimal(decimal_format: f64) -> Sexagesimal {
    let scaled = (decimal_format.abs() * 10_000.0 + TRUNCATION_EPS * 10_000.0).floor() as u64;
    let degrees = scaled / 10_000;
    let minutes = (scaled / 100) % 100;
    let seconds = scaled % 100;
    Sexagesimal::from_total_seconds(degrees * 3600 + minutes * 60 + seconds)
}

/// `GG.MMSS` notation to true decimal degrees, keeping the sign.
///
/// Digits beyond the fourth decimal are kept as fractional seconds.
pub fn decimal_format_to_degrees(decimal_format: f64) -> f64 {
    let a = decimal_format.abs();
    let degrees = a.trunc();
    let rest = (a - degrees) * 100.0;
    let minutes = (rest + TRUNCATION_EPS).trunc();
    let seconds = ((rest - minutes) * 100.0).max(0.0);
    (degrees + minutes / 60.0 + seconds / 3600.0).copysign(decimal_format)
}

/// True decimal degrees to `GG.MMSS` notation, keeping the sign.
pub fn degrees_to_decimal_format(deg: f64) -> f64 {
    let a = deg.abs();
    let degrees = a.trunc();
    let rest = (a - degrees) * 60.0;
    let minutes = (rest + TRUNCATION_EPS).trunc();
    let seconds = ((rest - minutes) * 60.0).max(0.0);
    (degrees + minutes / 100.0 + seconds / 10_000.0).copysign(deg)
}

/// A longitude rendered relative to its zodiac sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: Sign,
    /// Position within the sign, degrees in 0..29.
    pub dms: Sexagesimal,
}

impl SignPosition {
    pub fn from_longitude(longitude_deg: f64) -> Self {
        let lon = normalize_degrees(longitude_deg);
        let sign = Sign::from_longitude(lon);
        let within = (lon - sign.start_longitude()).max(0.0);
        let mut dms = Sexagesimal::from_degrees(within);
        // 29°59'59.9999" can truncate up to 30°00'00" after the epsilon
        if dms.degrees >= 30 {
            dms = Sexagesimal {
                degrees: 29,
                minutes: 59,
                seconds: 59,
            };
        }
        Self { sign, dms }
    }
}

impl fmt::Display for SignPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02} {} {:02}'{:02}\"",
            self.dms.degrees,
            self.sign.abbreviation(),
            self.dms.minutes,
            self.dms.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_format_split() {
        let s = degrees_to_sexagesimal(15.3045);
        assert_eq!((s.degrees, s.minutes, s.seconds), (15, 30, 45));
    }

    #[test]
    fn zero_split() {
        assert_eq!(degrees_to_sexagesimal(0.0), Sexagesimal::ZERO);
        assert_eq!(Sexagesimal::from_degrees(0.0), Sexagesimal::ZERO);
    }

    #[test]
    fn decimal_format_carries_overflowing_minutes() {
        let s = degrees_to_sexagesimal(10.75);
        assert_eq!((s.degrees, s.minutes, s.seconds), (11, 15, 0));
    }

    #[test]
    fn true_degrees_split_truncates() {
        let s = Sexagesimal::from_degrees(12.5);
        assert_eq!((s.degrees, s.minutes, s.seconds), (12, 30, 0));
        let s = Sexagesimal::from_degrees(-0.999_999);
        assert_eq!((s.degrees, s.minutes, s.seconds), (0, 59, 59));
    }

    #[test]
    fn decimal_format_round_trip_values() {
        assert!((decimal_format_to_degrees(12.30) - 12.5).abs() < 1e-9);
        assert!((decimal_format_to_degrees(-12.30) + 12.5).abs() < 1e-9);
        assert!((degrees_to_decimal_format(12.5) - 12.30).abs() < 1e-9);
        assert!((degrees_to_decimal_format(15.5125) - 15.3045).abs() < 1e-9);
    }

    #[test]
    fn sign_position_display() {
        let p = SignPosition::from_longitude(45.5125);
        assert_eq!(p.sign, Sign::Taurus);
        assert_eq!(p.to_string(), "15 Tau 30'45\"");
    }

    #[test]
    fn sign_position_wraps() {
        let p = SignPosition::from_longitude(-0.5);
        assert_eq!(p.sign, Sign::Pisces);
        assert_eq!(p.dms.degrees, 29);
        assert_eq!(p.dms.minutes, 30);
    }

    #[test]
    fn display_pads_components() {
        let s = Sexagesimal::from_degrees(5.0 + 7.0 / 60.0 + 9.0 / 3600.0);
        assert_eq!(s.to_string(), "05°07'09\"");
    }
}
