//! Greenwich and local mean sidereal time, and mean obliquity of the ecliptic.
//!
//! These are the reference time quantities used by bundled ephemeris
//! providers. Chart computation never calls them directly; it asks its
//! provider.
//!
//! Sources:
//! - GMST: IAU 1982 expression as given by Meeus, *Astronomical Algorithms*, eq. 12.4.
//! - Obliquity: IAU 1976 (Lieske), Meeus eq. 22.2.

use horo_math::normalize_degrees;

use crate::julian::J2000_JD;

const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Greenwich mean sidereal time in degrees [0, 360) at a UT Julian Day.
pub fn gmst_deg(jd_ut: f64) -> f64 {
    let d = jd_ut - J2000_JD;
    let t = d / DAYS_PER_CENTURY;
    let theta = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(theta)
}

/// Local mean sidereal time in degrees for an east-positive longitude.
///
/// This is the right ascension of the local meridian (RAMC).
pub fn local_sidereal_time_deg(jd_ut: f64, longitude_east_deg: f64) -> f64 {
    normalize_degrees(gmst_deg(jd_ut) + longitude_east_deg)
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity_deg(jd: f64) -> f64 {
    let t = (jd - J2000_JD) / DAYS_PER_CENTURY;
    let arcsec = 21.448 - 46.8150 * t - 0.000_59 * t * t + 0.001_813 * t * t * t;
    23.0 + 26.0 / 60.0 + arcsec / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gmst_meeus_example() {
        // Meeus example 12.a: 1987 April 10, 0h UT -> 13h10m46.3668s
        let gmst = gmst_deg(2_446_895.5);
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * 15.0;
        assert!(
            (gmst - expected).abs() < 1e-4,
            "GMST = {gmst}°, expected {expected}°"
        );
    }

    #[test]
    fn gmst_j2000_midnight() {
        // 2000-Jan-01 0h UT: 6h39m52.27s ≈ 99.968°
        let gmst = gmst_deg(2_451_544.5);
        assert!((gmst - 99.968).abs() < 0.01, "GMST = {gmst}°");
    }

    #[test]
    fn lst_adds_east_longitude() {
        let jd = 2_451_544.5;
        let lst = local_sidereal_time_deg(jd, -75.0);
        assert!((lst - normalize_degrees(gmst_deg(jd) - 75.0)).abs() < 1e-12);
    }

    #[test]
    fn obliquity_j2000() {
        let eps = mean_obliquity_deg(J2000_JD);
        assert!((eps - 23.439_291).abs() < 1e-6, "ε = {eps}");
    }

    #[test]
    fn obliquity_decreases() {
        assert!(mean_obliquity_deg(J2000_JD + 36_525.0) < mean_obliquity_deg(J2000_JD));
    }
}
