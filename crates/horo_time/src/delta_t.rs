//! Delta-T (TT − UT) approximation.
//!
//! Piecewise polynomials of Espenak & Meeus (NASA Five Millennium Canon of
//! Solar Eclipses, 2006), valid for the years -500 through 2150. Outside
//! that range the value at the nearest boundary is returned instead of
//! extrapolating the long-term parabola.

use crate::julian::J2000_JD;

/// First year covered by the polynomials.
pub const DELTA_T_FIRST_YEAR: f64 = -500.0;
/// Last year covered by the polynomials.
pub const DELTA_T_LAST_YEAR: f64 = 2150.0;

const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// TT − UT in seconds for a Julian Day.
pub fn delta_t_seconds(jd: f64) -> f64 {
    let year = 2000.0 + (jd - J2000_JD) / DAYS_PER_JULIAN_YEAR;
    delta_t_for_year(year.clamp(DELTA_T_FIRST_YEAR, DELTA_T_LAST_YEAR))
}

/// TT − UT in days for a Julian Day.
pub fn delta_t_days(jd: f64) -> f64 {
    delta_t_seconds(jd) / SECONDS_PER_DAY
}

/// Evaluate `c[0] + c[1]·t + c[2]·t² + ...` by Horner's rule.
fn poly(t: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * t + c)
}

fn delta_t_for_year(y: f64) -> f64 {
    if y < 500.0 {
        let u = y / 100.0;
        poly(
            u,
            &[
                10583.6,
                -1014.41,
                33.78311,
                -5.952053,
                -0.1798452,
                0.022174192,
                0.0090316521,
            ],
        )
    } else if y < 1600.0 {
        let u = (y - 1000.0) / 100.0;
        poly(
            u,
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
        )
    } else if y < 1700.0 {
        let t = y - 1600.0;
        poly(t, &[120.0, -0.9808, -0.01532, 1.0 / 7129.0])
    } else if y < 1800.0 {
        let t = y - 1700.0;
        poly(t, &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0])
    } else if y < 1860.0 {
        let t = y - 1800.0;
        poly(
            t,
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
        )
    } else if y < 1900.0 {
        let t = y - 1860.0;
        poly(
            t,
            &[
                7.62,
                0.5737,
                -0.251754,
                0.01680668,
                -0.0004473624,
                1.0 / 233_174.0,
            ],
        )
    } else if y < 1920.0 {
        let t = y - 1900.0;
        poly(t, &[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197])
    } else if y < 1941.0 {
        let t = y - 1920.0;
        poly(t, &[21.20, 0.84493, -0.076100, 0.0020936])
    } else if y < 1961.0 {
        let t = y - 1950.0;
        poly(t, &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0])
    } else if y < 1986.0 {
        let t = y - 1975.0;
        poly(t, &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0])
    } else if y < 2005.0 {
        let t = y - 2000.0;
        poly(
            t,
            &[
                63.86,
                0.3345,
                -0.060374,
                0.0017275,
                0.000651814,
                0.00002373599,
            ],
        )
    } else if y < 2050.0 {
        let t = y - 2000.0;
        poly(t, &[62.92, 0.32217, 0.005589])
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jd_of_year(year: f64) -> f64 {
        J2000_JD + (year - 2000.0) * DAYS_PER_JULIAN_YEAR
    }

    #[test]
    fn j2000_value() {
        let dt = delta_t_seconds(J2000_JD);
        assert!((dt - 63.86).abs() < 0.01, "ΔT(2000) = {dt}");
    }

    #[test]
    fn historical_values() {
        // Espenak & Meeus table: 1900 ≈ -2.8 s, 1950 ≈ 29.1 s, 1700 ≈ 8.8 s
        assert!((delta_t_seconds(jd_of_year(1900.0)) + 2.79).abs() < 0.1);
        assert!((delta_t_seconds(jd_of_year(1950.0)) - 29.07).abs() < 0.1);
        assert!((delta_t_seconds(jd_of_year(1700.0)) - 8.83).abs() < 0.1);
        assert!((delta_t_seconds(jd_of_year(1000.0)) - 1574.2).abs() < 0.5);
    }

    #[test]
    fn segments_join_without_large_jumps() {
        let boundaries = [
            500.0, 1600.0, 1700.0, 1800.0, 1860.0, 1900.0, 1920.0, 1941.0, 1961.0, 1986.0, 2005.0,
            2050.0,
        ];
        for boundary in boundaries {
            let before = delta_t_seconds(jd_of_year(boundary - 1e-6));
            let after = delta_t_seconds(jd_of_year(boundary + 1e-6));
            assert!(
                (before - after).abs() < 2.0,
                "jump at {boundary}: {before} vs {after}"
            );
        }
    }

    #[test]
    fn clamps_before_first_year() {
        let edge = delta_t_seconds(jd_of_year(DELTA_T_FIRST_YEAR));
        assert_eq!(delta_t_seconds(jd_of_year(-1500.0)), edge);
        assert_eq!(delta_t_seconds(jd_of_year(-3000.0)), edge);
    }

    #[test]
    fn clamps_after_last_year() {
        let edge = delta_t_seconds(jd_of_year(DELTA_T_LAST_YEAR));
        assert_eq!(delta_t_seconds(jd_of_year(2500.0)), edge);
        assert!((edge - 328.48).abs() < 0.01, "ΔT(2150) = {edge}");
    }

    #[test]
    fn days_matches_seconds() {
        let jd = jd_of_year(2024.0);
        assert!((delta_t_days(jd) * 86_400.0 - delta_t_seconds(jd)).abs() < 1e-9);
    }
}
