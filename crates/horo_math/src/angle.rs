//! Modular angle reduction and coordinate conversions.
//!
//! Naive subtraction of two longitudes breaks at the 0/360 seam, so every
//! difference in the workspace goes through [`minimal_angular_distance`] or
//! [`arc_forward`].

use std::f64::consts::{PI, TAU};

/// Reduce an angle to [0, 360) degrees.
///
/// Correct for arbitrarily large positive or negative input. Tiny negative
/// inputs whose reduction rounds up to 360.0 are folded back to 0.0.
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r }
}

/// Reduce an angle to [0, 2π) radians.
pub fn normalize_radians(rad: f64) -> f64 {
    let r = rad.rem_euclid(TAU);
    if r >= TAU { 0.0 } else { r }
}

/// Reduce an angle to (-180, 180] degrees.
pub fn normalize_pm180(deg: f64) -> f64 {
    let r = normalize_degrees(deg);
    if r > 180.0 { r - 360.0 } else { r }
}

/// Signed shortest angular path from `from` to `to`, in [-180, 180].
///
/// `minimal_angular_distance(350.0, 10.0) == 20.0` and the reverse is -20.
/// An exact opposition is reported as +180.
pub fn minimal_angular_distance(from: f64, to: f64) -> f64 {
    normalize_pm180(to - from)
}

/// Forward (counter-clockwise) arc from `from` to `to`, in [0, 360).
pub fn arc_forward(from: f64, to: f64) -> f64 {
    normalize_degrees(to - from)
}

/// Angle of the vector (x, y) in [0, 2π).
///
/// The zero vector maps to 0.
pub fn angle_of(x: f64, y: f64) -> f64 {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    normalize_radians(y.atan2(x))
}

/// Polar (radius, angle in radians) to rectangular (x, y).
pub fn polar_to_rect(r: f64, theta: f64) -> (f64, f64) {
    (r * theta.cos(), r * theta.sin())
}

/// Rectangular (x, y) to polar (radius, angle in [0, 2π)).
pub fn rect_to_polar(x: f64, y: f64) -> (f64, f64) {
    (x.hypot(y), angle_of(x, y))
}

/// Rectangular (x, y, z) to spherical (radius, longitude in [0, 2π), latitude in [-π/2, π/2]).
pub fn rect_to_spherical(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let rho = x.hypot(y);
    let r = rho.hypot(z);
    if r == 0.0 {
        return (0.0, 0.0, 0.0);
    }
    let lat = (z / r).clamp(-1.0, 1.0).asin();
    (r, angle_of(x, y), lat.clamp(-PI / 2.0, PI / 2.0))
}
