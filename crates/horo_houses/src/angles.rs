//! Ascendant and Midheaven from the local sidereal time.
//!
//! With RAMC θ, obliquity ε and latitude φ:
//!
//! - MC  = atan2(sin θ, cos θ · cos ε)
//! - Asc = atan2(cos θ, −(sin θ · cos ε + tan φ · sin ε))
//!
//! Sources: Meeus, *Astronomical Algorithms*, ch. 13; Montenbruck & Pfleger.

use horo_math::normalize_degrees;
use serde::{Deserialize, Serialize};

/// Ecliptic longitude rising on the eastern horizon, degrees [0, 360).
pub fn ascendant_deg(ramc_deg: f64, obliquity_deg: f64, latitude_deg: f64) -> f64 {
    let theta = ramc_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let y = theta.cos();
    let x = -(theta.sin() * eps.cos() + phi.tan() * eps.sin());
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Ecliptic longitude culminating on the meridian, degrees [0, 360).
pub fn midheaven_deg(ramc_deg: f64, obliquity_deg: f64) -> f64 {
    let theta = ramc_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    normalize_degrees(theta.sin().atan2(theta.cos() * eps.cos()).to_degrees())
}

/// The two chart angles, with their opposite points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angles {
    pub ascendant_deg: f64,
    pub midheaven_deg: f64,
}

impl Angles {
    pub fn from_ramc(ramc_deg: f64, obliquity_deg: f64, latitude_deg: f64) -> Self {
        Self {
            ascendant_deg: ascendant_deg(ramc_deg, obliquity_deg, latitude_deg),
            midheaven_deg: midheaven_deg(ramc_deg, obliquity_deg),
        }
    }

    pub fn descendant_deg(&self) -> f64 {
        normalize_degrees(self.ascendant_deg + 180.0)
    }

    pub fn imum_coeli_deg(&self) -> f64 {
        normalize_degrees(self.midheaven_deg + 180.0)
    }
}
