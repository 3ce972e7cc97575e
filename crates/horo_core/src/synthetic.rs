//! Analytic ephemeris with closed-form body motion.
//!
//! Every body moves by a formula whose exact crossings can be solved by
//! hand, which makes this provider the fixture for search tests and the
//! workload for benchmarks. Time quantities come from the reference
//! formulas in `horo_time`.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use horo_math::normalize_degrees;
use horo_time::{J2000_JD, delta_t_days, local_sidereal_time_deg, mean_obliquity_deg};
use serde::{Deserialize, Serialize};

use crate::{Body, EclipticPosition, EphemerisError, EphemerisProvider};

/// Closed-form longitude model, measured from [`SyntheticEphemeris::EPOCH_JD`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BodyMotion {
    /// Uniform motion.
    Linear {
        longitude_deg: f64,
        speed_deg_per_day: f64,
    },
    /// Uniform motion plus one sinusoidal term:
    /// `λ(t) = λ0 + v·t + A·sin(2π·t/P + φ)`.
    ///
    /// Retrograde phases appear when `A·2π/P > v`.
    Epicyclic {
        mean_longitude_deg: f64,
        mean_speed_deg_per_day: f64,
        amplitude_deg: f64,
        period_days: f64,
        phase_deg: f64,
    },
}

impl BodyMotion {
    pub const fn linear(longitude_deg: f64, speed_deg_per_day: f64) -> Self {
        Self::Linear {
            longitude_deg,
            speed_deg_per_day,
        }
    }

    pub const fn epicyclic(
        mean_longitude_deg: f64,
        mean_speed_deg_per_day: f64,
        amplitude_deg: f64,
        period_days: f64,
        phase_deg: f64,
    ) -> Self {
        Self::Epicyclic {
            mean_longitude_deg,
            mean_speed_deg_per_day,
            amplitude_deg,
            period_days,
            phase_deg,
        }
    }

    /// Unwrapped longitude `days` after the epoch.
    pub fn unwrapped_longitude(&self, days: f64) -> f64 {
        match *self {
            Self::Linear {
                longitude_deg,
                speed_deg_per_day,
            } => longitude_deg + speed_deg_per_day * days,
            Self::Epicyclic {
                mean_longitude_deg,
                mean_speed_deg_per_day,
                amplitude_deg,
                period_days,
                phase_deg,
            } => {
                let arg = TAU * days / period_days + phase_deg.to_radians();
                mean_longitude_deg + mean_speed_deg_per_day * days + amplitude_deg * arg.sin()
            }
        }
    }

    /// Longitude speed `days` after the epoch, degrees per day.
    pub fn speed(&self, days: f64) -> f64 {
        match *self {
            Self::Linear {
                speed_deg_per_day, ..
            } => speed_deg_per_day,
            Self::Epicyclic {
                mean_speed_deg_per_day,
                amplitude_deg,
                period_days,
                phase_deg,
                ..
            } => {
                let arg = TAU * days / period_days + phase_deg.to_radians();
                mean_speed_deg_per_day + amplitude_deg * TAU / period_days * arg.cos()
            }
        }
    }
}

/// Provider serving [`BodyMotion`] models.
#[derive(Debug, Clone, Default)]
pub struct SyntheticEphemeris {
    bodies: BTreeMap<Body, BodyMotion>,
    range: Option<(f64, f64)>,
    obliquity_deg: Option<f64>,
}

impl SyntheticEphemeris {
    /// Reference epoch of every motion model.
    pub const EPOCH_JD: f64 = J2000_JD;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: Body, motion: BodyMotion) -> Self {
        self.bodies.insert(body, motion);
        self
    }

    /// Restrict coverage; calls outside `[start_jd, end_jd]` fail with
    /// [`EphemerisError::UnsupportedDate`].
    pub fn with_range(mut self, start_jd: f64, end_jd: f64) -> Self {
        self.range = Some((start_jd, end_jd));
        self
    }

    /// Fixed obliquity instead of the IAU 1976 mean value.
    pub fn with_obliquity(mut self, obliquity_deg: f64) -> Self {
        self.obliquity_deg = Some(obliquity_deg);
        self
    }

    pub fn motion(&self, body: Body) -> Option<&BodyMotion> {
        self.bodies.get(&body)
    }

    fn check_range(&self, jd: f64) -> Result<(), EphemerisError> {
        match self.range {
            Some((start, end)) if jd < start || jd > end => {
                Err(EphemerisError::UnsupportedDate { jd })
            }
            _ => Ok(()),
        }
    }
}

impl EphemerisProvider for SyntheticEphemeris {
    fn body_position(&self, body: Body, jd_ut: f64) -> Result<EclipticPosition, EphemerisError> {
        self.check_range(jd_ut)?;
        let motion = self
            .bodies
            .get(&body)
            .ok_or(EphemerisError::UnsupportedBody(body))?;
        let days = jd_ut - Self::EPOCH_JD;
        Ok(EclipticPosition {
            longitude_deg: normalize_degrees(motion.unwrapped_longitude(days)),
            latitude_deg: 0.0,
            distance_au: 1.0,
            speed_deg_per_day: motion.speed(days),
        })
    }

    fn obliquity_deg(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.check_range(jd_ut)?;
        Ok(self.obliquity_deg.unwrap_or_else(|| mean_obliquity_deg(jd_ut)))
    }

    fn sidereal_time_deg(&self, jd_ut: f64, longitude_deg: f64) -> Result<f64, EphemerisError> {
        self.check_range(jd_ut)?;
        Ok(local_sidereal_time_deg(jd_ut, longitude_deg))
    }

    fn delta_t_days(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.check_range(jd_ut)?;
        Ok(delta_t_days(jd_ut))
    }
}
