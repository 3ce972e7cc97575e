//! Ephemeris served from regularly spaced samples.
//!
//! The table is a JSON document:
//!
//! ```json
//! {
//!   "start_jd": 2451545.0,
//!   "step_days": 1.0,
//!   "bodies": {
//!     "Sun": [ { "lon": 280.37, "lat": 0.0, "dist": 0.983, "speed": 1.019 }, ... ],
//!     "Moon": [ ... ]
//!   }
//! }
//! ```
//!
//! Between samples, longitude is interpolated along the shorter arc so the
//! 360°→0° seam never produces a half-circle jump; latitude, distance and
//! speed are interpolated linearly. Time quantities use the reference
//! formulas in `horo_time` and share the table's date coverage.

use std::collections::BTreeMap;
use std::path::Path;

use horo_math::{minimal_angular_distance, normalize_degrees};
use horo_time::{delta_t_days, local_sidereal_time_deg, mean_obliquity_deg};
use serde::{Deserialize, Serialize};

use crate::{Body, EclipticPosition, EphemerisError, EphemerisProvider};

/// One tabulated position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSample {
    #[serde(rename = "lon")]
    pub longitude_deg: f64,
    #[serde(rename = "lat", default)]
    pub latitude_deg: f64,
    #[serde(rename = "dist", default)]
    pub distance_au: f64,
    #[serde(rename = "speed")]
    pub speed_deg_per_day: f64,
}

impl From<EclipticPosition> for EphemerisSample {
    fn from(p: EclipticPosition) -> Self {
        Self {
            longitude_deg: p.longitude_deg,
            latitude_deg: p.latitude_deg,
            distance_au: p.distance_au,
            speed_deg_per_day: p.speed_deg_per_day,
        }
    }
}

/// Provider interpolating a [`EphemerisSample`] table.
///
/// Deserializing goes through [`TabulatedEphemeris::new`], so a parsed
/// table is always validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct TabulatedEphemeris {
    start_jd: f64,
    step_days: f64,
    bodies: BTreeMap<Body, Vec<EphemerisSample>>,
}

#[derive(Deserialize)]
struct RawTable {
    start_jd: f64,
    step_days: f64,
    bodies: BTreeMap<Body, Vec<EphemerisSample>>,
}

impl TryFrom<RawTable> for TabulatedEphemeris {
    type Error = EphemerisError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Self::new(raw.start_jd, raw.step_days, raw.bodies)
    }
}

impl TabulatedEphemeris {
    pub fn new(
        start_jd: f64,
        step_days: f64,
        bodies: BTreeMap<Body, Vec<EphemerisSample>>,
    ) -> Result<Self, EphemerisError> {
        let table = Self {
            start_jd,
            step_days,
            bodies,
        };
        table.validate()?;
        Ok(table)
    }

    /// Parse a JSON table.
    pub fn from_json_str(json: &str) -> Result<Self, EphemerisError> {
        let table: Self = serde_json::from_str(json)?;
        log::debug!(
            "loaded ephemeris table: {} bodies, JD {}..{}",
            table.bodies.len(),
            table.start_jd,
            table.end_jd()
        );
        Ok(table)
    }

    /// Load a JSON table from disk.
    pub fn load(path: &Path) -> Result<Self, EphemerisError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, EphemerisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a table by sampling another provider `count` times.
    pub fn sample_from<P: EphemerisProvider + ?Sized>(
        provider: &P,
        bodies: &[Body],
        start_jd: f64,
        step_days: f64,
        count: usize,
    ) -> Result<Self, EphemerisError> {
        let mut table = BTreeMap::new();
        for &body in bodies {
            let samples = (0..count)
                .map(|i| {
                    provider
                        .body_position(body, start_jd + i as f64 * step_days)
                        .map(EphemerisSample::from)
                })
                .collect::<Result<Vec<_>, _>>()?;
            table.insert(body, samples);
        }
        Self::new(start_jd, step_days, table)
    }

    fn validate(&self) -> Result<(), EphemerisError> {
        if !self.start_jd.is_finite() {
            return Err(EphemerisError::Data("start_jd must be finite".into()));
        }
        if !(self.step_days.is_finite() && self.step_days > 0.0) {
            return Err(EphemerisError::Data("step_days must be positive".into()));
        }
        for (body, samples) in &self.bodies {
            if samples.len() < 2 {
                return Err(EphemerisError::Data(format!(
                    "{body} needs at least two samples"
                )));
            }
        }
        Ok(())
    }

    pub fn start_jd(&self) -> f64 {
        self.start_jd
    }

    /// Last Julian Day covered by the longest series.
    pub fn end_jd(&self) -> f64 {
        let len = self.bodies.values().map(Vec::len).max().unwrap_or(1);
        self.start_jd + (len.saturating_sub(1)) as f64 * self.step_days
    }

    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.bodies.keys().copied()
    }

    fn check_coverage(&self, jd: f64) -> Result<(), EphemerisError> {
        if jd >= self.start_jd && jd <= self.end_jd() {
            Ok(())
        } else {
            Err(EphemerisError::UnsupportedDate { jd })
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

impl EphemerisProvider for TabulatedEphemeris {
    fn body_position(&self, body: Body, jd_ut: f64) -> Result<EclipticPosition, EphemerisError> {
        let samples = self
            .bodies
            .get(&body)
            .ok_or(EphemerisError::UnsupportedBody(body))?;
        let Some(penultimate) = samples.len().checked_sub(2) else {
            return Err(EphemerisError::Data(format!(
                "{body} needs at least two samples"
            )));
        };
        let pos = (jd_ut - self.start_jd) / self.step_days;
        if !(0.0..=(penultimate + 1) as f64).contains(&pos) {
            return Err(EphemerisError::UnsupportedDate { jd: jd_ut });
        }
        let i = (pos.floor() as usize).min(penultimate);
        let t = pos - i as f64;
        let (a, b) = (&samples[i], &samples[i + 1]);

        let dlon = minimal_angular_distance(a.longitude_deg, b.longitude_deg);
        Ok(EclipticPosition {
            longitude_deg: normalize_degrees(a.longitude_deg + dlon * t),
            latitude_deg: lerp(a.latitude_deg, b.latitude_deg, t),
            distance_au: lerp(a.distance_au, b.distance_au, t),
            speed_deg_per_day: lerp(a.speed_deg_per_day, b.speed_deg_per_day, t),
        })
    }

    fn obliquity_deg(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.check_coverage(jd_ut)?;
        Ok(mean_obliquity_deg(jd_ut))
    }

    fn sidereal_time_deg(&self, jd_ut: f64, longitude_deg: f64) -> Result<f64, EphemerisError> {
        self.check_coverage(jd_ut)?;
        Ok(local_sidereal_time_deg(jd_ut, longitude_deg))
    }

    fn delta_t_days(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.check_coverage(jd_ut)?;
        Ok(delta_t_days(jd_ut))
    }
}
