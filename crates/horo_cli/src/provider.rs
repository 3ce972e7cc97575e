//! Ephemeris selection for the binary.
//!
//! `--ephemeris <table.json>` loads a [`TabulatedEphemeris`]. Without it the
//! binary runs on a rough analytic model: mean motions at J2000 plus one
//! synodic epicycle per planet. It is good for trying the commands out and
//! for seeing retrograde loops, not for real positions.

use std::path::Path;

use anyhow::{Context, Result};
use horo_core::{
    Body, BodyMotion, EclipticPosition, EphemerisError, EphemerisProvider, SyntheticEphemeris,
    TabulatedEphemeris,
};

/// Either a loaded table or the demo model.
#[derive(Debug, Clone)]
pub enum Provider {
    Table(TabulatedEphemeris),
    Demo(SyntheticEphemeris),
}

impl Provider {
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let table = TabulatedEphemeris::load(p)
                    .with_context(|| format!("failed to load ephemeris {}", p.display()))?;
                Ok(Self::Table(table))
            }
            None => {
                log::info!("no --ephemeris given; using the built-in demo model");
                Ok(Self::Demo(demo_model()))
            }
        }
    }

    fn inner(&self) -> &dyn EphemerisProvider {
        match self {
            Self::Table(t) => t,
            Self::Demo(d) => d,
        }
    }
}

impl EphemerisProvider for Provider {
    fn body_position(&self, body: Body, jd_ut: f64) -> Result<EclipticPosition, EphemerisError> {
        self.inner().body_position(body, jd_ut)
    }

    fn obliquity_deg(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.inner().obliquity_deg(jd_ut)
    }

    fn sidereal_time_deg(&self, jd_ut: f64, longitude_deg: f64) -> Result<f64, EphemerisError> {
        self.inner().sidereal_time_deg(jd_ut, longitude_deg)
    }

    fn delta_t_days(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.inner().delta_t_days(jd_ut)
    }
}

/// Mean longitude and speed at J2000, plus (amplitude, synodic period)
/// for the planets.
fn demo_model() -> SyntheticEphemeris {
    let planets = [
        (Body::Mercury, 280.46, 0.985_647, 28.0, 115.88),
        (Body::Venus, 280.46, 0.985_647, 100.0, 583.92),
        (Body::Mars, 355.45, 0.524_039, 70.0, 779.94),
        (Body::Jupiter, 34.40, 0.083_091, 11.0, 398.88),
        (Body::Saturn, 50.08, 0.033_460, 6.0, 378.09),
        (Body::Uranus, 314.06, 0.011_733, 3.0, 369.66),
        (Body::Neptune, 304.35, 0.005_981, 1.8, 367.49),
        (Body::Pluto, 238.93, 0.003_968, 1.5, 366.73),
    ];
    let mut eph = SyntheticEphemeris::new()
        .with_body(Body::Sun, BodyMotion::linear(280.46, 0.985_647))
        .with_body(Body::Moon, BodyMotion::linear(218.32, 13.176_396))
        .with_body(Body::TrueNode, BodyMotion::linear(125.04, -0.052_954))
        .with_body(Body::Lilith, BodyMotion::linear(263.35, 0.111_404));
    for (body, lon, speed, amplitude, period) in planets {
        eph = eph.with_body(body, BodyMotion::epicyclic(lon, speed, amplitude, period, 0.0));
    }
    eph
}
