//! Chart output types and chart configuration.

use horo_core::{ALL_BODIES, Body, CLASSICAL_BODIES, EclipticPosition};
use horo_houses::{HouseCusps, HouseStatus};
use horo_math::{Sign, normalize_degrees};
use serde::{Deserialize, Serialize};

use crate::aspects::AspectTable;
use crate::orbs::OrbConfig;
use crate::placement::{QualityTally, house_of};
use crate::subject::Subject;

/// State of one body in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub body: Body,
    /// `false` when the ephemeris lookup failed; all numeric fields are then 0.
    pub available: bool,
    /// Ecliptic longitude in [0, 360).
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub distance_au: f64,
    pub speed_deg_per_day: f64,
    /// Speed < 0, as supplied by the provider.
    pub retrograde: bool,
    pub sign: Sign,
    /// 0-based house index.
    pub house: u8,
}

impl BodyState {
    pub fn from_position(body: Body, pos: &EclipticPosition, cusps: &[f64; 12]) -> Self {
        let longitude_deg = normalize_degrees(pos.longitude_deg);
        Self {
            body,
            available: true,
            longitude_deg,
            latitude_deg: pos.latitude_deg,
            distance_au: pos.distance_au,
            speed_deg_per_day: pos.speed_deg_per_day,
            retrograde: pos.speed_deg_per_day < 0.0,
            sign: Sign::from_longitude(longitude_deg),
            house: house_of(longitude_deg, cusps),
        }
    }

    /// Sentinel recorded for a failed lookup.
    pub fn unavailable(body: Body) -> Self {
        Self {
            body,
            available: false,
            longitude_deg: 0.0,
            latitude_deg: 0.0,
            distance_au: 0.0,
            speed_deg_per_day: 0.0,
            retrograde: false,
            sign: Sign::Aries,
            house: 0,
        }
    }
}

/// Which bodies to chart and how to match aspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub orbs: OrbConfig,
    /// Bodies computed, in output order.
    pub bodies: Vec<Body>,
    /// Bodies counted in the quality tallies.
    pub tally_bodies: Vec<Body>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            orbs: OrbConfig::natal(),
            bodies: ALL_BODIES.to_vec(),
            tally_bodies: CLASSICAL_BODIES.to_vec(),
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.bodies.is_empty() {
            return Err("at least one body must be charted");
        }
        for (i, b) in self.bodies.iter().enumerate() {
            if self.bodies[..i].contains(b) {
                return Err("charted bodies must be unique");
            }
        }
        self.orbs.validate()
    }
}

/// One fully computed chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub subject: Subject,
    /// Julian Day in UT.
    pub jd_ut: f64,
    /// TT − UT in days.
    pub delta_t_days: f64,
    /// Local sidereal time (RAMC) in degrees.
    pub sidereal_time_deg: f64,
    pub obliquity_deg: f64,
    pub ascendant_deg: f64,
    pub midheaven_deg: f64,
    pub houses: HouseCusps,
    pub bodies: Vec<BodyState>,
    pub aspects: AspectTable,
    pub tally: QualityTally,
}

impl Chart {
    pub fn body(&self, body: Body) -> Option<&BodyState> {
        self.bodies.iter().find(|b| b.body == body)
    }

    pub fn cusps(&self) -> &[f64; 12] {
        &self.houses.cusps
    }

    pub fn house_status(&self) -> HouseStatus {
        self.houses.status
    }

    /// Bodies whose lookup succeeded.
    pub fn available_bodies(&self) -> impl Iterator<Item = &BodyState> {
        self.bodies.iter().filter(|b| b.available)
    }
}
