//! TOML-facing structs.
//!
//! Every field is optional; anything left out keeps the built-in default.
//! Names (bodies, aspects, house systems) stay strings here and are
//! resolved when converting into [`Settings`](crate::Settings).

use serde::Deserialize;

/// House system given by name (`"placidus"`) or numeric code (`1`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HouseSystemSpec {
    Code(i32),
    Name(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub chart: RawChart,
    pub orbs: RawOrbs,
    pub transits: RawTransits,
    pub exact: RawExact,
    pub stations: RawStations,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawChart {
    pub house_system: Option<HouseSystemSpec>,
    pub utc_offset_hours: Option<f64>,
    pub bodies: Option<Vec<String>>,
    pub tally_bodies: Option<Vec<String>>,
}

/// Per-aspect degrees, keyed by aspect name.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawAspectOrbs {
    pub conjunction: Option<f64>,
    #[serde(alias = "semisextile")]
    pub semi_sextile: Option<f64>,
    pub sextile: Option<f64>,
    pub square: Option<f64>,
    pub trine: Option<f64>,
    pub quincunx: Option<f64>,
    pub opposition: Option<f64>,
}

impl RawAspectOrbs {
    /// Overlay the given values on `base`, in aspect-angle order.
    pub fn apply(&self, base: [f64; 7]) -> [f64; 7] {
        let given = [
            self.conjunction,
            self.semi_sextile,
            self.sextile,
            self.square,
            self.trine,
            self.quincunx,
            self.opposition,
        ];
        let mut out = base;
        for (slot, value) in out.iter_mut().zip(given) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        out
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPairOrb {
    pub first: String,
    pub second: String,
    pub aspect: String,
    pub orb: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawOrbs {
    pub default: RawAspectOrbs,
    pub cusp: RawAspectOrbs,
    pub luminary_bonus: Option<f64>,
    pub minor_body_penalty: Option<f64>,
    pub pair: Vec<RawPairOrb>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawTransits {
    /// `"1d"`, `"6h"`, `"1mo"`, ...
    pub step: Option<String>,
    pub bodies: Option<Vec<String>>,
    pub targets: Option<Vec<String>>,
    pub aspects: Option<Vec<String>>,
    pub include_cusps: Option<bool>,
    pub refine_exact: Option<bool>,
    pub max_steps: Option<usize>,
    pub orbs: RawOrbs,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawExact {
    pub step_days: Option<f64>,
    pub max_window_days: Option<f64>,
    pub tolerance_deg: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawStations {
    pub step_days: Option<f64>,
    pub refine: Option<bool>,
}
