//! Bodies and the ephemeris provider contract.
//!
//! Raw planetary positions and the time quantities (obliquity, sidereal
//! time, Delta-T) come from an [`EphemerisProvider`] handed to every engine
//! entry point. This crate defines that seam and ships three providers:
//! - [`TabulatedEphemeris`]: regularly spaced samples loaded from JSON
//! - [`SyntheticEphemeris`]: analytic motion, for tests and benchmarks
//! - [`SharedEphemeris`]: a serializing wrapper around a stateful backend

pub mod error;
pub mod shared;
pub mod synthetic;
pub mod table;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::EphemerisError;
pub use shared::SharedEphemeris;
pub use synthetic::{BodyMotion, SyntheticEphemeris};
pub use table::{EphemerisSample, TabulatedEphemeris};

/// Chartable bodies, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    /// True (osculating) lunar node.
    TrueNode,
    /// Mean lunar apogee ("Black Moon Lilith").
    Lilith,
    Chiron,
    Ceres,
    Pallas,
    Juno,
    Vesta,
}

/// All bodies in chart order.
pub const ALL_BODIES: [Body; 17] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::TrueNode,
    Body::Lilith,
    Body::Chiron,
    Body::Ceres,
    Body::Pallas,
    Body::Juno,
    Body::Vesta,
];

/// Sun through Pluto.
pub const CLASSICAL_BODIES: [Body; 10] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    pub const fn all() -> &'static [Body; 17] {
        &ALL_BODIES
    }

    /// Stable numeric code 0..16.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Convert a numeric code back into a [`Body`].
    pub const fn from_code(code: i32) -> Option<Self> {
        if code >= 0 && code < ALL_BODIES.len() as i32 {
            Some(ALL_BODIES[code as usize])
        } else {
            None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::TrueNode => "True Node",
            Self::Lilith => "Lilith",
            Self::Chiron => "Chiron",
            Self::Ceres => "Ceres",
            Self::Pallas => "Pallas",
            Self::Juno => "Juno",
            Self::Vesta => "Vesta",
        }
    }

    /// Whether the body can show retrograde motion as seen from Earth.
    ///
    /// The Sun and Moon never do.
    pub const fn can_retrograde(self) -> bool {
        !matches!(self, Self::Sun | Self::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    /// Case-insensitive name (`"mars"`, `"true node"`, `"truenode"`) or numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.trim().parse::<i32>() {
            return Self::from_code(code).ok_or_else(|| format!("unknown body code {code}"));
        }
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        ALL_BODIES
            .into_iter()
            .find(|b| {
                b.name()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .map(|c| c.to_ascii_lowercase())
                    .eq(key.chars())
            })
            .ok_or_else(|| format!("unknown body '{s}'"))
    }
}

/// Geocentric ecliptic position and motion of a body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticPosition {
    /// Ecliptic longitude in degrees.
    pub longitude_deg: f64,
    /// Ecliptic latitude in degrees.
    pub latitude_deg: f64,
    /// Distance in AU.
    pub distance_au: f64,
    /// Longitude speed in degrees per day. Negative means retrograde.
    pub speed_deg_per_day: f64,
}

/// Source of raw ephemeris data and time quantities.
///
/// All calls take a UT Julian Day. Any call may fail on its own; the chart
/// engine decides which failures are fatal.
pub trait EphemerisProvider {
    /// Position and daily longitude speed of `body`.
    fn body_position(&self, body: Body, jd_ut: f64) -> Result<EclipticPosition, EphemerisError>;

    /// Obliquity of the ecliptic in degrees.
    fn obliquity_deg(&self, jd_ut: f64) -> Result<f64, EphemerisError>;

    /// Local sidereal time in degrees (right ascension of the meridian) for
    /// an east-positive geographic longitude.
    fn sidereal_time_deg(&self, jd_ut: f64, longitude_deg: f64) -> Result<f64, EphemerisError>;

    /// TT − UT in days.
    fn delta_t_days(&self, jd_ut: f64) -> Result<f64, EphemerisError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn body_position(&self, body: Body, jd_ut: f64) -> Result<EclipticPosition, EphemerisError> {
        (**self).body_position(body, jd_ut)
    }

    fn obliquity_deg(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        (**self).obliquity_deg(jd_ut)
    }

    fn sidereal_time_deg(&self, jd_ut: f64, longitude_deg: f64) -> Result<f64, EphemerisError> {
        (**self).sidereal_time_deg(jd_ut, longitude_deg)
    }

    fn delta_t_days(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        (**self).delta_t_days(jd_ut)
    }
}
