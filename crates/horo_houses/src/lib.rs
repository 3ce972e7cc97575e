//! House System Engine.
//!
//! Every house system is a pure function of one [`HouseInput`]
//! (RAMC, obliquity, latitude, Ascendant, Midheaven) returning exactly 12
//! cusp longitudes in house order. Dispatch is a single `match` over
//! [`HouseSystem`].
//!
//! Systems that divide rising/setting arcs (Placidus, Koch, Topocentric,
//! Alcabitius) are undefined inside the polar circle; there the engine
//! substitutes Equal houses from the Ascendant and reports
//! [`HouseStatus::PolarFallback`].

pub mod angles;
pub mod error;
pub mod house_types;
pub mod houses;

pub use angles::{Angles, ascendant_deg, midheaven_deg};
pub use error::HouseError;
pub use house_types::{ALL_HOUSE_SYSTEMS, HouseCusps, HouseInput, HouseStatus, HouseSystem};
pub use houses::compute_houses;
