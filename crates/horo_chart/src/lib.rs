//! Chart orchestration and the aspect/quality/placement engine.
//!
//! This crate provides:
//! - [`Subject`]: the immutable event description (date, clock, place, house system)
//! - [`compute_chart`]: one full [`Chart`] from a subject and an injected provider
//! - Aspect table with per-pair orbs and a best-match rule
//! - House placement and element/modality/polarity tallies

pub mod aspects;
pub mod chart;
pub mod chart_types;
pub mod error;
pub mod orbs;
pub mod placement;
pub mod subject;

pub use aspects::{AspectEntry, AspectHit, AspectTable, best_aspect, compute_aspect_table};
pub use chart::{body_state, compute_chart};
pub use chart_types::{BodyState, Chart, ChartConfig};
pub use error::ChartError;
pub use orbs::{OrbConfig, PairOrb};
pub use placement::{QualityTally, house_of};
pub use subject::Subject;
