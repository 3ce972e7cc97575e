//! Time-domain search over charts.
//!
//! This crate provides:
//! - Transit scans: a pull-based [`TransitScanner`] state machine with
//!   cooperative cancellation and an optional progress channel
//! - Exact-aspect refinement with re-bracketing around stations
//! - Next/previous exact aspect from a start instant
//! - Retrograde intervals from scan flags or by sampling a body directly

pub mod cancel;
pub mod error;
pub mod exact;
pub mod exact_types;
pub mod retrograde;
pub mod retrograde_types;
pub mod transit;
pub mod transit_types;

pub use cancel::CancelToken;
pub use error::SearchError;
pub use exact::{exact_aspect_roots, next_exact_aspect, prev_exact_aspect, refine_exact_aspect};
pub use exact_types::{ExactAspect, ExactSearchConfig, RefineConfig, SearchDirection};
pub use retrograde::{
    find_retrograde_intervals, retrograde_intervals_from_flags,
    retrograde_intervals_from_observations,
};
pub use retrograde_types::{
    DEFAULT_MAX_SAMPLES, IntervalBound, RetrogradeInterval, StationConfig,
};
pub use transit::{TransitScanner, compute_transit_scan};
pub use transit_types::{
    AspectEvent, AspectTarget, DEFAULT_MAX_STEPS, ScanProgress, ScanState, TransitConfig,
    TransitScan,
};
