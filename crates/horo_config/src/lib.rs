//! TOML settings for the chart engine and transit search.
//!
//! A config file overrides any subset of the built-in defaults:
//!
//! ```toml
//! [chart]
//! house_system = "koch"          # name or numeric code
//! utc_offset_hours = 1.0
//! bodies = ["Sun", "Moon", "Mercury", "Venus", "Mars"]
//!
//! [orbs.default]
//! square = 7.5
//!
//! [[orbs.pair]]
//! first = "Sun"
//! second = "Moon"
//! aspect = "opposition"
//! orb = 12.0
//!
//! [transits]
//! step = "1d"
//! refine_exact = true
//! ```
//!
//! The file is chosen by [`Settings::load`]: `--config`, then the
//! `HORO_CONFIG` environment variable, then built-in defaults.

pub mod error;
pub mod raw;
pub mod settings;

pub use error::ConfigError;
pub use raw::RawConfig;
pub use settings::{CONFIG_ENV, Settings, resolve_config_path};
