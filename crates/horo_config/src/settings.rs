//! Validated settings and the config file lookup.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use horo_chart::subject::MAX_UTC_OFFSET_HOURS;
use horo_chart::{ChartConfig, OrbConfig, PairOrb, Subject};
use horo_core::Body;
use horo_houses::HouseSystem;
use horo_math::AspectKind;
use horo_search::{ExactSearchConfig, StationConfig, TransitConfig};
use horo_time::{CalendarDate, StepGranularity};

use crate::error::ConfigError;
use crate::raw::{HouseSystemSpec, RawConfig, RawOrbs};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "HORO_CONFIG";

/// Everything a chart or search run takes from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub house_system: HouseSystem,
    pub utc_offset_hours: f64,
    pub chart: ChartConfig,
    pub transit: TransitConfig,
    pub exact: ExactSearchConfig,
    pub stations: StationConfig,
    /// File the settings came from; `None` for built-in defaults.
    pub source: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::Placidus,
            utc_offset_hours: 0.0,
            chart: ChartConfig::default(),
            transit: TransitConfig::default(),
            exact: ExactSearchConfig::default(),
            stations: StationConfig::default(),
            source: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Name resolution
// ---------------------------------------------------------------------------

fn parse_body(name: &str) -> Result<Body, ConfigError> {
    name.parse().map_err(|_| ConfigError::UnknownBody(name.to_string()))
}

fn parse_bodies(names: &[String]) -> Result<Vec<Body>, ConfigError> {
    names.iter().map(|n| parse_body(n)).collect()
}

fn parse_aspect(name: &str) -> Result<AspectKind, ConfigError> {
    AspectKind::from_name(name).ok_or_else(|| ConfigError::UnknownAspect(name.to_string()))
}

fn house_system(spec: &HouseSystemSpec) -> Result<HouseSystem, ConfigError> {
    Ok(match spec {
        HouseSystemSpec::Code(code) => HouseSystem::from_code(*code)?,
        HouseSystemSpec::Name(name) => name.parse()?,
    })
}

fn invalid(section: &'static str) -> impl Fn(&'static str) -> ConfigError {
    move |reason| ConfigError::Invalid { section, reason }
}

/// Overlay raw orb settings on `base`.
fn orbs(raw: &RawOrbs, base: OrbConfig) -> Result<OrbConfig, ConfigError> {
    let mut out = OrbConfig {
        default_orbs: raw.default.apply(base.default_orbs),
        cusp_orbs: raw.cusp.apply(base.cusp_orbs),
        luminary_bonus_deg: raw.luminary_bonus.unwrap_or(base.luminary_bonus_deg),
        minor_body_penalty_deg: raw.minor_body_penalty.unwrap_or(base.minor_body_penalty_deg),
        pair_overrides: base.pair_overrides,
    };
    for pair in &raw.pair {
        out.pair_overrides.push(PairOrb {
            first: parse_body(&pair.first)?,
            second: parse_body(&pair.second)?,
            aspect: parse_aspect(&pair.aspect)?,
            orb_deg: pair.orb,
        });
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

impl Settings {
    /// Convert and validate a parsed document.
    pub fn from_raw(raw: &RawConfig) -> Result<Self, ConfigError> {
        let mut s = Self::default();

        if let Some(spec) = &raw.chart.house_system {
            s.house_system = house_system(spec)?;
        }
        if let Some(offset) = raw.chart.utc_offset_hours {
            s.utc_offset_hours = offset;
        }
        if let Some(bodies) = &raw.chart.bodies {
            s.chart.bodies = parse_bodies(bodies)?;
        }
        if let Some(bodies) = &raw.chart.tally_bodies {
            s.chart.tally_bodies = parse_bodies(bodies)?;
        }
        s.chart.orbs = orbs(&raw.orbs, OrbConfig::natal())?;

        let t = &raw.transits;
        if let Some(step) = &t.step {
            s.transit.step = step.parse::<StepGranularity>()?;
        }
        if let Some(bodies) = &t.bodies {
            s.transit.transiting_bodies = parse_bodies(bodies)?;
        }
        if let Some(bodies) = &t.targets {
            s.transit.natal_targets = parse_bodies(bodies)?;
        }
        if let Some(aspects) = &t.aspects {
            s.transit.aspects = aspects
                .iter()
                .map(|a| parse_aspect(a))
                .collect::<Result<_, _>>()?;
        }
        if let Some(v) = t.include_cusps {
            s.transit.include_cusps = v;
        }
        if let Some(v) = t.refine_exact {
            s.transit.refine_exact = v;
        }
        if let Some(v) = t.max_steps {
            s.transit.max_steps = v;
        }
        s.transit.orbs = orbs(&t.orbs, OrbConfig::transit())?;

        if let Some(v) = raw.exact.step_days {
            s.exact.step_days = v;
        }
        if let Some(v) = raw.exact.max_window_days {
            s.exact.max_window_days = v;
        }
        if let Some(v) = raw.exact.tolerance_deg {
            s.exact.refine.tolerance_deg = v;
            s.transit.refine.tolerance_deg = v;
        }
        if let Some(v) = raw.stations.step_days {
            s.stations.step_days = v;
        }
        if let Some(v) = raw.stations.refine {
            s.stations.refine_stations = v;
        }

        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.utc_offset_hours.is_finite() || self.utc_offset_hours.abs() > MAX_UTC_OFFSET_HOURS
        {
            return Err(ConfigError::Invalid {
                section: "chart",
                reason: "utc_offset_hours must be within ±14 hours",
            });
        }
        self.chart.orbs.validate().map_err(invalid("orbs"))?;
        self.chart.validate().map_err(invalid("chart"))?;
        self.transit.validate().map_err(invalid("transits"))?;
        self.exact.validate().map_err(invalid("exact"))?;
        self.stations.validate().map_err(invalid("stations"))?;
        Ok(())
    }

    /// Parse TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        Self::from_raw(&raw)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::from_toml_str(&text)?;
        settings.source = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Load from `--config`, then `HORO_CONFIG`, then built-in defaults.
    ///
    /// A named file that cannot be read or parsed is an error; defaults are
    /// used only when no file is named at all.
    pub fn load(cli_path: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_config_path(cli_path, std::env::var_os(CONFIG_ENV)) {
            Some(path) => {
                log::debug!("loading settings from {}", path.display());
                Self::from_file(path)
            }
            None => {
                log::debug!("no config file; using built-in settings");
                Ok(Self::default())
            }
        }
    }

    /// A subject using the configured house system and UTC offset.
    pub fn subject(
        &self,
        date: CalendarDate,
        hours: f64,
        longitude_deg: f64,
        latitude_deg: f64,
    ) -> Subject {
        Subject::new(date, hours, longitude_deg, latitude_deg, self.house_system)
            .with_utc_offset(self.utc_offset_hours)
    }
}

/// Pick the config file: the command-line path wins over the environment
/// value. Empty environment values are ignored.
pub fn resolve_config_path(
    cli_path: Option<&Path>,
    env_value: Option<OsString>,
) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }
    env_value.filter(|v| !v.is_empty()).map(PathBuf::from)
}
