//! Configuration errors.

use std::path::PathBuf;

use horo_houses::HouseError;
use horo_time::TimeError;
use thiserror::Error;

/// Failure to load or validate settings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    House(#[from] HouseError),
    #[error("invalid scan step: {0}")]
    Step(#[from] TimeError),
    #[error("unknown body '{0}'")]
    UnknownBody(String),
    #[error("unknown aspect '{0}'")]
    UnknownAspect(String),
    /// A value parsed but failed validation.
    #[error("invalid [{section}] settings: {reason}")]
    Invalid {
        section: &'static str,
        reason: &'static str,
    },
}
