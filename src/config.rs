//! Runtime configuration: defaults, optional TOML file, then environment overrides.
//! CLI flags are applied last by the caller.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::optimizer::{DEFAULT_BUDGET, DEFAULT_MAX_EXHAUSTIVE_ASSETS};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "folio.toml";

pub const ENV_BUDGET: &str = "FOLIO_BUDGET";
pub const ENV_OUTPUT_DIR: &str = "FOLIO_OUTPUT_DIR";
pub const ENV_DATA_DIR: &str = "FOLIO_DATA_DIR";
pub const ENV_LOG: &str = "FOLIO_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Upper bound on the total cost of a selection, in currency units.
    pub budget: f64,
    /// Where result files are written.
    pub output_dir: PathBuf,
    /// Where the interactive menu looks for CSV files.
    pub data_dir: PathBuf,
    /// Size guard for the exhaustive selector.
    pub max_exhaustive_assets: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            output_dir: PathBuf::from("results"),
            data_dir: PathBuf::from("data"),
            max_exhaustive_assets: DEFAULT_MAX_EXHAUSTIVE_ASSETS,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw, &path.display().to_string())
    }

    /// An explicit path must exist; the default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `FOLIO_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_BUDGET) {
            self.budget = value
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidEnv {
                    key: ENV_BUDGET,
                    value: value.clone(),
                })?;
        }
        if let Some(value) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_LOG) {
            self.log_level = value;
        }
        Ok(())
    }
}
