//! Runtime configuration from `BLOCKFALL_*` environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BLOCKFALL_SEED` | piece generator seed | random |
//! | `BLOCKFALL_DAS_MS` | auto-repeat delay | 150 |
//! | `BLOCKFALL_ARR_MS` | auto-repeat rate | 50 |
//! | `BLOCKFALL_LOG_DIR` | directory for `blockfall.log` | unset, no file log |
//!
//! Empty or whitespace-only values count as unset.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{DEFAULT_ARR_MS, DEFAULT_DAS_MS};

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const DAS_VAR: &str = "BLOCKFALL_DAS_MS";
pub const ARR_VAR: &str = "BLOCKFALL_ARR_MS";
pub const LOG_DIR_VAR: &str = "BLOCKFALL_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixed seed; `None` picks one at startup
    pub seed: Option<u64>,
    pub das_ms: u32,
    pub arr_ms: u32,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Ok(Self {
            seed: parse(SEED_VAR, get(SEED_VAR))?,
            das_ms: parse(DAS_VAR, get(DAS_VAR))?.unwrap_or(defaults.das_ms),
            arr_ms: parse(ARR_VAR, get(ARR_VAR))?.unwrap_or(defaults.arr_ms),
            log_dir: get(LOG_DIR_VAR).map(PathBuf::from),
        })
    }

    /// The configured seed, or a fresh random one
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

fn parse<T: FromStr>(key: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError> {
    raw.map(|value| {
        value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value })
    })
    .transpose()
}
