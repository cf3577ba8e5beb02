//! Runtime configuration for a multi-core predictor.
//!
//! The history length is a compile-time parameter of the predictor types;
//! the only thing chosen at runtime is how many cores to replicate the
//! table for.

use serde::Deserialize;
use crate::error::ConfigError;

/// Upper bound on the number of per-core tables.
pub const MAX_CORES: usize = 64;

/// Configuration for building a [`crate::PerceptronPredictor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Number of execution cores, each with its own table.
    pub num_cores: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self { num_cores: 1 }
    }
}

impl PredictorConfig {
    pub fn new(num_cores: usize) -> Self {
        Self { num_cores }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_cores == 0 {
            return Err(ConfigError::NoCores);
        }
        if self.num_cores > MAX_CORES {
            return Err(ConfigError::TooManyCores {
                requested: self.num_cores,
                max: MAX_CORES,
            });
        }
        Ok(())
    }
}
