//! Errors reported while configuring a predictor.
//!
//! Prediction and training themselves never fail: weight updates saturate,
//! and an out-of-range core id is a host bug that panics.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a predictor needs at least one core")]
    NoCores,
    #[error("requested {requested} cores (at most {max} are supported)")]
    TooManyCores { requested: usize, max: usize },
    #[error("malformed predictor configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
