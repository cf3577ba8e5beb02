//! A perceptron-based conditional branch direction predictor.
//!
//! Each execution core owns a table of `2^H` perceptrons (an 8-bit bias plus
//! one 8-bit weight per global history bit). A prediction is the sign of the
//! dot product between an entry and the most recent `H` history bits.
//!
//! See "Dynamic Branch Prediction with Perceptrons" (Jiménez and Lin, 2001).

pub mod branch;
pub mod config;
pub mod error;
pub mod history;
pub mod host;
pub mod predictor;
pub mod sim;
pub mod stats;
pub mod trace;

pub use branch::*;
pub use config::*;
pub use error::*;
pub use history::*;
pub use host::*;
pub use predictor::*;
