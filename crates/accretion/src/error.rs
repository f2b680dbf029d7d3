//! Error types for the accretion engine
//!
//! Only configuration and construction can fail. Numeric degeneracy inside the
//! force kernel is clamped, and an empty population is a valid state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// A physics constant in [`crate::config::SimulationConfig`] is unusable
    #[error("invalid simulation config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A run parameter in [`crate::config::RunConfig`] is unusable
    #[error("invalid run config `{field}`: {reason}")]
    InvalidRunConfig { field: &'static str, reason: String },

    /// Bodies must carry a strictly positive, finite mass
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    #[error("failed to parse simulation config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
