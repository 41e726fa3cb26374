//! Configuration errors
//!
//! Everything that can go wrong is detected while assembling a kayak; the
//! per-step simulation never fails.

use thiserror::Error;

/// Errors raised while loading tuning or assembling a kayak
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No rigid body was wired into the builder
    #[error("kayak has no rigid body to drive")]
    MissingRigidBody,

    /// A tuning coefficient is out of range
    #[error("invalid tuning value for `{field}`: {value}")]
    InvalidTuning {
        /// Offending field name
        field: &'static str,
        /// Value that failed validation
        value: f32,
    },

    /// Tuning or settings file could not be parsed
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Tuning or settings file could not be read
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
