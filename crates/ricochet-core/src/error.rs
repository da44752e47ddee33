//! Errors raised while loading or resolving projectile configs.
//!
//! These are content-integrity failures. Simulation outcomes such as a
//! projectile being destroyed are never errors.

use thiserror::Error;

use crate::fixed::Fixed;
use crate::registry::ConfigId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no projectile config registered under id {0:?}")]
    UnknownConfig(ConfigId),

    #[error("projectile config `{0}` is already registered")]
    DuplicateName(String),

    #[error("projectile config `{name}`: ricochet_damping {value} is outside (0, 1]")]
    InvalidDamping { name: String, value: Fixed },

    #[error("projectile config `{name}`: {field} must not be negative (got {value})")]
    NegativeValue {
        name: String,
        field: &'static str,
        value: Fixed,
    },

    #[error("registry is full ({0} configs)")]
    RegistryFull(usize),

    #[error("failed to parse projectile configs: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read projectile configs: {0}")]
    Io(#[from] std::io::Error),
}
