//! Errors that abort a simulation tick.

use thiserror::Error;

use ricochet_core::error::ConfigError;
use ricochet_core::Fixed;

#[derive(Debug, Error)]
pub enum SimError {
    /// A live projectile references content that does not exist.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("tile size must be positive (got {0})")]
    InvalidTileSize(Fixed),

    #[error("failed to parse level: {0}")]
    Level(#[from] serde_json::Error),
}
