//! Read-only registry of projectile configs, looked up by stable id.
//!
//! Content is validated once on insertion. After loading, the registry is
//! shared by reference (typically behind an `Arc`) and never mutated.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ProjectileConfig;
use crate::error::ConfigError;
use crate::fixed::Fixed;

/// Stable handle to a registered projectile config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConfigId(pub u16);

#[derive(Debug, Clone, Default)]
pub struct ConfigRegistry {
    configs: Vec<ProjectileConfig>,
    names: Vec<String>,
    ids: BTreeMap<String, ConfigId>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object mapping config names to configs.
    ///
    /// Entries are registered in sorted-name order, so every peer assigns
    /// the same ids to the same content.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let entries: BTreeMap<String, ProjectileConfig> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for (name, config) in entries {
            registry.insert(name, config)?;
        }
        Ok(registry)
    }

    /// Load a registry from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Validate and register a config, returning its id.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        config: ProjectileConfig,
    ) -> Result<ConfigId, ConfigError> {
        let name = name.into();
        if self.ids.contains_key(&name) {
            return Err(ConfigError::DuplicateName(name));
        }
        validate(&name, &config)?;

        let index = u16::try_from(self.configs.len())
            .map_err(|_| ConfigError::RegistryFull(self.configs.len()))?;
        let id = ConfigId(index);
        self.configs.push(config);
        self.names.push(name.clone());
        self.ids.insert(name, id);
        Ok(id)
    }

    /// Look up a config by id.
    pub fn get(&self, id: ConfigId) -> Result<&ProjectileConfig, ConfigError> {
        self.configs
            .get(usize::from(id.0))
            .ok_or(ConfigError::UnknownConfig(id))
    }

    /// Look up the id registered under `name`.
    pub fn id_of(&self, name: &str) -> Option<ConfigId> {
        self.ids.get(name).copied()
    }

    /// Name a config was registered under.
    pub fn name_of(&self, id: ConfigId) -> Option<&str> {
        self.names.get(usize::from(id.0)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// All configs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ConfigId, &ProjectileConfig)> {
        self.configs
            .iter()
            .enumerate()
            .map(|(i, config)| (ConfigId(i as u16), config))
    }
}

/// Check a config's numeric ranges.
///
/// Content that sets only one of `lock_to_45` / `strict_45` is accepted but
/// logged for review.
pub fn validate(name: &str, config: &ProjectileConfig) -> Result<(), ConfigError> {
    if config.ricochet_damping <= Fixed::ZERO || config.ricochet_damping > Fixed::ONE {
        return Err(ConfigError::InvalidDamping {
            name: name.to_string(),
            value: config.ricochet_damping,
        });
    }
    for (field, value) in [
        ("speed", config.speed),
        ("bounce_strength", config.bounce_strength),
    ] {
        if value.is_negative() {
            return Err(ConfigError::NegativeValue {
                name: name.to_string(),
                field,
                value,
            });
        }
    }

    if config.lock_to_45 != config.strict_45 {
        tracing::warn!(
            config = name,
            lock_to_45 = config.lock_to_45,
            strict_45 = config.strict_45,
            "projectile config sets only one of lock_to_45/strict_45"
        );
    }

    Ok(())
}
