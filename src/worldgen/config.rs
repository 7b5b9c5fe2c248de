use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{FactionDef, FactionRegistry};

/// Configuration for world generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// RNG seed for deterministic generation.
    pub seed: u64,
    /// Grid side length; the world has `size * size` rooms.
    pub size: u32,
    /// Faction registry, in acting order.
    pub factions: Vec<FactionDef>,
}

impl WorldGenConfig {
    /// Parse a JSON config. Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config and build its faction registry.
    pub fn validate(&self) -> Result<FactionRegistry, ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        FactionRegistry::new(self.factions.clone())
    }
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            size: 15,
            factions: FactionRegistry::default().defs().to_vec(),
        }
    }
}
