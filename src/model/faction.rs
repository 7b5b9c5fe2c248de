use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::biome::Biome;
use crate::error::ConfigError;

/// Index of a faction in its registry. Registry order is the order in which
/// factions act during a war tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactionId(pub u16);

impl FactionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "faction#{}", self.0)
    }
}

/// Static description of a faction. `personality` is flavor only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionDef {
    pub name: String,
    pub home_biome: Biome,
    pub personality: String,
    /// Expansion drive in [0, 1].
    pub aggression: f64,
}

impl FactionDef {
    pub fn new(name: &str, home_biome: Biome, personality: &str, aggression: f64) -> Self {
        Self {
            name: name.to_string(),
            home_biome,
            personality: personality.to_string(),
            aggression,
        }
    }

    /// Character shown on the minimap for rooms this faction controls.
    pub fn map_letter(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }
}

/// Fixed set of factions for one world. Never grows or shrinks after setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionRegistry {
    defs: Vec<FactionDef>,
}

impl FactionRegistry {
    pub fn new(defs: Vec<FactionDef>) -> Result<Self, ConfigError> {
        let mut names = BTreeSet::new();
        for def in &defs {
            if def.name.is_empty() {
                return Err(ConfigError::EmptyFactionName);
            }
            if !(0.0..=1.0).contains(&def.aggression) {
                return Err(ConfigError::AggressionOutOfRange {
                    name: def.name.clone(),
                    aggression: def.aggression,
                });
            }
            if !names.insert(def.name.as_str()) {
                return Err(ConfigError::DuplicateFaction(def.name.clone()));
            }
        }
        Ok(Self { defs })
    }

    pub fn defs(&self) -> &[FactionDef] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, id: FactionId) -> Option<&FactionDef> {
        self.defs.get(id.index())
    }

    /// All ids in registry order.
    pub fn ids(&self) -> Vec<FactionId> {
        (0..self.defs.len() as u16).map(FactionId).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FactionId, &FactionDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, def)| (FactionId(i as u16), def))
    }

    pub fn by_name(&self, name: &str) -> Option<FactionId> {
        self.iter().find(|(_, def)| def.name == name).map(|(id, _)| id)
    }

    /// First faction whose home is the given biome, if any.
    pub fn native_to(&self, biome: Biome) -> Option<FactionId> {
        self.iter()
            .find(|(_, def)| def.home_biome == biome)
            .map(|(id, _)| id)
    }
}

impl Default for FactionRegistry {
    fn default() -> Self {
        Self {
            defs: vec![
                FactionDef::new("Forest Clan", Biome::Forest, "serious", 0.6),
                FactionDef::new("Mountain Tribe", Biome::Mountain, "stoic", 0.7),
                FactionDef::new("Desert Nomads", Biome::Desert, "pragmatic", 0.5),
                FactionDef::new("Swamp Covenant", Biome::Swamp, "mysterious", 0.4),
                FactionDef::new("Plains Alliance", Biome::Plains, "friendly", 0.3),
            ],
        }
    }
}

/// Who an NPC answers to. Only `Faction` members hold territory; the other
/// groups still count as foreign presence for emissaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affiliation {
    Faction(FactionId),
    Mystics,
    FreeTraders,
    Bandits,
}

impl Affiliation {
    pub fn faction(self) -> Option<FactionId> {
        match self {
            Affiliation::Faction(id) => Some(id),
            _ => None,
        }
    }
}
