use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::biome::Biome;
use super::faction::FactionId;
use crate::id::{AnimalId, NpcId, RoomId};

/// Compass direction of an exit.
///
/// Declaration order is the exit-table order (west, east, north, south):
/// exits are stored in a `BTreeMap` keyed by direction, so every scan over a
/// room's neighbors visits them in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Direction {
    West,
    East,
    North,
    South,
}

string_enum!(Direction {
    West => "west",
    East => "east",
    North => "north",
    South => "south",
});

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }
}

/// Semantic markers a room can carry. A room may hold several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RoomTag {
    Camp,
    Shrine,
    Den,
    Treasure,
    Miniboss,
    Campfire,
}

string_enum!(RoomTag {
    Camp => "camp",
    Shrine => "shrine",
    Den => "den",
    Treasure => "treasure",
    Miniboss => "miniboss",
    Campfire => "campfire",
});

#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    pub biome: Biome,
    pub resources: Vec<String>,
    pub hazards: Vec<String>,
    pub tags: BTreeSet<RoomTag>,
    pub exits: BTreeMap<Direction, RoomId>,
    pub locked_exits: BTreeSet<Direction>,
    pub contested: bool,
    pub(crate) npcs: Vec<NpcId>,
    pub(crate) animals: Vec<AnimalId>,
    /// Only written through `World::claim_room` / `World::release_room`, which
    /// keep the territory ledger in step.
    pub(crate) faction_control: Option<FactionId>,
}

impl Room {
    pub(crate) fn new(id: RoomId, biome: Biome) -> Self {
        Self {
            id,
            name: format!("{} Area {id}", biome.title()),
            description: biome.description().to_string(),
            biome,
            resources: biome.resources().iter().map(|s| s.to_string()).collect(),
            hazards: biome.hazards().iter().map(|s| s.to_string()).collect(),
            tags: BTreeSet::new(),
            exits: BTreeMap::new(),
            locked_exits: BTreeSet::new(),
            contested: false,
            npcs: Vec::new(),
            animals: Vec::new(),
            faction_control: None,
        }
    }

    pub fn faction_control(&self) -> Option<FactionId> {
        self.faction_control
    }

    pub fn npcs(&self) -> &[NpcId] {
        &self.npcs
    }

    pub fn animals(&self) -> &[AnimalId] {
        &self.animals
    }

    pub fn has_tag(&self, tag: RoomTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Neighbor ids in exit-table order.
    pub fn neighbors(&self) -> Vec<RoomId> {
        self.exits.values().copied().collect()
    }

    /// Destination of an exit the player can currently take.
    pub fn open_exit(&self, direction: Direction) -> Option<RoomId> {
        if self.locked_exits.contains(&direction) {
            return None;
        }
        self.exits.get(&direction).copied()
    }
}
