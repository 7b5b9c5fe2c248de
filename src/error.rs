use thiserror::Error;

use crate::id::{NpcId, RoomId};
use crate::model::{FactionId, GroupRef};

/// Lookup failures surfaced to callers of the world API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    #[error("room {room_id} not found")]
    RoomNotFound { room_id: RoomId },
    #[error("{npc_id} not found")]
    NpcNotFound { npc_id: NpcId },
    #[error("faction {0} is not registered")]
    UnknownFaction(FactionId),
    #[error("{0:?} not found")]
    GroupNotFound(GroupRef),
}

/// Rejected world-generation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("world size must be at least 1")]
    ZeroSize,
    #[error("faction {name} has aggression {aggression} outside [0, 1]")]
    AggressionOutOfRange { name: String, aggression: f64 },
    #[error("faction name {0} is registered twice")]
    DuplicateFaction(String),
    #[error("faction name must not be empty")]
    EmptyFactionName,
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A breach of room-ownership exclusivity. Never expected in a correct run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerritoryViolation {
    #[error("room {room_id} is controlled by {owner} but missing from its territory")]
    MissingFromTerritory { room_id: RoomId, owner: FactionId },
    #[error("room {room_id} is listed in the territory of {listed_by} but controlled by {owner:?}")]
    StrayTerritoryEntry {
        room_id: RoomId,
        listed_by: FactionId,
        owner: Option<FactionId>,
    },
}

/// Anything that can stop world setup.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    World(#[from] WorldError),
}
