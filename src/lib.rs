pub mod error;
pub mod id;
pub mod minimap;
pub mod model;
pub mod sim;
pub mod spawn;
pub mod territory;
pub mod testutil;
pub mod worldgen;

pub use error::{ConfigError, Error, TerritoryViolation, WorldError};
pub use id::{AnimalId, IdGenerator, NpcId, RoomId};
pub use model::{
    Affiliation, Biome, FactionDef, FactionId, FactionRegistry, Roles, Room, RoomTag, World,
};
pub use sim::{SimEvent, Simulation};
pub use territory::TerritoryLedger;
pub use worldgen::{WorldGenConfig, generate_map, generate_world};
