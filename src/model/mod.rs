#[macro_use]
mod macros;

pub mod animal;
pub mod biome;
pub mod clock;
pub mod faction;
pub mod group;
pub mod npc;
pub mod room;
pub mod weather;
pub mod world;

pub use animal::Animal;
pub use biome::Biome;
pub use clock::WorldClock;
pub use faction::{Affiliation, FactionDef, FactionId, FactionRegistry};
pub use group::{Group, GroupKind, GroupRef};
pub use npc::{Npc, NpcSpawn, Roles};
pub use room::{Direction, Room, RoomTag};
pub use weather::Weather;
pub use world::World;
