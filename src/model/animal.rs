use serde::{Deserialize, Serialize};

use super::biome::Biome;
use crate::id::{AnimalId, RoomId};

pub const ANIMAL_PERSONALITIES: &[&str] = &["timid", "aggressive", "curious", "territorial"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: AnimalId,
    pub name: String,
    /// Hostile animals are predators; the rest are prey.
    pub hostile: bool,
    pub biome: Biome,
    pub personality: String,
    pub(crate) room_id: RoomId,
}

impl Animal {
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn is_prey(&self) -> bool {
        !self.hostile
    }
}
