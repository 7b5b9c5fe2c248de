use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::faction::{Affiliation, FactionId};
use crate::id::{NpcId, RoomId};

bitflags! {
    /// Capabilities an NPC carries. An empty set is a plain NPC.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Roles: u16 {
        const PATROLLER = 1 << 0;
        const GUARDIAN = 1 << 1;
        const EMISSARY = 1 << 2;
        const MERCHANT = 1 << 3;
        const CARAVAN_GUARD = 1 << 4;
        const AMBUSHER = 1 << 5;
        const LEGENDARY = 1 << 6;
        const STORYTELLER = 1 << 7;
        const QUESTGIVER = 1 << 8;
        const DEFENDER = 1 << 9;
    }
}

/// A person in the world. Lives in exactly one room's NPC list at a time,
/// the one named by `room_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub personality: String,
    pub affiliation: Option<Affiliation>,
    pub roles: Roles,
    pub(crate) room_id: RoomId,
}

impl Npc {
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn faction(&self) -> Option<FactionId> {
        self.affiliation.and_then(Affiliation::faction)
    }

    pub fn has_role(&self, role: Roles) -> bool {
        self.roles.contains(role)
    }

    pub fn is_plain(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Everything needed to place a new NPC.
#[derive(Debug, Clone)]
pub struct NpcSpawn {
    pub name: String,
    pub personality: String,
    pub affiliation: Option<Affiliation>,
    pub roles: Roles,
    pub room_id: RoomId,
}

impl NpcSpawn {
    pub fn new(name: impl Into<String>, personality: &str, room_id: RoomId) -> Self {
        Self {
            name: name.into(),
            personality: personality.to_string(),
            affiliation: None,
            roles: Roles::empty(),
            room_id,
        }
    }

    pub fn affiliated(mut self, affiliation: Affiliation) -> Self {
        self.affiliation = Some(affiliation);
        self
    }

    pub fn with_roles(mut self, roles: Roles) -> Self {
        self.roles |= roles;
        self
    }
}
