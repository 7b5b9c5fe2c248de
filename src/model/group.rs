use serde::{Deserialize, Serialize};

use super::faction::{Affiliation, FactionId};
use crate::id::{NpcId, RoomId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Patrol,
    Caravan,
}

/// Handle to a group in one of the world's group lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupRef {
    pub kind: GroupKind,
    pub index: usize,
}

/// NPCs that share one room and move or fall together.
///
/// The group owns its single room id; members are only relocated through
/// `World::relocate_group`, which moves all of them at once. A group whose
/// members have all been removed stays in its list as an empty group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub kind: GroupKind,
    pub affiliation: Affiliation,
    pub(crate) members: Vec<NpcId>,
    pub(crate) room_id: RoomId,
}

impl Group {
    pub(crate) fn new(kind: GroupKind, affiliation: Affiliation, room_id: RoomId) -> Self {
        Self {
            kind,
            affiliation,
            members: Vec::new(),
            room_id,
        }
    }

    pub fn members(&self) -> &[NpcId] {
        &self.members
    }

    /// Patrol leader or caravan merchant.
    pub fn leader(&self) -> Option<NpcId> {
        self.members.first().copied()
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn faction(&self) -> Option<FactionId> {
        self.affiliation.faction()
    }
}
