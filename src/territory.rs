//! Faction ownership of rooms.
//!
//! The ledger is the authoritative faction → rooms mapping. A room's
//! `faction_control` mirrors it; both sides are only changed together, by
//! `World::claim_room` and `World::release_room`.

use std::collections::BTreeSet;

use crate::error::TerritoryViolation;
use crate::id::RoomId;
use crate::model::{FactionId, Room};

/// Starting war power of every faction.
pub const INITIAL_STRENGTH: i64 = 100;

#[derive(Debug, Clone)]
pub struct TerritoryLedger {
    territories: Vec<BTreeSet<RoomId>>,
    strength: Vec<i64>,
}

impl TerritoryLedger {
    pub fn new(num_factions: usize) -> Self {
        Self {
            territories: vec![BTreeSet::new(); num_factions],
            strength: vec![INITIAL_STRENGTH; num_factions],
        }
    }

    pub fn territory(&self, faction: FactionId) -> Option<&BTreeSet<RoomId>> {
        self.territories.get(faction.index())
    }

    /// Owned rooms in ascending id order, ready to be shuffled.
    pub fn owned_rooms(&self, faction: FactionId) -> Vec<RoomId> {
        self.territory(faction)
            .map(|rooms| rooms.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn strength(&self, faction: FactionId) -> Option<i64> {
        self.strength.get(faction.index()).copied()
    }

    /// Which faction lists this room, if any.
    pub fn listed_owner(&self, room_id: RoomId) -> Option<FactionId> {
        self.territories
            .iter()
            .position(|rooms| rooms.contains(&room_id))
            .map(|i| FactionId(i as u16))
    }

    pub(crate) fn add_strength(&mut self, faction: FactionId, amount: i64) -> i64 {
        match self.strength.get_mut(faction.index()) {
            Some(value) => {
                *value += amount;
                *value
            }
            None => 0,
        }
    }

    /// Move `room_id` from `from`'s set into `to`'s set in one step.
    pub(crate) fn transfer(
        &mut self,
        room_id: RoomId,
        from: Option<FactionId>,
        to: Option<FactionId>,
    ) {
        if let Some(from) = from.filter(|&f| to != Some(f)) {
            if let Some(rooms) = self.territories.get_mut(from.index()) {
                rooms.remove(&room_id);
            }
        }
        if let Some(rooms) = to.and_then(|t| self.territories.get_mut(t.index())) {
            rooms.insert(room_id);
        }
    }

    /// Check that every room's owner lists it and nobody else does.
    pub fn verify(&self, rooms: &[Room]) -> Result<(), TerritoryViolation> {
        for room in rooms {
            let Some(owner) = room.faction_control() else {
                continue;
            };
            if !self
                .territory(owner)
                .is_some_and(|set| set.contains(&room.id))
            {
                return Err(TerritoryViolation::MissingFromTerritory {
                    room_id: room.id,
                    owner,
                });
            }
        }
        for (i, set) in self.territories.iter().enumerate() {
            let listed_by = FactionId(i as u16);
            for &room_id in set {
                let owner = rooms
                    .get(room_id as usize)
                    .and_then(Room::faction_control);
                if owner != Some(listed_by) {
                    return Err(TerritoryViolation::StrayTerritoryEntry {
                        room_id,
                        listed_by,
                        owner,
                    });
                }
            }
        }
        Ok(())
    }
}
