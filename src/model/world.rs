use std::collections::{BTreeMap, BTreeSet};

use super::animal::Animal;
use super::biome::Biome;
use super::clock::WorldClock;
use super::faction::{Affiliation, FactionId, FactionRegistry};
use super::group::{Group, GroupKind, GroupRef};
use super::npc::{Npc, NpcSpawn};
use super::room::Room;
use super::weather::Weather;
use crate::error::{TerritoryViolation, WorldError};
use crate::id::{AnimalId, IdGenerator, NpcId, RoomId};
use crate::territory::TerritoryLedger;

pub const START_TEMPERATURE: f64 = 20.0;

/// The room graph plus everything that lives on it.
///
/// Rooms are created once by world generation and never removed. Ownership
/// and entity placement are private so the territory and single-room
/// invariants can only change through the methods below.
#[derive(Debug)]
pub struct World {
    /// Grid side length.
    pub size: u32,
    pub start_room_id: RoomId,
    pub clock: WorldClock,
    pub weather: Weather,
    pub temperature: f64,
    pub animal_dens: Vec<RoomId>,
    /// Room ids grouped by biome, ascending.
    pub migration_routes: BTreeMap<Biome, Vec<RoomId>>,
    rooms: Vec<Room>,
    factions: FactionRegistry,
    ledger: TerritoryLedger,
    npcs: BTreeMap<NpcId, Npc>,
    animals: BTreeMap<AnimalId, Animal>,
    patrols: Vec<Group>,
    caravans: Vec<Group>,
    emissaries: Vec<NpcId>,
    wandering_npcs: Vec<NpcId>,
    id_gen: IdGenerator,
}

impl World {
    /// Wrap already-built rooms. Room `i` must carry id `i`.
    pub(crate) fn from_rooms(size: u32, rooms: Vec<Room>, factions: FactionRegistry) -> Self {
        debug_assert!(rooms.iter().enumerate().all(|(i, r)| r.id as usize == i));
        let ledger = TerritoryLedger::new(factions.len());
        Self {
            size,
            start_room_id: 0,
            clock: WorldClock::default(),
            weather: Weather::default(),
            temperature: START_TEMPERATURE,
            animal_dens: Vec::new(),
            migration_routes: BTreeMap::new(),
            rooms,
            factions,
            ledger,
            npcs: BTreeMap::new(),
            animals: BTreeMap::new(),
            patrols: Vec::new(),
            caravans: Vec::new(),
            emissaries: Vec::new(),
            wandering_npcs: Vec::new(),
            id_gen: IdGenerator::new(),
        }
    }

    // -- Rooms --

    pub fn get_room(&self, room_id: RoomId) -> Result<&Room, WorldError> {
        self.rooms
            .get(room_id as usize)
            .ok_or(WorldError::RoomNotFound { room_id })
    }

    /// Mutable access for tags, exits and flavor. Ownership and occupants stay
    /// behind the world's own methods.
    pub fn room_mut(&mut self, room_id: RoomId) -> Result<&mut Room, WorldError> {
        self.rooms
            .get_mut(room_id as usize)
            .ok_or(WorldError::RoomNotFound { room_id })
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn rooms_in_biome(&self, biome: Biome) -> Vec<RoomId> {
        self.rooms
            .iter()
            .filter(|r| r.biome == biome)
            .map(|r| r.id)
            .collect()
    }

    // -- Factions and territory --

    pub fn factions(&self) -> &FactionRegistry {
        &self.factions
    }

    pub fn ledger(&self) -> &TerritoryLedger {
        &self.ledger
    }

    pub fn territory(&self, faction: FactionId) -> &BTreeSet<RoomId> {
        static EMPTY: BTreeSet<RoomId> = BTreeSet::new();
        self.ledger.territory(faction).unwrap_or(&EMPTY)
    }

    pub fn strength(&self, faction: FactionId) -> i64 {
        self.ledger.strength(faction).unwrap_or(0)
    }

    pub(crate) fn add_strength(&mut self, faction: FactionId, amount: i64) -> i64 {
        self.ledger.add_strength(faction, amount)
    }

    /// Give `room_id` to `faction`, removing it from the previous owner's
    /// territory in the same step. Returns the previous owner.
    pub fn claim_room(
        &mut self,
        room_id: RoomId,
        faction: FactionId,
    ) -> Result<Option<FactionId>, WorldError> {
        if self.factions.get(faction).is_none() {
            return Err(WorldError::UnknownFaction(faction));
        }
        let room = self
            .rooms
            .get_mut(room_id as usize)
            .ok_or(WorldError::RoomNotFound { room_id })?;
        let previous = room.faction_control.replace(faction);
        self.ledger.transfer(room_id, previous, Some(faction));
        Ok(previous)
    }

    /// Make a room unclaimed. Returns the previous owner.
    pub fn release_room(&mut self, room_id: RoomId) -> Result<Option<FactionId>, WorldError> {
        let room = self
            .rooms
            .get_mut(room_id as usize)
            .ok_or(WorldError::RoomNotFound { room_id })?;
        let previous = room.faction_control.take();
        self.ledger.transfer(room_id, previous, None);
        Ok(previous)
    }

    pub fn verify_territories(&self) -> Result<(), TerritoryViolation> {
        self.ledger.verify(&self.rooms)
    }

    // -- NPCs --

    pub fn npc(&self, npc_id: NpcId) -> Option<&Npc> {
        self.npcs.get(&npc_id)
    }

    pub fn npcs(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.values()
    }

    pub fn npc_count(&self) -> usize {
        self.npcs.len()
    }

    /// NPCs standing in a room, in arrival order.
    pub fn npcs_in(&self, room_id: RoomId) -> Vec<&Npc> {
        self.rooms
            .get(room_id as usize)
            .map(|room| room.npcs.iter().filter_map(|id| self.npcs.get(id)).collect())
            .unwrap_or_default()
    }

    /// Create an NPC and append it to its room's list.
    pub fn spawn_npc(&mut self, spawn: NpcSpawn) -> Result<NpcId, WorldError> {
        let room = self
            .rooms
            .get_mut(spawn.room_id as usize)
            .ok_or(WorldError::RoomNotFound {
                room_id: spawn.room_id,
            })?;
        let id = self.id_gen.next_npc();
        room.npcs.push(id);
        self.npcs.insert(
            id,
            Npc {
                id,
                name: spawn.name,
                personality: spawn.personality,
                affiliation: spawn.affiliation,
                roles: spawn.roles,
                room_id: spawn.room_id,
            },
        );
        Ok(id)
    }

    /// Remove an NPC from the world: its room list, the arena and any group.
    pub fn despawn_npc(&mut self, npc_id: NpcId) -> Result<Npc, WorldError> {
        let npc = self
            .npcs
            .remove(&npc_id)
            .ok_or(WorldError::NpcNotFound { npc_id })?;
        if let Some(room) = self.rooms.get_mut(npc.room_id as usize) {
            room.npcs.retain(|&id| id != npc_id);
        }
        for group in self.patrols.iter_mut().chain(self.caravans.iter_mut()) {
            group.members.retain(|&id| id != npc_id);
        }
        Ok(npc)
    }

    /// Move a single NPC: out of the old room's list, onto the end of the new
    /// one, with its room id updated.
    pub(crate) fn relocate_npc(&mut self, npc_id: NpcId, to: RoomId) -> Result<(), WorldError> {
        if to as usize >= self.rooms.len() {
            return Err(WorldError::RoomNotFound { room_id: to });
        }
        let npc = self
            .npcs
            .get_mut(&npc_id)
            .ok_or(WorldError::NpcNotFound { npc_id })?;
        let from = npc.room_id;
        npc.room_id = to;
        self.rooms[from as usize].npcs.retain(|&id| id != npc_id);
        self.rooms[to as usize].npcs.push(npc_id);
        Ok(())
    }

    // -- Groups --

    pub fn patrols(&self) -> &[Group] {
        &self.patrols
    }

    pub fn caravans(&self) -> &[Group] {
        &self.caravans
    }

    pub fn group(&self, group_ref: GroupRef) -> Option<&Group> {
        self.groups(group_ref.kind).get(group_ref.index)
    }

    fn groups(&self, kind: GroupKind) -> &Vec<Group> {
        match kind {
            GroupKind::Patrol => &self.patrols,
            GroupKind::Caravan => &self.caravans,
        }
    }

    fn groups_mut(&mut self, kind: GroupKind) -> &mut Vec<Group> {
        match kind {
            GroupKind::Patrol => &mut self.patrols,
            GroupKind::Caravan => &mut self.caravans,
        }
    }

    /// Register an empty group stationed in `room_id`.
    pub fn form_group(
        &mut self,
        kind: GroupKind,
        affiliation: Affiliation,
        room_id: RoomId,
    ) -> Result<GroupRef, WorldError> {
        self.get_room(room_id)?;
        let groups = self.groups_mut(kind);
        groups.push(Group::new(kind, affiliation, room_id));
        Ok(GroupRef {
            kind,
            index: groups.len() - 1,
        })
    }

    /// Spawn an NPC directly into a group, in the group's room.
    pub fn enlist(&mut self, group_ref: GroupRef, spawn: NpcSpawn) -> Result<NpcId, WorldError> {
        let room_id = self
            .group(group_ref)
            .map(Group::room_id)
            .ok_or(WorldError::GroupNotFound(group_ref))?;
        let id = self.spawn_npc(NpcSpawn { room_id, ..spawn })?;
        self.groups_mut(group_ref.kind)[group_ref.index]
            .members
            .push(id);
        Ok(id)
    }

    /// Remove every member of a group from the world. The group stays listed,
    /// empty. Returns the removed members.
    pub fn disband_group(&mut self, group_ref: GroupRef) -> Vec<NpcId> {
        let members = self
            .group(group_ref)
            .map(|g| g.members.clone())
            .unwrap_or_default();
        for &npc_id in &members {
            if let Err(err) = self.despawn_npc(npc_id) {
                tracing::warn!(%err, "group member vanished before disbanding");
            }
        }
        members
    }

    /// Move every member of a group to `to` as one unit.
    pub(crate) fn relocate_group(&mut self, group_ref: GroupRef, to: RoomId) -> Result<(), WorldError> {
        if to as usize >= self.rooms.len() {
            return Err(WorldError::RoomNotFound { room_id: to });
        }
        let members = match self.group(group_ref) {
            Some(group) => group.members.clone(),
            None => return Ok(()),
        };
        for npc_id in members {
            self.relocate_npc(npc_id, to)?;
        }
        self.groups_mut(group_ref.kind)[group_ref.index].room_id = to;
        Ok(())
    }

    // -- Individual movers --

    pub fn emissaries(&self) -> &[NpcId] {
        &self.emissaries
    }

    pub fn wandering_npcs(&self) -> &[NpcId] {
        &self.wandering_npcs
    }

    pub(crate) fn register_emissary(&mut self, npc_id: NpcId) {
        self.emissaries.push(npc_id);
    }

    pub(crate) fn register_wanderer(&mut self, npc_id: NpcId) {
        self.wandering_npcs.push(npc_id);
    }

    // -- Animals --

    pub fn animal(&self, animal_id: AnimalId) -> Option<&Animal> {
        self.animals.get(&animal_id)
    }

    pub fn animals(&self) -> impl Iterator<Item = &Animal> {
        self.animals.values()
    }

    pub fn animals_in(&self, room_id: RoomId) -> Vec<&Animal> {
        self.rooms
            .get(room_id as usize)
            .map(|room| {
                room.animals
                    .iter()
                    .filter_map(|id| self.animals.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Place a new animal. Its biome is the room's biome.
    pub fn spawn_animal(
        &mut self,
        name: &str,
        hostile: bool,
        personality: &str,
        room_id: RoomId,
    ) -> Result<AnimalId, WorldError> {
        let room = self
            .rooms
            .get_mut(room_id as usize)
            .ok_or(WorldError::RoomNotFound { room_id })?;
        let id = self.id_gen.next_animal();
        room.animals.push(id);
        self.animals.insert(
            id,
            Animal {
                id,
                name: name.to_string(),
                hostile,
                biome: room.biome,
                personality: personality.to_string(),
                room_id,
            },
        );
        Ok(id)
    }

    pub(crate) fn relocate_animal(&mut self, animal_id: AnimalId, to: RoomId) -> Result<(), WorldError> {
        if to as usize >= self.rooms.len() {
            return Err(WorldError::RoomNotFound { room_id: to });
        }
        let Some(animal) = self.animals.get_mut(&animal_id) else {
            return Ok(());
        };
        let from = animal.room_id;
        animal.room_id = to;
        self.rooms[from as usize].animals.retain(|&id| id != animal_id);
        self.rooms[to as usize].animals.push(animal_id);
        Ok(())
    }
}
