use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngCore};

use crate::error::WorldError;
use crate::id::{NpcId, RoomId};
use crate::model::{
    Affiliation, Biome, FactionId, GroupKind, GroupRef, NpcSpawn, Roles, RoomTag, World,
};

const TERRITORY_MIN: usize = 8;
const TERRITORY_MAX: usize = 15;
const CAMPS_MIN: usize = 2;
const CAMPS_MAX: usize = 4;
const CAMP_DEFENDERS_MIN: usize = 2;
const CAMP_DEFENDERS_MAX: usize = 4;
const PATROLS_MIN: usize = 2;
const PATROLS_MAX: usize = 4;
const PATROL_SIZE_MIN: usize = 3;
const PATROL_SIZE_MAX: usize = 5;
const EMISSARIES_PER_FACTION: usize = 2;

/// `(id, name, home biome)` for every faction, in registry order.
fn faction_roster(world: &World) -> Vec<(FactionId, String, Biome)> {
    world
        .factions()
        .iter()
        .map(|(id, def)| (id, def.name.clone(), def.home_biome))
        .collect()
}

/// Give each faction 8–15 rooms of its home biome, sampled without
/// replacement. Factions whose biome is absent from the map get nothing.
///
/// Claims go through `World::claim_room`, so if two factions share a home
/// biome the later one in registry order takes any overlapping room and the
/// earlier one's territory drops it.
pub fn assign_faction_territories(
    world: &mut World,
    rng: &mut dyn RngCore,
) -> Result<(), WorldError> {
    for (faction, name, biome) in faction_roster(world) {
        let mut candidates = world.rooms_in_biome(biome);
        if candidates.is_empty() {
            tracing::debug!(faction = %name, %biome, "no home rooms, territory skipped");
            continue;
        }
        let target = rng
            .random_range(TERRITORY_MIN..=TERRITORY_MAX)
            .min(candidates.len());
        candidates.shuffle(rng);
        for &room_id in &candidates[..target] {
            world.claim_room(room_id, faction)?;
        }
        tracing::debug!(faction = %name, rooms = target, "territory assigned");
    }
    Ok(())
}

/// Spawn one defender of `faction` into a room.
pub fn spawn_defender(
    world: &mut World,
    faction: FactionId,
    room_id: RoomId,
) -> Result<NpcId, WorldError> {
    let name = world
        .factions()
        .get(faction)
        .map(|def| format!("{} Defender", def.name))
        .ok_or(WorldError::UnknownFaction(faction))?;
    world.spawn_npc(
        NpcSpawn::new(name, "serious", room_id)
            .affiliated(Affiliation::Faction(faction))
            .with_roles(Roles::DEFENDER),
    )
}

/// 2–4 camps per faction in uniformly random rooms, each tagged, claimed for
/// the faction and garrisoned by 2–4 defenders.
pub fn spawn_camps(world: &mut World, rng: &mut dyn RngCore) -> Result<(), WorldError> {
    let room_count = world.room_count() as RoomId;
    if room_count == 0 {
        return Ok(());
    }
    for (faction, name, _) in faction_roster(world) {
        let camps = rng.random_range(CAMPS_MIN..=CAMPS_MAX);
        for _ in 0..camps {
            let room_id = rng.random_range(0..room_count);
            world.room_mut(room_id)?.tags.insert(RoomTag::Camp);
            let previous = world.claim_room(room_id, faction)?;
            if previous.is_some_and(|p| p != faction) {
                tracing::debug!(faction = %name, room_id, ?previous, "camp overrides earlier claim");
            }
            for _ in 0..rng.random_range(CAMP_DEFENDERS_MIN..=CAMP_DEFENDERS_MAX) {
                spawn_defender(world, faction, room_id)?;
            }
        }
    }
    tracing::debug!("camps spawned");
    Ok(())
}

/// Form a patrol of `size` guards for `faction` in `room_id`.
pub fn spawn_patrol(
    world: &mut World,
    faction: FactionId,
    room_id: RoomId,
    size: usize,
) -> Result<GroupRef, WorldError> {
    let name = world
        .factions()
        .get(faction)
        .map(|def| format!("{} Guard", def.name))
        .ok_or(WorldError::UnknownFaction(faction))?;
    let patrol = world.form_group(GroupKind::Patrol, Affiliation::Faction(faction), room_id)?;
    for _ in 0..size {
        world.enlist(
            patrol,
            NpcSpawn::new(name.clone(), "serious", room_id)
                .affiliated(Affiliation::Faction(faction))
                .with_roles(Roles::PATROLLER),
        )?;
    }
    Ok(patrol)
}

/// 2–4 patrols of 3–5 guards per faction, each starting in a home-biome room.
pub fn spawn_patrols(world: &mut World, rng: &mut dyn RngCore) -> Result<(), WorldError> {
    for (faction, _, biome) in faction_roster(world) {
        let home = world.rooms_in_biome(biome);
        if home.is_empty() {
            continue;
        }
        for _ in 0..rng.random_range(PATROLS_MIN..=PATROLS_MAX) {
            let Some(&start) = home.choose(rng) else {
                break;
            };
            let size = rng.random_range(PATROL_SIZE_MIN..=PATROL_SIZE_MAX);
            spawn_patrol(world, faction, start, size)?;
        }
    }
    tracing::debug!(patrols = world.patrols().len(), "patrols spawned");
    Ok(())
}

/// Place a single emissary of `faction` and register it as one.
pub fn spawn_emissary(
    world: &mut World,
    faction: FactionId,
    room_id: RoomId,
) -> Result<NpcId, WorldError> {
    let name = world
        .factions()
        .get(faction)
        .map(|def| format!("{} Emissary", def.name))
        .ok_or(WorldError::UnknownFaction(faction))?;
    let id = world.spawn_npc(
        NpcSpawn::new(name, "serious", room_id)
            .affiliated(Affiliation::Faction(faction))
            .with_roles(Roles::EMISSARY),
    )?;
    world.register_emissary(id);
    Ok(id)
}

/// Two emissaries per faction, in home-biome rooms.
pub fn spawn_emissaries(world: &mut World, rng: &mut dyn RngCore) -> Result<(), WorldError> {
    for (faction, _, biome) in faction_roster(world) {
        let home = world.rooms_in_biome(biome);
        for _ in 0..EMISSARIES_PER_FACTION {
            let Some(&room_id) = home.choose(rng) else {
                break;
            };
            spawn_emissary(world, faction, room_id)?;
        }
    }
    tracing::debug!(emissaries = world.emissaries().len(), "emissaries spawned");
    Ok(())
}
