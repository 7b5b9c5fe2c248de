use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::error::WorldError;
use crate::id::RoomId;
use crate::model::{Affiliation, Biome, GroupKind, NpcSpawn, Roles, RoomTag, World};

const AMBIENT_CHANCE: f64 = 0.55;
const AMBIENT_PERSONALITIES: &[&str] = &["curious", "friendly", "neutral"];
const LEGENDARY_CHANCE: f64 = 0.35;
const CARAVANS_MIN: usize = 2;
const CARAVANS_MAX: usize = 4;
const CARAVAN_GUARDS_MIN: usize = 1;
const CARAVAN_GUARDS_MAX: usize = 3;
const STORYTELLERS_MIN: usize = 1;
const STORYTELLERS_MAX: usize = 3;
const AMBUSHERS_MIN: usize = 2;
const AMBUSHERS_MAX: usize = 4;

/// `None` on a map with no rooms.
fn random_room(world: &World, rng: &mut dyn RngCore) -> Option<RoomId> {
    let room_count = world.room_count() as RoomId;
    (room_count > 0).then(|| rng.random_range(0..room_count))
}

fn room_ids_tagged(world: &World, tag: RoomTag) -> Vec<RoomId> {
    world
        .rooms()
        .iter()
        .filter(|r| r.has_tag(tag))
        .map(|r| r.id)
        .collect()
}

/// Each room has a 55% chance of an unaffiliated local drawn from its biome.
pub fn spawn_ambient_npcs(world: &mut World, rng: &mut dyn RngCore) -> Result<(), WorldError> {
    let rooms: Vec<(RoomId, Biome)> = world.rooms().iter().map(|r| (r.id, r.biome)).collect();
    for (room_id, biome) in rooms {
        if !rng.random_bool(AMBIENT_CHANCE) {
            continue;
        }
        let name = biome.ambient_names().choose(rng).copied().unwrap_or("Traveler");
        let personality = AMBIENT_PERSONALITIES
            .choose(rng)
            .copied()
            .unwrap_or("neutral");
        world.spawn_npc(NpcSpawn::new(name, personality, room_id))?;
    }
    Ok(())
}

/// One guardian per shrine. Swamp shrines are kept by the swamp-native
/// faction when the registry has one; every other shrine by the Mystics.
pub fn spawn_shrine_guardians(world: &mut World) -> Result<(), WorldError> {
    let swamp_keepers = world.factions().native_to(Biome::Swamp);
    for room_id in room_ids_tagged(world, RoomTag::Shrine) {
        let biome = world.get_room(room_id)?.biome;
        let affiliation = match swamp_keepers {
            Some(faction) if biome == Biome::Swamp => Affiliation::Faction(faction),
            _ => Affiliation::Mystics,
        };
        world.spawn_npc(
            NpcSpawn::new("Shrine Guardian", "serious", room_id)
                .affiliated(affiliation)
                .with_roles(Roles::GUARDIAN),
        )?;
    }
    Ok(())
}

/// 2–4 Free Trader caravans: a merchant leading 1–3 guards.
pub fn spawn_caravans(world: &mut World, rng: &mut dyn RngCore) -> Result<(), WorldError> {
    for _ in 0..rng.random_range(CARAVANS_MIN..=CARAVANS_MAX) {
        let Some(start) = random_room(world, rng) else {
            return Ok(());
        };
        let caravan = world.form_group(GroupKind::Caravan, Affiliation::FreeTraders, start)?;
        world.enlist(
            caravan,
            NpcSpawn::new("Caravan Trader", "friendly", start)
                .affiliated(Affiliation::FreeTraders)
                .with_roles(Roles::MERCHANT),
        )?;
        for _ in 0..rng.random_range(CARAVAN_GUARDS_MIN..=CARAVAN_GUARDS_MAX) {
            world.enlist(
                caravan,
                NpcSpawn::new("Caravan Guard", "serious", start)
                    .affiliated(Affiliation::FreeTraders)
                    .with_roles(Roles::CARAVAN_GUARD),
            )?;
        }
    }
    tracing::debug!(caravans = world.caravans().len(), "caravans spawned");
    Ok(())
}

/// Each biome present on the map has a 35% chance of hosting its legend.
pub fn spawn_legendary_npcs(world: &mut World, rng: &mut dyn RngCore) -> Result<(), WorldError> {
    let routes: Vec<(Biome, Vec<RoomId>)> = world
        .migration_routes
        .iter()
        .map(|(&biome, rooms)| (biome, rooms.clone()))
        .collect();
    for (biome, rooms) in routes {
        if rooms.is_empty() || !rng.random_bool(LEGENDARY_CHANCE) {
            continue;
        }
        let Some(&room_id) = rooms.choose(rng) else {
            continue;
        };
        let (name, personality) = biome.legendary();
        world.spawn_npc(NpcSpawn::new(name, personality, room_id).with_roles(Roles::LEGENDARY))?;
        tracing::debug!(name, room_id, "legendary npc spawned");
    }
    Ok(())
}

/// 1–3 storytellers who roam the map one room at a time.
pub fn spawn_storytellers(world: &mut World, rng: &mut dyn RngCore) -> Result<(), WorldError> {
    for _ in 0..rng.random_range(STORYTELLERS_MIN..=STORYTELLERS_MAX) {
        let Some(room_id) = random_room(world, rng) else {
            return Ok(());
        };
        let id = world.spawn_npc(
            NpcSpawn::new("Wandering Storyteller", "curious", room_id)
                .with_roles(Roles::STORYTELLER),
        )?;
        world.register_wanderer(id);
    }
    Ok(())
}

/// A quest giver waits at every campfire.
pub fn spawn_questgivers(world: &mut World) -> Result<(), WorldError> {
    for room_id in room_ids_tagged(world, RoomTag::Campfire) {
        world.spawn_npc(
            NpcSpawn::new("Weathered Veteran", "serious", room_id).with_roles(Roles::QUESTGIVER),
        )?;
    }
    Ok(())
}

/// 2–4 bandits lying in wait in random rooms.
pub fn spawn_ambushers(world: &mut World, rng: &mut dyn RngCore) -> Result<(), WorldError> {
    for _ in 0..rng.random_range(AMBUSHERS_MIN..=AMBUSHERS_MAX) {
        let Some(room_id) = random_room(world, rng) else {
            return Ok(());
        };
        world.spawn_npc(
            NpcSpawn::new("Bandit Ambusher", "hostile", room_id)
                .affiliated(Affiliation::Bandits)
                .with_roles(Roles::AMBUSHER),
        )?;
    }
    Ok(())
}
