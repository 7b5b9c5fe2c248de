use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::id::{NpcId, RoomId};
use crate::model::{Affiliation, Biome, FactionDef, FactionRegistry, NpcSpawn, World};
use crate::sim::{SimEvent, SimSystem, TickContext};
use crate::worldgen::grid::build_grid;

// ---------------------------------------------------------------------------
// World builders
// ---------------------------------------------------------------------------

/// "Alpha" (forest) and "Beta" (plains) with the given aggressions.
pub fn two_factions(alpha_aggression: f64, beta_aggression: f64) -> FactionRegistry {
    FactionRegistry::new(vec![
        FactionDef::new("Alpha", Biome::Forest, "stern", alpha_aggression),
        FactionDef::new("Beta", Biome::Plains, "proud", beta_aggression),
    ])
    .expect("test factions are valid")
}

/// A `size`×`size` plains grid with no owners, people or animals.
pub fn blank_world(size: u32, factions: FactionRegistry) -> World {
    build_grid(size, factions, |_| Biome::Plains)
}

/// Drop a plain NPC into a room.
pub fn place_npc(world: &mut World, affiliation: Option<Affiliation>, room_id: RoomId) -> NpcId {
    let mut spawn = NpcSpawn::new("Bystander", "neutral", room_id);
    spawn.affiliation = affiliation;
    world.spawn_npc(spawn).expect("room exists")
}

// ---------------------------------------------------------------------------
// Tick execution helpers
// ---------------------------------------------------------------------------

/// Run one step function against the world with a seeded RNG. Returns the
/// step's result and every event it emitted.
pub fn run_step<R>(
    world: &mut World,
    seed: u64,
    step: impl FnOnce(&mut TickContext) -> R,
) -> (R, Vec<SimEvent>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut events = Vec::new();
    let mut ctx = TickContext {
        world,
        rng: &mut rng,
        events: &mut events,
    };
    let result = step(&mut ctx);
    (result, events)
}

/// Run a single system tick. Returns emitted events.
pub fn tick_system(world: &mut World, system: &mut dyn SimSystem, seed: u64) -> Vec<SimEvent> {
    run_step(world, seed, |ctx| system.tick(ctx)).1
}

/// Tick a system on `days` consecutive seeds starting at `seed`.
pub fn tick_days(
    world: &mut World,
    system: &mut dyn SimSystem,
    days: u64,
    seed: u64,
) -> Vec<SimEvent> {
    (0..days)
        .flat_map(|day| tick_system(world, system, seed + day))
        .collect()
}
