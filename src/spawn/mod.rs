//! One-time population of a freshly generated map.

mod factions;
mod locals;

use rand::RngCore;

use crate::error::WorldError;
use crate::model::World;

pub use factions::{
    assign_faction_territories, spawn_camps, spawn_defender, spawn_emissaries, spawn_emissary,
    spawn_patrol, spawn_patrols,
};
pub use locals::{
    spawn_ambient_npcs, spawn_ambushers, spawn_caravans, spawn_legendary_npcs,
    spawn_questgivers, spawn_shrine_guardians, spawn_storytellers,
};

/// Run every spawn pass in order. Territories come first so that camps,
/// which claim their rooms for their faction, overwrite them cleanly.
pub fn populate_world(world: &mut World, rng: &mut dyn RngCore) -> Result<(), WorldError> {
    if world.room_count() == 0 {
        return Ok(());
    }

    assign_faction_territories(world, rng)?;
    spawn_ambient_npcs(world, rng)?;
    spawn_shrine_guardians(world)?;
    spawn_camps(world, rng)?;
    spawn_patrols(world, rng)?;
    spawn_caravans(world, rng)?;
    spawn_emissaries(world, rng)?;
    spawn_legendary_npcs(world, rng)?;
    spawn_storytellers(world, rng)?;
    spawn_questgivers(world)?;
    spawn_ambushers(world, rng)?;

    tracing::info!(
        npcs = world.npc_count(),
        patrols = world.patrols().len(),
        caravans = world.caravans().len(),
        "world populated"
    );
    Ok(())
}
