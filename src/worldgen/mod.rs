pub mod config;
pub mod fauna;
pub mod grid;
pub mod landmarks;

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::error::{Error, WorldError};
use crate::model::{Biome, FactionRegistry, World};
use crate::spawn;

pub use config::WorldGenConfig;

/// Build the room graph: grid, uniformly random biomes (no clustering),
/// wildlife, dens, landmark tags and the biome route index.
pub fn generate_map(
    size: u32,
    factions: FactionRegistry,
    rng: &mut dyn RngCore,
) -> Result<World, WorldError> {
    let mut world = grid::build_grid(size, factions, |_| rng.random::<Biome>());
    fauna::seed_animals(&mut world, rng)?;
    landmarks::mark_landmarks(&mut world, rng);
    index_migration_routes(&mut world);
    world.start_room_id = 0;

    tracing::debug!(size, rooms = world.room_count(), "base map generated");
    Ok(world)
}

/// Group every room id by biome. Every biome gets an entry, possibly empty.
pub fn index_migration_routes(world: &mut World) {
    let mut routes: BTreeMap<Biome, Vec<_>> = Biome::ALL.iter().map(|&b| (b, Vec::new())).collect();
    for room in world.rooms() {
        routes.entry(room.biome).or_default().push(room.id);
    }
    world.migration_routes = routes;
}

/// Generate and populate a complete world from a config.
pub fn generate_world(config: &WorldGenConfig) -> Result<World, Error> {
    let factions = config.validate()?;
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut world = generate_map(config.size, factions, &mut rng)?;
    spawn::populate_world(&mut world, &mut rng)?;
    Ok(world)
}
