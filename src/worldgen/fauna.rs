use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};

use crate::error::WorldError;
use crate::model::animal::ANIMAL_PERSONALITIES;
use crate::model::{RoomTag, World};

const ANIMAL_CHANCE: f64 = 0.75;
const MIN_ANIMALS: usize = 1;
const MAX_ANIMALS: usize = 3;
const DEN_CHANCE: f64 = 0.10;

/// Seed wildlife room by room. Each room independently rolls for 1–3
/// animals from its biome pool (drawn with replacement), then separately for
/// being a den.
pub fn seed_animals(world: &mut World, rng: &mut dyn RngCore) -> Result<(), WorldError> {
    let rooms: Vec<_> = world.rooms().iter().map(|r| (r.id, r.biome)).collect();

    for (room_id, biome) in rooms {
        if rng.random_bool(ANIMAL_CHANCE) {
            let count = rng.random_range(MIN_ANIMALS..=MAX_ANIMALS);
            for _ in 0..count {
                let Some(&(name, hostile)) = biome.animal_pool().choose(rng) else {
                    break;
                };
                let personality = ANIMAL_PERSONALITIES
                    .choose(rng)
                    .copied()
                    .unwrap_or("timid");
                world.spawn_animal(name, hostile, personality, room_id)?;
            }
        }

        if rng.random_bool(DEN_CHANCE) {
            world.room_mut(room_id)?.tags.insert(RoomTag::Den);
            world.animal_dens.push(room_id);
        }
    }

    tracing::debug!(
        animals = world.animals().count(),
        dens = world.animal_dens.len(),
        "wildlife seeded"
    );
    Ok(())
}
