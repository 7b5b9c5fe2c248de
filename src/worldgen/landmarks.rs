use rand::{Rng, RngCore};

use crate::model::{RoomTag, World};

/// Independent per-room rolls. A room can end up with any combination.
const LANDMARK_CHANCES: [(RoomTag, f64); 4] = [
    (RoomTag::Campfire, 0.04),
    (RoomTag::Shrine, 0.03),
    (RoomTag::Treasure, 0.03),
    (RoomTag::Miniboss, 0.01),
];

/// Roll the special tags for every room.
pub fn mark_landmarks(world: &mut World, rng: &mut dyn RngCore) {
    let room_count = world.room_count() as u32;
    for room_id in 0..room_count {
        let Ok(room) = world.room_mut(room_id) else {
            continue;
        };
        for (tag, chance) in LANDMARK_CHANCES {
            if rng.random_bool(chance) {
                room.tags.insert(tag);
            }
        }
    }
}
