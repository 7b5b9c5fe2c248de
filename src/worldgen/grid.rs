use std::collections::BTreeMap;

use crate::id::RoomId;
use crate::model::{Biome, Direction, FactionRegistry, Room, World};

/// `(x, y)` of a room in a grid of side `size`.
pub fn grid_position(room_id: RoomId, size: u32) -> (u32, u32) {
    (room_id % size, room_id / size)
}

/// Exits derived purely from grid position: one per direction that does not
/// fall off the edge.
pub fn exits_for(room_id: RoomId, size: u32) -> BTreeMap<Direction, RoomId> {
    let (x, y) = grid_position(room_id, size);
    let mut exits = BTreeMap::new();
    if x > 0 {
        exits.insert(Direction::West, room_id - 1);
    }
    if x + 1 < size {
        exits.insert(Direction::East, room_id + 1);
    }
    if y > 0 {
        exits.insert(Direction::North, room_id - size);
    }
    if y + 1 < size {
        exits.insert(Direction::South, room_id + size);
    }
    exits
}

/// Build a bare `size`×`size` grid: rooms, biomes and exits, nothing living.
///
/// Room ids are row-major. `biome_at` is called once per room in id order.
pub fn build_grid(
    size: u32,
    factions: FactionRegistry,
    mut biome_at: impl FnMut(RoomId) -> Biome,
) -> World {
    let rooms = (0..size * size)
        .map(|id| {
            let mut room = Room::new(id, biome_at(id));
            room.exits = exits_for(id, size);
            room
        })
        .collect();
    World::from_rooms(size, rooms, factions)
}
