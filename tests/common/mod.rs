#![allow(dead_code)]

use frontier_sim::World;
use frontier_sim::model::{Group, RoomTag};

/// Every NPC sits in exactly the room list its room id names, and every
/// group's members share the group's room.
pub fn assert_placement_consistent(world: &World) {
    for npc in world.npcs() {
        let holders: Vec<_> = world
            .rooms()
            .iter()
            .filter(|room| room.npcs().contains(&npc.id))
            .map(|room| room.id)
            .collect();
        assert_eq!(holders, vec![npc.room_id()], "{} misplaced", npc.id);
    }
    for animal in world.animals() {
        let holders = world
            .rooms()
            .iter()
            .filter(|room| room.animals().contains(&animal.id))
            .count();
        assert_eq!(holders, 1, "{} misplaced", animal.id);
        assert!(world.rooms()[animal.room_id() as usize].animals().contains(&animal.id));
    }
    for group in world.patrols().iter().chain(world.caravans()) {
        assert_group_together(world, group);
    }
}

pub fn assert_group_together(world: &World, group: &Group) {
    for &member in group.members() {
        let npc = world.npc(member).expect("group member exists");
        assert_eq!(npc.room_id(), group.room_id());
    }
}

pub fn camp_rooms(world: &World) -> Vec<u32> {
    world
        .rooms()
        .iter()
        .filter(|room| room.has_tag(RoomTag::Camp))
        .map(|room| room.id)
        .collect()
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
