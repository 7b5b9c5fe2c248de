mod common;

use frontier_sim::model::Direction;
use frontier_sim::testutil::{blank_world, two_factions};
use frontier_sim::worldgen::grid::grid_position;
use frontier_sim::{
    ConfigError, Error, FactionRegistry, WorldError, WorldGenConfig, generate_map, generate_world,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use common::assert_placement_consistent;

#[test]
fn grid_has_n_squared_rooms_with_positional_exits() {
    for size in [1, 2, 5, 9] {
        let mut rng = SmallRng::seed_from_u64(size as u64);
        let world = generate_map(size, FactionRegistry::default(), &mut rng).unwrap();
        assert_eq!(world.room_count(), (size * size) as usize);

        for room in world.rooms() {
            let (x, y) = grid_position(room.id, size);
            let exit = |dir| room.exits.get(&dir).copied();
            assert_eq!(exit(Direction::East), (x + 1 < size).then(|| room.id + 1));
            assert_eq!(exit(Direction::West), (x > 0).then(|| room.id - 1));
            assert_eq!(exit(Direction::South), (y + 1 < size).then(|| room.id + size));
            assert_eq!(exit(Direction::North), (y > 0).then(|| room.id - size));
        }
    }
}

#[test]
fn exits_are_reciprocal() {
    let mut rng = SmallRng::seed_from_u64(3);
    let world = generate_map(7, FactionRegistry::default(), &mut rng).unwrap();
    for room in world.rooms() {
        for (&dir, &to) in &room.exits {
            let back = world.get_room(to).unwrap().exits.get(&dir.opposite());
            assert_eq!(back, Some(&room.id));
        }
    }
}

#[test]
fn missing_room_is_not_found() {
    let world = blank_world(3, two_factions(0.5, 0.5));
    assert_eq!(
        world.get_room(9).unwrap_err(),
        WorldError::RoomNotFound { room_id: 9 }
    );
}

#[test]
fn fresh_three_by_three_minimap() {
    let world = blank_world(3, two_factions(0.5, 0.5));
    let map = world.ascii_minimap(0);
    let lines: Vec<&str> = map.lines().collect();
    assert_eq!(lines, vec!["P..", "...", "..."]);
}

#[test]
fn same_seed_same_world() {
    let config = WorldGenConfig {
        seed: 1234,
        size: 10,
        ..WorldGenConfig::default()
    };
    let a = generate_world(&config).unwrap();
    let b = generate_world(&config).unwrap();
    assert_eq!(a.ascii_minimap(0), b.ascii_minimap(0));
    assert_eq!(a.npc_count(), b.npc_count());
    for (ra, rb) in a.rooms().iter().zip(b.rooms()) {
        assert_eq!(ra.biome, rb.biome);
        assert_eq!(ra.npcs(), rb.npcs());
        assert_eq!(ra.animals(), rb.animals());
    }
}

#[test]
fn populated_world_is_consistent() {
    for seed in [1, 42, 99] {
        let config = WorldGenConfig {
            seed,
            ..WorldGenConfig::default()
        };
        let world = generate_world(&config).unwrap();
        assert_eq!(world.room_count(), 225);
        world.verify_territories().unwrap();
        assert_placement_consistent(&world);
        assert!(!world.patrols().is_empty());
        assert!(!world.caravans().is_empty());
        assert!(!world.emissaries().is_empty());
        for camp in common::camp_rooms(&world) {
            assert!(world.get_room(camp).unwrap().faction_control().is_some());
        }
    }
}

#[test]
fn bad_config_is_rejected() {
    let zero = WorldGenConfig {
        size: 0,
        ..WorldGenConfig::default()
    };
    assert!(matches!(
        generate_world(&zero),
        Err(Error::Config(ConfigError::ZeroSize))
    ));

    let json = r#"{ "factions": [
        { "name": "Wild", "home_biome": "forest", "personality": "mad", "aggression": 1.5 }
    ] }"#;
    assert!(matches!(
        WorldGenConfig::from_json(json),
        Err(ConfigError::AggressionOutOfRange { .. })
    ));
}
