//! Per-move relocation of everything that walks on its own.
//!
//! Order within a tick: patrols, caravans, emissaries, wanderers, herds,
//! predators. Groups always move as one unit.

use rand::RngCore;
use rand::seq::IndexedRandom;

use super::context::TickContext;
use super::event::SimEvent;
use super::system::{SimSystem, TickFrequency};
use crate::error::WorldError;
use crate::id::{AnimalId, NpcId, RoomId};
use crate::model::{GroupKind, GroupRef, World};

/// A room holding at least this many animals moves them as one herd.
pub const MIN_HERD_SIZE: usize = 2;

pub struct MobilitySystem;

impl SimSystem for MobilitySystem {
    fn name(&self) -> &str {
        "mobility"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::PerMove
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        if let Err(err) = move_all(ctx) {
            tracing::warn!(%err, "mobility tick aborted");
        }
    }
}

pub fn move_all(ctx: &mut TickContext) -> Result<(), WorldError> {
    move_groups(ctx, GroupKind::Patrol)?;
    move_groups(ctx, GroupKind::Caravan)?;
    let emissaries = ctx.world.emissaries().to_vec();
    move_individuals(ctx, &emissaries)?;
    let wanderers = ctx.world.wandering_npcs().to_vec();
    move_individuals(ctx, &wanderers)?;
    move_herds(ctx)?;
    hunt_prey(ctx)?;
    Ok(())
}

fn random_exit(
    world: &World,
    room_id: RoomId,
    rng: &mut dyn RngCore,
) -> Result<Option<RoomId>, WorldError> {
    let neighbors = world.get_room(room_id)?.neighbors();
    Ok(neighbors.choose(rng).copied())
}

/// Every non-empty group of `kind` steps through one random exit together.
pub fn move_groups(ctx: &mut TickContext, kind: GroupKind) -> Result<(), WorldError> {
    let count = match kind {
        GroupKind::Patrol => ctx.world.patrols().len(),
        GroupKind::Caravan => ctx.world.caravans().len(),
    };
    for index in 0..count {
        let group = GroupRef { kind, index };
        let from = match ctx.world.group(group) {
            Some(g) if !g.is_empty() => g.room_id(),
            _ => continue,
        };
        let Some(to) = random_exit(ctx.world, from, ctx.rng)? else {
            continue;
        };
        ctx.world.relocate_group(group, to)?;
        ctx.emit(SimEvent::GroupMoved { group, from, to });
    }
    Ok(())
}

/// Each listed NPC that still exists takes one random exit on its own.
pub fn move_individuals(ctx: &mut TickContext, npc_ids: &[NpcId]) -> Result<(), WorldError> {
    for &npc_id in npc_ids {
        let Some(from) = ctx.world.npc(npc_id).map(|npc| npc.room_id()) else {
            continue;
        };
        let Some(to) = random_exit(ctx.world, from, ctx.rng)? else {
            continue;
        };
        ctx.world.relocate_npc(npc_id, to)?;
        ctx.emit(SimEvent::NpcMoved { npc_id, from, to });
    }
    Ok(())
}

/// Herds are taken as they stand at the start of the step, so a herd that
/// walks into another herd's room does not move again.
pub fn move_herds(ctx: &mut TickContext) -> Result<(), WorldError> {
    let herds: Vec<(RoomId, Vec<AnimalId>)> = ctx
        .world
        .rooms()
        .iter()
        .filter(|room| room.animals().len() >= MIN_HERD_SIZE)
        .map(|room| (room.id, room.animals().to_vec()))
        .collect();

    for (from, animals) in herds {
        let Some(to) = random_exit(ctx.world, from, ctx.rng)? else {
            continue;
        };
        for &animal_id in &animals {
            ctx.world.relocate_animal(animal_id, to)?;
        }
        ctx.emit(SimEvent::HerdMoved { animals, from, to });
    }
    Ok(())
}

/// A hostile animal with no prey beside it moves to the first neighbour, in
/// exit order, that has some.
pub fn hunt_prey(ctx: &mut TickContext) -> Result<(), WorldError> {
    let predators: Vec<AnimalId> = ctx
        .world
        .rooms()
        .iter()
        .flat_map(|room| ctx.world.animals_in(room.id))
        .filter(|animal| animal.hostile)
        .map(|animal| animal.id)
        .collect();

    for animal_id in predators {
        let Some(from) = ctx.world.animal(animal_id).map(|a| a.room_id()) else {
            continue;
        };
        if has_prey(ctx.world, from) {
            continue;
        }
        let target = ctx
            .world
            .get_room(from)?
            .neighbors()
            .into_iter()
            .find(|&n| has_prey(ctx.world, n));
        if let Some(to) = target {
            ctx.world.relocate_animal(animal_id, to)?;
            ctx.emit(SimEvent::PredatorHunted { animal_id, from, to });
        }
    }
    Ok(())
}

fn has_prey(world: &World, room_id: RoomId) -> bool {
    world.animals_in(room_id).iter().any(|animal| animal.is_prey())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Affiliation, FactionId};
    use crate::spawn::{spawn_emissary, spawn_patrol};
    use crate::testutil::{blank_world, place_npc, run_step, two_factions};

    #[test]
    fn patrol_moves_as_one_to_a_neighbour() {
        let mut world = blank_world(4, two_factions(0.5, 0.5));
        let patrol = spawn_patrol(&mut world, FactionId(0), 5, 4).unwrap();
        for seed in 0..25 {
            let before = world.group(patrol).unwrap().room_id();
            let (result, events) =
                run_step(&mut world, seed, |ctx| move_groups(ctx, GroupKind::Patrol));
            result.unwrap();
            let group = world.group(patrol).unwrap();
            let neighbors = world.get_room(before).unwrap().neighbors();
            assert!(neighbors.contains(&group.room_id()));
            for &member in group.members() {
                assert_eq!(world.npc(member).unwrap().room_id(), group.room_id());
            }
            assert_eq!(world.npcs_in(group.room_id()).len(), 4);
            assert_eq!(events.len(), 1);
        }
    }

    #[test]
    fn wiped_out_group_stays_put() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        let patrol = spawn_patrol(&mut world, FactionId(1), 4, 2).unwrap();
        world.disband_group(patrol);
        let (result, events) =
            run_step(&mut world, 8, |ctx| move_groups(ctx, GroupKind::Patrol));
        result.unwrap();
        assert!(events.is_empty());
        assert_eq!(world.group(patrol).unwrap().room_id(), 4);
    }

    #[test]
    fn lone_room_has_nowhere_to_go() {
        let mut world = blank_world(1, two_factions(0.5, 0.5));
        spawn_patrol(&mut world, FactionId(0), 0, 3).unwrap();
        let envoy = spawn_emissary(&mut world, FactionId(0), 0).unwrap();
        let (result, events) = run_step(&mut world, 8, move_all);
        result.unwrap();
        assert!(events.is_empty());
        assert_eq!(world.npc(envoy).unwrap().room_id(), 0);
    }

    #[test]
    fn despawned_emissary_is_skipped() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        let gone = spawn_emissary(&mut world, FactionId(0), 4).unwrap();
        let kept = spawn_emissary(&mut world, FactionId(1), 4).unwrap();
        world.despawn_npc(gone).unwrap();
        let emissaries = world.emissaries().to_vec();
        let (result, events) =
            run_step(&mut world, 2, |ctx| move_individuals(ctx, &emissaries));
        result.unwrap();
        assert_eq!(events.len(), 1);
        assert_ne!(world.npc(kept).unwrap().room_id(), 4);
        assert_eq!(world.npcs_in(4).len(), 0);
    }

    #[test]
    fn bystanders_do_not_move() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        let local = place_npc(&mut world, Some(Affiliation::Mystics), 4);
        let (result, _) = run_step(&mut world, 1, move_all);
        result.unwrap();
        assert_eq!(world.npc(local).unwrap().room_id(), 4);
    }

    #[test]
    fn herd_moves_together_and_singletons_stay() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        let deer = world.spawn_animal("Deer", false, "calm", 4).unwrap();
        let elk = world.spawn_animal("Elk", false, "calm", 4).unwrap();
        let hare = world.spawn_animal("Hare", false, "shy", 0).unwrap();

        let (result, events) = run_step(&mut world, 6, move_herds);
        result.unwrap();
        assert_eq!(events.len(), 1);
        let to = world.animal(deer).unwrap().room_id();
        assert_ne!(to, 4);
        assert_eq!(world.animal(elk).unwrap().room_id(), to);
        assert_eq!(world.animal(hare).unwrap().room_id(), 0);
        assert!(world.get_room(4).unwrap().animals().is_empty());
    }

    #[test]
    fn predator_follows_prey_in_exit_order() {
        // 3×3: room 4 has exits west 3, east 5, north 1, south 7
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        let wolf = world.spawn_animal("Wolf", true, "hungry", 4).unwrap();
        world.spawn_animal("Rabbit", false, "shy", 1).unwrap();
        world.spawn_animal("Rabbit", false, "shy", 5).unwrap();

        let (result, events) = run_step(&mut world, 0, hunt_prey);
        result.unwrap();
        assert_eq!(world.animal(wolf).unwrap().room_id(), 5);
        assert_eq!(
            events,
            vec![SimEvent::PredatorHunted {
                animal_id: wolf,
                from: 4,
                to: 5
            }]
        );
    }

    #[test]
    fn predator_with_prey_at_hand_stays() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        let wolf = world.spawn_animal("Wolf", true, "hungry", 4).unwrap();
        world.spawn_animal("Rabbit", false, "shy", 4).unwrap();
        world.spawn_animal("Rabbit", false, "shy", 3).unwrap();
        let (result, events) = run_step(&mut world, 0, hunt_prey);
        result.unwrap();
        assert!(events.is_empty());
        assert_eq!(world.animal(wolf).unwrap().room_id(), 4);
    }

    #[test]
    fn predator_ignores_other_predators() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        let wolf = world.spawn_animal("Wolf", true, "hungry", 4).unwrap();
        world.spawn_animal("Bear", true, "grumpy", 3).unwrap();
        let (result, _) = run_step(&mut world, 0, hunt_prey);
        result.unwrap();
        assert_eq!(world.animal(wolf).unwrap().room_id(), 4);
    }
}
