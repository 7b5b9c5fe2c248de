//! Daily faction war: expansion, reinforcement, patrol clashes, camp
//! conflicts and emissary diplomacy.
//!
//! Every ownership change goes through `World::claim_room`, so the room's
//! `faction_control` and the faction territory sets never disagree, even
//! mid-tick.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::context::TickContext;
use super::event::SimEvent;
use super::system::{SimSystem, TickFrequency};
use crate::error::WorldError;
use crate::id::{NpcId, RoomId};
use crate::model::{FactionId, GroupKind, GroupRef, RoomTag};
use crate::spawn::spawn_defender;

/// Upper bound on owned rooms a faction pushes out from in one day.
pub const MAX_EXPANSION_FRONTS: usize = 5;
/// Per-front claim chance is `aggression * EXPANSION_SCALE`.
pub const EXPANSION_SCALE: f64 = 0.25;
/// Defenders a faction adds to its own rooms each day.
pub const DEFENDERS_PER_DAY: usize = 2;

pub struct WarSystem;

impl SimSystem for WarSystem {
    fn name(&self) -> &str {
        "war"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Daily
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        if let Err(err) = simulate_faction_war(ctx) {
            tracing::warn!(%err, "faction war tick aborted");
        }
    }
}

/// One full day of war, in fixed order. Every faction expands before any
/// faction reinforces.
pub fn simulate_faction_war(ctx: &mut TickContext) -> Result<(), WorldError> {
    for room_id in 0..ctx.world.room_count() as RoomId {
        ctx.world.room_mut(room_id)?.contested = false;
    }

    let factions = ctx.world.factions().ids();
    for &faction in &factions {
        expand_territory(ctx, faction)?;
    }
    for &faction in &factions {
        reinforce_territory(ctx, faction)?;
    }
    resolve_patrol_clashes(ctx)?;
    resolve_camp_conflicts(ctx)?;
    resolve_emissary_actions(ctx)?;
    Ok(())
}

/// Pick up to five owned rooms and roll, for each of their neighbours not
/// already ours, a claim with probability `aggression * 0.25`. A neighbour
/// held by another faction changes hands.
pub fn expand_territory(ctx: &mut TickContext, faction: FactionId) -> Result<(), WorldError> {
    let aggression = ctx
        .world
        .factions()
        .get(faction)
        .map(|def| def.aggression)
        .ok_or(WorldError::UnknownFaction(faction))?;

    let mut fronts = ctx.world.ledger().owned_rooms(faction);
    if fronts.is_empty() {
        return Ok(());
    }
    fronts.shuffle(ctx.rng);
    fronts.truncate(MAX_EXPANSION_FRONTS);

    let chance = (aggression * EXPANSION_SCALE).clamp(0.0, 1.0);
    for from in fronts {
        for target in ctx.world.get_room(from)?.neighbors() {
            if ctx.world.get_room(target)?.faction_control() == Some(faction) {
                continue;
            }
            if !ctx.rng.random_bool(chance) {
                continue;
            }
            let previous = ctx.world.claim_room(target, faction)?;
            ctx.emit(SimEvent::RoomClaimed {
                room_id: target,
                faction,
                previous,
            });
        }
    }
    Ok(())
}

/// Garrison up to two random owned rooms with a new defender each.
pub fn reinforce_territory(ctx: &mut TickContext, faction: FactionId) -> Result<(), WorldError> {
    let mut owned = ctx.world.ledger().owned_rooms(faction);
    owned.shuffle(ctx.rng);
    owned.truncate(DEFENDERS_PER_DAY);
    for room_id in owned {
        let npc_id = spawn_defender(ctx.world, faction, room_id)?;
        ctx.emit(SimEvent::DefenderReinforced {
            room_id,
            faction,
            npc_id,
        });
    }
    Ok(())
}

/// Wherever patrols of two or more factions share a room, one of those
/// factions wins uniformly at random and every other faction's patrol there
/// loses all its members.
pub fn resolve_patrol_clashes(ctx: &mut TickContext) -> Result<(), WorldError> {
    let mut by_room: BTreeMap<RoomId, Vec<(usize, FactionId)>> = BTreeMap::new();
    for (index, patrol) in ctx.world.patrols().iter().enumerate() {
        if patrol.is_empty() {
            continue;
        }
        if let Some(faction) = patrol.faction() {
            by_room
                .entry(patrol.room_id())
                .or_default()
                .push((index, faction));
        }
    }

    for (room_id, present) in by_room {
        let factions: Vec<FactionId> = present
            .iter()
            .map(|&(_, faction)| faction)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if factions.len() < 2 {
            continue;
        }
        let Some(&winner) = factions.choose(ctx.rng) else {
            continue;
        };

        let mut eliminated = Vec::new();
        for (index, faction) in present {
            if faction != winner {
                eliminated.extend(ctx.world.disband_group(GroupRef {
                    kind: GroupKind::Patrol,
                    index,
                }));
            }
        }
        ctx.world.room_mut(room_id)?.contested = true;
        ctx.emit(SimEvent::PatrolClash {
            room_id,
            winner,
            losers: factions.into_iter().filter(|&f| f != winner).collect(),
            eliminated,
        });
    }
    Ok(())
}

/// A camp holding NPCs of two or more factions goes to one of them at
/// random. Everyone not of the winning faction is removed and the camp
/// room is claimed for the winner.
///
/// Only registered factions contest a camp; Mystics, Free Traders and
/// Bandits never start a conflict but are removed when one happens.
pub fn resolve_camp_conflicts(ctx: &mut TickContext) -> Result<(), WorldError> {
    let camps: Vec<RoomId> = ctx
        .world
        .rooms()
        .iter()
        .filter(|room| room.has_tag(RoomTag::Camp))
        .map(|room| room.id)
        .collect();

    for room_id in camps {
        let factions: Vec<FactionId> = ctx
            .world
            .npcs_in(room_id)
            .iter()
            .filter_map(|npc| npc.faction())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if factions.len() < 2 {
            continue;
        }
        let Some(&winner) = factions.choose(ctx.rng) else {
            continue;
        };

        let removed: Vec<NpcId> = ctx
            .world
            .npcs_in(room_id)
            .iter()
            .filter(|npc| npc.faction() != Some(winner))
            .map(|npc| npc.id)
            .collect();
        for &npc_id in &removed {
            ctx.world.despawn_npc(npc_id)?;
        }
        let previous = ctx.world.claim_room(room_id, winner)?;
        ctx.world.room_mut(room_id)?.contested = true;
        ctx.emit(SimEvent::CampCaptured {
            room_id,
            winner,
            previous,
            removed,
        });
    }
    Ok(())
}

/// Each living emissary either meets someone of a different allegiance in
/// its room and is removed, or strengthens its faction by one.
///
/// Any set affiliation other than the emissary's own counts as foreign,
/// Mystics, Free Traders and Bandits included; unaffiliated locals do not.
pub fn resolve_emissary_actions(ctx: &mut TickContext) -> Result<(), WorldError> {
    for npc_id in ctx.world.emissaries().to_vec() {
        let Some(emissary) = ctx.world.npc(npc_id) else {
            continue;
        };
        let Some(faction) = emissary.faction() else {
            continue;
        };
        let room_id = emissary.room_id();
        let allegiance = emissary.affiliation;

        let intercepted = ctx.world.npcs_in(room_id).iter().any(|other| {
            other.id != npc_id && other.affiliation.is_some() && other.affiliation != allegiance
        });
        if intercepted {
            ctx.world.despawn_npc(npc_id)?;
            ctx.emit(SimEvent::EmissaryIntercepted {
                npc_id,
                faction,
                room_id,
            });
        } else {
            let strength = ctx.world.add_strength(faction, 1);
            ctx.emit(SimEvent::DiplomacySucceeded {
                npc_id,
                faction,
                strength,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Affiliation, Direction, NpcSpawn, Roles, World};
    use crate::spawn::{spawn_emissary, spawn_patrol};
    use crate::territory::INITIAL_STRENGTH;
    use crate::testutil::{blank_world, place_npc, run_step, two_factions};

    const A: FactionId = FactionId(0);
    const B: FactionId = FactionId(1);

    const TRIALS: u64 = 2000;

    /// Alpha holds room 0, whose only exit leads to unowned room 1.
    fn single_front_world(aggression: f64) -> World {
        let mut world = blank_world(2, two_factions(aggression, 0.0));
        world
            .room_mut(0)
            .unwrap()
            .exits
            .retain(|&dir, _| dir == Direction::East);
        world.claim_room(0, A).unwrap();
        world
    }

    fn claim_rate(aggression: f64) -> f64 {
        let claims = (0..TRIALS)
            .filter(|&seed| {
                let mut world = single_front_world(aggression);
                let (result, events) = run_step(&mut world, seed, |ctx| expand_territory(ctx, A));
                result.unwrap();
                !events.is_empty()
            })
            .count();
        claims as f64 / TRIALS as f64
    }

    #[test]
    fn claim_chance_is_a_quarter_of_aggression() {
        let full = claim_rate(1.0);
        assert!((full - 0.25).abs() <= 0.03, "rate {full}");
        let half = claim_rate(0.5);
        assert!((half - 0.125).abs() <= 0.03, "rate {half}");
    }

    #[test]
    fn at_most_five_fronts_per_day() {
        let mut total_claims = 0;
        for seed in 0..TRIALS {
            // twelve isolated owned rooms, each with one private unowned neighbour
            let mut world = blank_world(6, two_factions(1.0, 0.0));
            for room_id in 0..36 {
                world.room_mut(room_id).unwrap().exits.clear();
            }
            for front in 0..12 {
                let room_id = front * 3;
                world
                    .room_mut(room_id)
                    .unwrap()
                    .exits
                    .insert(Direction::East, room_id + 1);
                world.claim_room(room_id, A).unwrap();
            }

            let (result, events) = run_step(&mut world, seed, |ctx| expand_territory(ctx, A));
            result.unwrap();
            assert!(events.len() <= MAX_EXPANSION_FRONTS);
            total_claims += events.len();
        }
        // five fronts at 0.25 each, not twelve
        let mean = total_claims as f64 / TRIALS as f64;
        assert!((mean - 1.25).abs() <= 0.1, "mean claims {mean}");
    }

    #[test]
    fn expansion_only_reaches_neighbours() {
        let mut world = blank_world(5, two_factions(1.0, 0.0));
        world.claim_room(12, A).unwrap();
        for seed in 0..40 {
            let (result, events) = run_step(&mut world, seed, |ctx| expand_territory(ctx, A));
            result.unwrap();
            for event in &events {
                let SimEvent::RoomClaimed { room_id, .. } = event else {
                    panic!("unexpected event {event:?}");
                };
                assert!(world.territory(A).contains(room_id));
            }
        }
        // every owned room is connected to the seed room through owned rooms
        let owned = world.territory(A).clone();
        assert!(owned.len() > 1);
        let mut reached = BTreeSet::from([12]);
        let mut frontier = vec![12];
        while let Some(room_id) = frontier.pop() {
            for n in world.get_room(room_id).unwrap().neighbors() {
                if owned.contains(&n) && reached.insert(n) {
                    frontier.push(n);
                }
            }
        }
        assert_eq!(reached, owned);
        world.verify_territories().unwrap();
    }

    #[test]
    fn zero_aggression_never_expands() {
        let mut world = blank_world(4, two_factions(0.0, 0.0));
        world.claim_room(5, A).unwrap();
        for seed in 0..30 {
            let (result, events) = run_step(&mut world, seed, |ctx| expand_territory(ctx, A));
            result.unwrap();
            assert!(events.is_empty());
        }
        assert_eq!(world.territory(A).len(), 1);
    }

    #[test]
    fn expansion_can_take_enemy_rooms() {
        let mut world = blank_world(2, two_factions(1.0, 0.0));
        world.claim_room(0, A).unwrap();
        for room_id in 1..4 {
            world.claim_room(room_id, B).unwrap();
        }
        let mut taken = false;
        for seed in 0..50 {
            let (result, events) = run_step(&mut world, seed, |ctx| expand_territory(ctx, A));
            result.unwrap();
            taken |= events.iter().any(|e| {
                matches!(e, SimEvent::RoomClaimed { previous: Some(prev), .. } if *prev == B)
            });
            world.verify_territories().unwrap();
        }
        assert!(taken);
        assert!(world.territory(B).len() < 3);
    }

    #[test]
    fn faction_without_rooms_cannot_expand() {
        let mut world = blank_world(3, two_factions(1.0, 1.0));
        let (result, events) = run_step(&mut world, 1, |ctx| expand_territory(ctx, A));
        result.unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn reinforcement_adds_at_most_two_defenders() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        for room_id in [0, 1, 2, 3] {
            world.claim_room(room_id, A).unwrap();
        }
        let (result, events) = run_step(&mut world, 3, |ctx| reinforce_territory(ctx, A));
        result.unwrap();
        assert_eq!(events.len(), DEFENDERS_PER_DAY);
        assert_eq!(world.npc_count(), DEFENDERS_PER_DAY);
        for npc in world.npcs() {
            assert!(npc.has_role(Roles::DEFENDER));
            assert!(world.territory(A).contains(&npc.room_id()));
        }

        world.release_room(1).unwrap();
        world.release_room(2).unwrap();
        world.release_room(3).unwrap();
        let (result, events) = run_step(&mut world, 4, |ctx| reinforce_territory(ctx, A));
        result.unwrap();
        assert_eq!(events.len(), 1);
        assert!(!world.npcs_in(0).is_empty());
    }

    #[test]
    fn clash_leaves_only_the_winner() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        let alpha = spawn_patrol(&mut world, A, 4, 3).unwrap();
        let beta = spawn_patrol(&mut world, B, 4, 2).unwrap();

        let (result, events) = run_step(&mut world, 11, resolve_patrol_clashes);
        result.unwrap();
        assert_eq!(events.len(), 1);
        let SimEvent::PatrolClash {
            winner, eliminated, ..
        } = &events[0]
        else {
            panic!("expected clash");
        };

        let (kept, lost) = if *winner == A { (alpha, beta) } else { (beta, alpha) };
        assert!(world.group(lost).unwrap().is_empty());
        assert!(!world.group(kept).unwrap().is_empty());
        assert_eq!(eliminated.len(), if *winner == A { 2 } else { 3 });
        assert!(world.npcs_in(4).iter().all(|n| n.faction() == Some(*winner)));
        assert!(world.get_room(4).unwrap().contested);
    }

    #[test]
    fn same_faction_patrols_do_not_clash() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        spawn_patrol(&mut world, A, 4, 3).unwrap();
        spawn_patrol(&mut world, A, 4, 3).unwrap();
        spawn_patrol(&mut world, B, 5, 3).unwrap();
        let (result, events) = run_step(&mut world, 2, resolve_patrol_clashes);
        result.unwrap();
        assert!(events.is_empty());
        assert_eq!(world.npc_count(), 9);
    }

    #[test]
    fn camp_conflict_transfers_ownership() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        world.room_mut(4).unwrap().tags.insert(RoomTag::Camp);
        world.claim_room(4, A).unwrap();
        spawn_defender(&mut world, A, 4).unwrap();
        spawn_patrol(&mut world, B, 4, 2).unwrap();
        place_npc(&mut world, None, 4);

        let (result, events) = run_step(&mut world, 5, resolve_camp_conflicts);
        result.unwrap();
        let SimEvent::CampCaptured { winner, .. } = events[0] else {
            panic!("expected camp conflict");
        };
        let room = world.get_room(4).unwrap();
        assert_eq!(room.faction_control(), Some(winner));
        assert!(world.territory(winner).contains(&4));
        assert!(!world.npcs_in(4).is_empty());
        assert!(world.npcs_in(4).iter().all(|n| n.faction() == Some(winner)));
        assert!(room.contested);
        world.verify_territories().unwrap();
    }

    #[test]
    fn single_faction_camp_is_left_alone() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        world.room_mut(0).unwrap().tags.insert(RoomTag::Camp);
        world.claim_room(0, A).unwrap();
        spawn_defender(&mut world, A, 0).unwrap();
        place_npc(&mut world, Some(Affiliation::Mystics), 0);
        let (result, events) = run_step(&mut world, 5, resolve_camp_conflicts);
        result.unwrap();
        assert!(events.is_empty());
        assert_eq!(world.npcs_in(0).len(), 2);
    }

    #[test]
    fn mystics_intercept_emissaries_but_never_contest_camps() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        world.room_mut(0).unwrap().tags.insert(RoomTag::Camp);
        world.claim_room(0, A).unwrap();
        let envoy = spawn_emissary(&mut world, A, 0).unwrap();
        place_npc(&mut world, Some(Affiliation::Mystics), 0);

        let (result, events) = run_step(&mut world, 3, resolve_camp_conflicts);
        result.unwrap();
        assert!(events.is_empty());
        assert_eq!(world.npcs_in(0).len(), 2);

        let (result, events) = run_step(&mut world, 3, resolve_emissary_actions);
        result.unwrap();
        assert!(matches!(events[0], SimEvent::EmissaryIntercepted { npc_id, .. } if npc_id == envoy));
    }

    #[test]
    fn lone_emissary_raises_strength() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        spawn_emissary(&mut world, A, 0).unwrap();
        place_npc(&mut world, None, 0);
        let (result, _) = run_step(&mut world, 1, resolve_emissary_actions);
        result.unwrap();
        assert_eq!(world.strength(A), INITIAL_STRENGTH + 1);
        assert_eq!(world.strength(B), INITIAL_STRENGTH);
    }

    #[test]
    fn foreign_company_intercepts_emissary() {
        let mut world = blank_world(3, two_factions(0.5, 0.5));
        let envoy = spawn_emissary(&mut world, A, 2).unwrap();
        world
            .spawn_npc(NpcSpawn::new("Scout", "serious", 2).affiliated(Affiliation::Faction(B)))
            .unwrap();

        let (result, events) = run_step(&mut world, 1, resolve_emissary_actions);
        result.unwrap();
        assert!(world.npc(envoy).is_none());
        assert_eq!(world.strength(A), INITIAL_STRENGTH);
        assert!(matches!(events[0], SimEvent::EmissaryIntercepted { npc_id, .. } if npc_id == envoy));

        // the dead envoy is skipped on later days
        let (result, events) = run_step(&mut world, 2, resolve_emissary_actions);
        result.unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn full_day_keeps_territories_consistent() {
        let mut world = blank_world(6, two_factions(1.0, 1.0));
        for room_id in 0..6 {
            world.claim_room(room_id, A).unwrap();
            world.claim_room(35 - room_id, B).unwrap();
        }
        world.room_mut(0).unwrap().tags.insert(RoomTag::Camp);
        spawn_patrol(&mut world, B, 0, 3).unwrap();
        for day in 0..40 {
            let (result, _) = run_step(&mut world, day, simulate_faction_war);
            result.unwrap();
            world.verify_territories().unwrap();
        }
    }
}
