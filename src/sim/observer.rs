use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::event::SimEvent;

/// Receives every event once its tick has finished.
pub trait SimObserver {
    fn observe(&mut self, event: &SimEvent);
}

impl<T: SimObserver> SimObserver for Rc<RefCell<T>> {
    fn observe(&mut self, event: &SimEvent) {
        self.borrow_mut().observe(event);
    }
}

/// Forwards events to `tracing` with structured fields.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SimObserver for TracingObserver {
    fn observe(&mut self, event: &SimEvent) {
        match event {
            SimEvent::DayBegan { day } => tracing::info!(day, "day began"),
            SimEvent::RoomClaimed {
                room_id,
                faction,
                previous,
            } => tracing::info!(room_id, %faction, ?previous, "room claimed"),
            SimEvent::DefenderReinforced {
                room_id,
                faction,
                npc_id,
            } => tracing::debug!(room_id, %faction, %npc_id, "defender reinforced"),
            SimEvent::PatrolClash {
                room_id,
                winner,
                losers,
                eliminated,
            } => tracing::info!(
                room_id,
                %winner,
                ?losers,
                eliminated = eliminated.len(),
                "patrol clash"
            ),
            SimEvent::CampCaptured {
                room_id,
                winner,
                previous,
                removed,
            } => tracing::info!(
                room_id,
                %winner,
                ?previous,
                removed = removed.len(),
                "camp conflict resolved"
            ),
            SimEvent::EmissaryIntercepted {
                npc_id,
                faction,
                room_id,
            } => tracing::info!(%npc_id, %faction, room_id, "emissary intercepted"),
            SimEvent::DiplomacySucceeded {
                npc_id,
                faction,
                strength,
            } => tracing::debug!(%npc_id, %faction, strength, "diplomacy succeeded"),
            SimEvent::GroupMoved { group, from, to } => {
                tracing::trace!(?group, from, to, "group moved")
            }
            SimEvent::NpcMoved { npc_id, from, to } => {
                tracing::trace!(%npc_id, from, to, "npc moved")
            }
            SimEvent::HerdMoved { animals, from, to } => {
                tracing::trace!(size = animals.len(), from, to, "herd moved")
            }
            SimEvent::PredatorHunted {
                animal_id,
                from,
                to,
            } => tracing::trace!(%animal_id, from, to, "predator followed prey"),
            SimEvent::WeatherChanged { from, to } => {
                tracing::debug!(%from, %to, "weather changed")
            }
        }
    }
}

/// In-memory record of every observed event, in order.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Write one JSON object per line.
    pub fn write_jsonl(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        for event in &self.events {
            serde_json::to_writer(&mut writer, event)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

impl SimObserver for EventLog {
    fn observe(&mut self, event: &SimEvent) {
        self.events.push(event.clone());
    }
}
