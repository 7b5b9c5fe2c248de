use serde::{Deserialize, Serialize};

use crate::id::{AnimalId, NpcId, RoomId};
use crate::model::{FactionId, GroupRef, Weather};

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    /// The clock crossed midnight into `day`.
    DayBegan { day: u32 },

    /// A faction took a room by expansion.
    RoomClaimed {
        room_id: RoomId,
        faction: FactionId,
        previous: Option<FactionId>,
    },

    /// A faction garrisoned one of its rooms with a fresh defender.
    DefenderReinforced {
        room_id: RoomId,
        faction: FactionId,
        npc_id: NpcId,
    },

    /// Patrols of several factions met; every losing patrol was wiped out.
    PatrolClash {
        room_id: RoomId,
        winner: FactionId,
        losers: Vec<FactionId>,
        eliminated: Vec<NpcId>,
    },

    /// A contested camp fell to (or was held by) `winner`.
    CampCaptured {
        room_id: RoomId,
        winner: FactionId,
        previous: Option<FactionId>,
        removed: Vec<NpcId>,
    },

    /// An emissary met a foreigner and was taken out of play.
    EmissaryIntercepted {
        npc_id: NpcId,
        faction: FactionId,
        room_id: RoomId,
    },

    /// An emissary's quiet day raised its faction's strength.
    DiplomacySucceeded {
        npc_id: NpcId,
        faction: FactionId,
        strength: i64,
    },

    GroupMoved {
        group: GroupRef,
        from: RoomId,
        to: RoomId,
    },

    NpcMoved {
        npc_id: NpcId,
        from: RoomId,
        to: RoomId,
    },

    HerdMoved {
        animals: Vec<AnimalId>,
        from: RoomId,
        to: RoomId,
    },

    PredatorHunted {
        animal_id: AnimalId,
        from: RoomId,
        to: RoomId,
    },

    WeatherChanged { from: Weather, to: Weather },
}
