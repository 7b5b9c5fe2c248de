use crate::id::RoomId;
use crate::model::{Room, RoomTag, World};

/// Tags that show on the map, most important first.
const TAG_GLYPHS: [(RoomTag, char); 5] = [
    (RoomTag::Miniboss, 'M'),
    (RoomTag::Treasure, 'T'),
    (RoomTag::Shrine, 'S'),
    (RoomTag::Camp, 'C'),
    (RoomTag::Den, 'D'),
];

const PLAYER_GLYPH: char = 'P';
const EMPTY_GLYPH: char = '.';

impl World {
    /// One character per room, one line per grid row, rows joined by `\n`.
    pub fn ascii_minimap(&self, player_room_id: RoomId) -> String {
        let size = self.size as usize;
        let mut lines = Vec::with_capacity(size);
        for row in self.rooms().chunks(size.max(1)) {
            let line: String = row
                .iter()
                .map(|room| self.glyph(room, player_room_id))
                .collect();
            lines.push(line);
        }
        lines.join("\n")
    }

    fn glyph(&self, room: &Room, player_room_id: RoomId) -> char {
        if room.id == player_room_id {
            return PLAYER_GLYPH;
        }
        if let Some(&(_, glyph)) = TAG_GLYPHS.iter().find(|(tag, _)| room.has_tag(*tag)) {
            return glyph;
        }
        room.faction_control()
            .and_then(|faction| self.factions().get(faction))
            .map(|def| def.map_letter())
            .unwrap_or(EMPTY_GLYPH)
    }
}
