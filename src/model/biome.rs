use rand::Rng;
use rand::distr::Distribution;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Biome {
    Forest,
    Plains,
    Swamp,
    Mountain,
    Desert,
}

string_enum!(Biome {
    Forest => "forest",
    Plains => "plains",
    Swamp => "swamp",
    Mountain => "mountain",
    Desert => "desert",
});

impl Biome {
    /// Display title used in room names ("Forest Area 12").
    pub fn title(self) -> &'static str {
        match self {
            Biome::Forest => "Forest",
            Biome::Plains => "Plains",
            Biome::Swamp => "Swamp",
            Biome::Mountain => "Mountain",
            Biome::Desert => "Desert",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Biome::Forest => "Tall trees crowd around you, their leaves whispering in the wind.",
            Biome::Plains => "Open grasslands stretch out in all directions under a wide sky.",
            Biome::Swamp => "The ground squelches underfoot, and the air is thick and damp.",
            Biome::Mountain => "Jagged rocks and steep slopes dominate the rugged landscape.",
            Biome::Desert => "Endless dunes of sand shimmer beneath the harsh sun.",
        }
    }

    /// Fixed resource tags for rooms of this biome.
    pub fn resources(self) -> &'static [&'static str] {
        match self {
            Biome::Forest => &["berries", "wood"],
            Biome::Plains => &["herbs", "game"],
            Biome::Swamp => &["mushrooms"],
            Biome::Mountain => &["ore", "stone"],
            Biome::Desert => &["cactus", "scrap"],
        }
    }

    /// Fixed hazard tags for rooms of this biome.
    pub fn hazards(self) -> &'static [&'static str] {
        match self {
            Biome::Swamp => &["poisonous gas"],
            Biome::Mountain => &["loose rocks"],
            Biome::Desert => &["heatstroke"],
            Biome::Forest | Biome::Plains => &[],
        }
    }

    /// Animals that may be seeded here, as `(name, hostile)` pairs.
    pub fn animal_pool(self) -> &'static [(&'static str, bool)] {
        match self {
            Biome::Forest => &[
                ("Deer", false),
                ("Rabbit", false),
                ("Wolf", true),
                ("Boar", true),
            ],
            Biome::Plains => &[("Horse", false), ("Bison", false), ("Wild Dog", true)],
            Biome::Swamp => &[("Frog", false), ("Giant Leech", true), ("Crocodile", true)],
            Biome::Mountain => &[("Goat", false), ("Eagle", false), ("Mountain Lion", true)],
            Biome::Desert => &[("Lizard", false), ("Scorpion", true), ("Sand Wolf", true)],
        }
    }

    /// Names for unaffiliated locals who populate rooms of this biome.
    pub fn ambient_names(self) -> &'static [&'static str] {
        match self {
            Biome::Forest => &["Wanderer", "Herbalist", "Scout"],
            Biome::Plains => &["Traveler", "Hunter", "Nomad"],
            Biome::Swamp => &["Bog Walker", "Hermit", "Mire Scout"],
            Biome::Mountain => &["Climber", "Miner", "Ridge Scout"],
            Biome::Desert => &["Drifter", "Sand Scout", "Nomad"],
        }
    }

    /// The single legendary figure that can appear in this biome: `(name, personality)`.
    pub fn legendary(self) -> (&'static str, &'static str) {
        match self {
            Biome::Forest => ("Elder Ranger", "wise"),
            Biome::Plains => ("Storm Rider", "bold"),
            Biome::Swamp => ("Bog Prophet", "mysterious"),
            Biome::Mountain => ("Stone Sentinel", "stoic"),
            Biome::Desert => ("Sand Wraith", "silent"),
        }
    }
}

impl Distribution<Biome> for rand::distr::StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Biome {
        Biome::ALL[rng.random_range(0..Biome::ALL.len())]
    }
}
