use rand::Rng;
use rand::distr::Distribution;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Storm,
    Fog,
    Snow,
}

string_enum!(Weather {
    Clear => "clear",
    Rain => "rain",
    Storm => "storm",
    Fog => "fog",
    Snow => "snow",
});

impl Distribution<Weather> for rand::distr::StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Weather {
        Weather::ALL[rng.random_range(0..Weather::ALL.len())]
    }
}
