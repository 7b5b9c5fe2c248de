use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::context::TickContext;
use super::environment::perturb_environment;
use super::event::SimEvent;
use super::mobility::MobilitySystem;
use super::observer::SimObserver;
use super::system::{SimSystem, TickFrequency};
use super::war::WarSystem;
use crate::error::Error;
use crate::model::World;
use crate::spawn::populate_world;
use crate::worldgen::{WorldGenConfig, generate_map};

/// The systems a freshly built simulation runs, in dispatch order.
pub fn default_systems() -> Vec<Box<dyn SimSystem>> {
    vec![Box::new(MobilitySystem), Box::new(WarSystem)]
}

/// A world together with the single random source and the systems that
/// advance it.
///
/// Everything is single-threaded and driven by the caller: `player_moved`
/// runs per-move systems and `advance_time` runs daily systems once for
/// every midnight crossed.
pub struct Simulation {
    pub world: World,
    rng: SmallRng,
    systems: Vec<Box<dyn SimSystem>>,
    observers: Vec<Box<dyn SimObserver>>,
}

impl Simulation {
    /// Wrap an existing world with the default systems.
    pub fn new(world: World, seed: u64) -> Self {
        Self::with_systems(world, seed, default_systems())
    }

    pub fn with_systems(world: World, seed: u64, systems: Vec<Box<dyn SimSystem>>) -> Self {
        Self {
            world,
            rng: SmallRng::seed_from_u64(seed),
            systems,
            observers: Vec::new(),
        }
    }

    /// Generate and populate a world, then keep drawing from the same random
    /// source for the simulation itself.
    pub fn from_config(config: &WorldGenConfig) -> Result<Self, Error> {
        let factions = config.validate()?;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut world = generate_map(config.size, factions, &mut rng)?;
        populate_world(&mut world, &mut rng)?;
        Ok(Self {
            world,
            rng,
            systems: default_systems(),
            observers: Vec::new(),
        })
    }

    pub fn add_observer(&mut self, observer: impl SimObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    /// One player movement: every per-move system ticks once.
    pub fn player_moved(&mut self) {
        let events = self.dispatch(TickFrequency::PerMove);
        self.notify(&events);
    }

    /// Move the clock forward, run the daily systems once per day boundary
    /// crossed, then perturb weather and temperature. Returns the number of
    /// days crossed.
    pub fn advance_time(&mut self, hours: u32) -> u32 {
        let first_day = self.world.clock.day();
        let days = self.world.clock.advance(hours);
        for offset in 1..=days {
            let mut events = vec![SimEvent::DayBegan {
                day: first_day.saturating_add(offset),
            }];
            events.extend(self.dispatch(TickFrequency::Daily));
            self.notify(&events);
        }

        let mut events = Vec::new();
        let mut ctx = TickContext {
            world: &mut self.world,
            rng: &mut self.rng,
            events: &mut events,
        };
        perturb_environment(&mut ctx);
        self.notify(&events);
        days
    }

    /// Run the daily systems now, outside the clock.
    pub fn simulate_faction_war(&mut self) {
        let events = self.dispatch(TickFrequency::Daily);
        self.notify(&events);
    }

    /// Tick every system of `frequency` in registration order.
    fn dispatch(&mut self, frequency: TickFrequency) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for system in self.systems.iter_mut() {
            if system.frequency() != frequency {
                continue;
            }
            let mut ctx = TickContext {
                world: &mut self.world,
                rng: &mut self.rng,
                events: &mut events,
            };
            system.tick(&mut ctx);
        }
        events
    }

    fn notify(&mut self, events: &[SimEvent]) {
        for event in events {
            for observer in self.observers.iter_mut() {
                observer.observe(event);
            }
        }
    }
}
