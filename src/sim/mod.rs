mod context;
mod environment;
mod event;
pub mod mobility;
mod observer;
mod runner;
mod system;
pub mod war;

pub use context::TickContext;
pub use environment::perturb_environment;
pub use event::SimEvent;
pub use mobility::MobilitySystem;
pub use observer::{EventLog, SimObserver, TracingObserver};
pub use runner::{Simulation, default_systems};
pub use system::{SimSystem, TickFrequency};
pub use war::{WarSystem, simulate_faction_war};
