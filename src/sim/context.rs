use rand::RngCore;

use super::event::SimEvent;
use crate::model::World;

/// Context passed to each system on every tick.
///
/// Bundled so the `SimSystem` signature stays fixed as systems grow.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut dyn RngCore,
    /// Systems push what happened here; the runner hands the buffer to
    /// observers once the tick completes.
    pub events: &'a mut Vec<SimEvent>,
}

impl TickContext<'_> {
    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}
