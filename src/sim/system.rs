use super::context::TickContext;

/// What drives a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickFrequency {
    /// Every player movement action.
    PerMove,
    /// Every wrap of the hour counter past midnight.
    Daily,
}

/// A pluggable simulation system.
///
/// Object-safe so systems can be stored as `Box<dyn SimSystem>`. A tick runs
/// to completion before the caller regains control.
pub trait SimSystem {
    fn name(&self) -> &str;
    fn frequency(&self) -> TickFrequency;
    fn tick(&mut self, ctx: &mut TickContext);
}
