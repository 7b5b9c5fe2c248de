use rand::Rng;

use super::context::TickContext;
use super::event::SimEvent;
use crate::model::Weather;

const DAY_BASE_TEMPERATURE: f64 = 18.0;
const NIGHT_BASE_TEMPERATURE: f64 = 8.0;
const WEATHER_CHANGE_CHANCE: f64 = 0.2;

/// Redraw the temperature for the current hour and occasionally the weather.
/// Runs once per time advance, after the clock has moved.
pub fn perturb_environment(ctx: &mut TickContext) {
    ctx.world.temperature = if ctx.world.clock.is_daytime() {
        DAY_BASE_TEMPERATURE + ctx.rng.random_range(-2.0..=5.0)
    } else {
        NIGHT_BASE_TEMPERATURE + ctx.rng.random_range(-3.0..=3.0)
    };

    if ctx.rng.random_bool(WEATHER_CHANGE_CHANCE) {
        let next: Weather = ctx.rng.random();
        let previous = ctx.world.weather;
        ctx.world.weather = next;
        if next != previous {
            ctx.emit(SimEvent::WeatherChanged {
                from: previous,
                to: next,
            });
        }
    }
}
