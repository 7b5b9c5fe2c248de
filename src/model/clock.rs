use std::fmt;

use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: u32 = 24;
pub const START_DAY: u32 = 1;
pub const START_HOUR: u32 = 8;

/// Day counter plus hour-of-day. Hours wrap modulo 24, bumping the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorldClock {
    day: u32,
    hour: u32,
}

impl WorldClock {
    /// Hours of 24 or more roll over into later days.
    pub fn new(day: u32, hour: u32) -> Self {
        Self {
            day: day.saturating_add(hour / HOURS_PER_DAY),
            hour: hour % HOURS_PER_DAY,
        }
    }

    pub fn day(self) -> u32 {
        self.day
    }

    pub fn hour(self) -> u32 {
        self.hour
    }

    pub fn is_daytime(self) -> bool {
        (6..=18).contains(&self.hour)
    }

    /// Move forward by `hours`; returns how many day boundaries were crossed.
    ///
    /// Any `u32` is accepted. The day counter saturates at `u32::MAX`.
    pub fn advance(&mut self, hours: u32) -> u32 {
        let total = u64::from(self.hour) + u64::from(hours);
        let per_day = u64::from(HOURS_PER_DAY);
        // u32::MAX hours is far fewer than u32::MAX days
        let crossed = (total / per_day) as u32;
        self.hour = (total % per_day) as u32;
        self.day = self.day.saturating_add(crossed);
        crossed
    }
}

impl Default for WorldClock {
    fn default() -> Self {
        Self::new(START_DAY, START_HOUR)
    }
}

impl fmt::Display for WorldClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}.H{:02}", self.day, self.hour)
    }
}
