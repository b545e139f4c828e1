//! Round countdown.
//!
//! The [`RoundClock`] limits how long the capturing team has to cage every
//! bird. It is advanced by
//! [`round_clock_system`](crate::systems::roundclock::round_clock_system)
//! while the game is playing; when it runs out the round ends in a draw.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RoundClock {
    pub remaining: f32,
    pub running: bool,
    expired: bool,
}

impl RoundClock {
    /// A stopped clock with `seconds` on it.
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds.max(0.0),
            running: false,
            expired: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Put `seconds` back on the clock and clear the expired latch.
    pub fn reset(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
        self.expired = false;
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Count down by `delta`. Returns true only on the tick the clock expires.
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.running || self.expired {
            return false;
        }
        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.expired = true;
            self.running = false;
            return true;
        }
        false
    }

    /// Remaining time as `m:ss`.
    pub fn display(&self) -> String {
        let total = self.remaining.max(0.0).floor() as u32;
        format!("{}:{:02}", total / 60, total % 60)
    }
}
