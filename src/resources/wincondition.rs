//! One-shot "capturing team wins" latch.
//!
//! [`WinCondition::check`] is consulted after every capture (and once per
//! tick by [`win_condition_system`](crate::systems::wincondition::win_condition_system)).
//! It fires at most once per round, when every registered bird is in the cage.

use bevy_ecs::prelude::Resource;
use log::info;

#[derive(Debug, Clone, Default, Resource)]
pub struct WinCondition {
    fired: bool,
    /// Scene handed to the scene collaborator when the latch fires.
    pub scene: Option<String>,
}

impl WinCondition {
    pub fn new(scene: Option<String>) -> Self {
        Self {
            fired: false,
            scene,
        }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Returns true exactly once, the first time `captured >= total > 0`.
    pub fn check(&mut self, captured: usize, total: usize) -> bool {
        if self.fired || total == 0 || captured < total {
            return false;
        }
        self.fired = true;
        info!("All {} birds caged, capturing team wins", total);
        true
    }

    /// Re-arm the latch for a new round.
    pub fn reset(&mut self) {
        self.fired = false;
    }
}
