//! Post-teleport settle window.
//!
//! When a bird is teleported into the cage, its bodies are made kinematic
//! and a [`PhysicsSettle`] component is inserted on the bird root. The
//! [`physics_settle_system`](crate::systems::settle::physics_settle_system)
//! counts it down and restores dynamic physics once both the delay has
//! elapsed and the minimum number of physics steps has run.

use bevy_ecs::prelude::Component;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsSettle {
    /// Remaining settle time in seconds.
    pub remaining: f32,
    /// Physics steps still required before bodies may be re-enabled.
    pub steps_left: u32,
}

impl PhysicsSettle {
    /// `min_steps` is clamped to at least one physics step.
    pub fn new(delay: f32, min_steps: u32) -> Self {
        Self {
            remaining: delay,
            steps_left: min_steps.max(1),
        }
    }

    /// Account for one physics step of `delta` seconds.
    /// Returns true when the bodies can be made dynamic again.
    pub fn step(&mut self, delta: f32) -> bool {
        self.remaining -= delta;
        self.steps_left = self.steps_left.saturating_sub(1);
        self.remaining <= 0.0 && self.steps_left == 0
    }
}
