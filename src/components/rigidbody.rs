//! Dynamic body component with a kinematic (frozen) mode.
//!
//! The [`RigidBody`] component stores the velocity of an entity or of one of
//! its parts. A bird may own several bodies (root plus child limbs); the
//! capture sequence freezes all of them while the bird is teleported into
//! the cage and unfreezes them once the physics have settled.
//!
//! The `frozen` flag disables all movement calculations, so neither player
//! input nor external forces can move the entity while it is set.

use bevy_ecs::prelude::Component;

/// Body storing velocity and a kinematic flag.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_velocity(3.0, 0.0);
/// rb.freeze(); // kinematic: movement system skips it
/// rb.unfreeze();
/// ```
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct RigidBody {
    /// Horizontal velocity in world units per second.
    pub velocity_x: f32,
    /// Vertical velocity in world units per second.
    pub velocity_y: f32,
    /// When true, the movement system skips this body entirely.
    pub frozen: bool,
}

impl RigidBody {
    /// Create a dynamic RigidBody with zero velocity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dynamic RigidBody with an initial velocity.
    pub fn with_velocity(velocity_x: f32, velocity_y: f32) -> Self {
        Self {
            velocity_x,
            velocity_y,
            frozen: false,
        }
    }

    pub fn set_velocity(&mut self, velocity_x: f32, velocity_y: f32) {
        self.velocity_x = velocity_x;
        self.velocity_y = velocity_y;
    }

    /// Freeze the rigid body, preventing movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the rigid body, allowing movement system to update it.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }

    /// Freeze and drop any residual velocity from the previous frame.
    pub fn make_kinematic(&mut self) {
        self.freeze();
        self.set_velocity(0.0, 0.0);
    }

    pub fn is_kinematic(&self) -> bool {
        self.frozen
    }
}
