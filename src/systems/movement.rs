//! Position integration.
//!
//! Moves every dynamic [`RigidBody`] by its velocity. Frozen (kinematic)
//! bodies are skipped, and caged birds move at the configured fraction of
//! their normal speed.

use bevy_ecs::prelude::*;

use crate::components::bird::Bird;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::gameconfig::MovementTuning;
use crate::resources::worldtime::WorldTime;

pub fn movement_system(
    mut query: Query<(&mut MapPosition, &RigidBody, Option<&Bird>)>,
    time: Res<WorldTime>,
    tuning: Option<Res<MovementTuning>>,
) {
    let tuning = tuning.map(|t| *t).unwrap_or_default();
    for (mut position, rigidbody, bird) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        let factor = bird.map_or(1.0, |b| b.speed_multiplier(&tuning));
        position.x += rigidbody.velocity_x * factor * time.delta;
        position.y += rigidbody.velocity_y * factor * time.delta;
    }
}
