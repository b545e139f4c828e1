//! Post-teleport settle system.
//!
//! Counts down every [`PhysicsSettle`] and, once it is done, makes the
//! bird's root body and every descendant body dynamic again.

use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::components::rigidbody::RigidBody;
use crate::components::settle::PhysicsSettle;
use crate::resources::worldtime::WorldTime;

/// Advance settle countdowns by one physics step.
///
/// # System Ordering
///
/// Must run **after** the movement system so at least one physics step has
/// elapsed with the bodies kinematic.
pub fn physics_settle_system(
    world_time: Res<WorldTime>,
    mut settles: Query<(Entity, &mut PhysicsSettle)>,
    mut bodies: Query<&mut RigidBody>,
    children: Query<&Children>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut settle) in settles.iter_mut() {
        if !settle.step(dt) {
            continue;
        }
        let mut stack: SmallVec<[Entity; 8]> = SmallVec::new();
        stack.push(entity);
        while let Some(current) = stack.pop() {
            if let Ok(mut body) = bodies.get_mut(current) {
                body.unfreeze();
            }
            if let Ok(kids) = children.get(current) {
                stack.extend(kids.iter());
            }
        }
        debug!("{:?} settled, physics re-enabled", entity);
        commands.entity(entity).try_remove::<PhysicsSettle>();
    }
}
