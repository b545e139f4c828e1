//! Keeps the [`BirdRegistry`] in sync with live [`Bird`] components.

use bevy_ecs::prelude::*;

use crate::components::bird::Bird;
use crate::resources::birdregistry::BirdRegistry;

/// Register newly added birds and unregister removed ones.
///
/// Runs first in the tick so that counts taken during overlap handling
/// include birds spawned since the previous tick.
pub fn sync_bird_registry(
    added: Query<Entity, Added<Bird>>,
    mut removed: RemovedComponents<Bird>,
    mut registry: ResMut<BirdRegistry>,
) {
    for entity in removed.read() {
        registry.unregister(entity);
    }
    for entity in added.iter() {
        registry.register(entity);
    }
}
