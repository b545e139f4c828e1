//! Registry of every capturable entity alive in the level.
//!
//! The [`BirdRegistry`] is constructed once per level and inserted into the
//! world as a resource. Entries are added and removed by
//! [`sync_bird_registry`](crate::systems::birdregistry::sync_bird_registry)
//! when [`Bird`](crate::components::bird::Bird) components appear or
//! disappear, and the count used by the win condition is purged of stale
//! entries lazily, on read.
//!
//! # Related
//!
//! - [`crate::resources::wincondition::WinCondition`] – compares against [`BirdRegistry::count`]

use bevy_ecs::prelude::{Entity, Resource};
use log::{info, warn};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default, Resource)]
pub struct BirdRegistry {
    birds: FxHashSet<Entity>,
}

impl BirdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bird. Returns `false` if it was already registered or the
    /// handle is the placeholder entity.
    pub fn register(&mut self, bird: Entity) -> bool {
        if bird == Entity::PLACEHOLDER {
            warn!("Attempted to register the placeholder entity as a bird");
            return false;
        }
        let added = self.birds.insert(bird);
        if added {
            info!("Registered bird {:?}. Total: {}", bird, self.birds.len());
        }
        added
    }

    /// Remove a bird. Unknown entities are ignored.
    pub fn unregister(&mut self, bird: Entity) -> bool {
        let removed = self.birds.remove(&bird);
        if removed {
            info!("Unregistered bird {:?}. Total: {}", bird, self.birds.len());
        }
        removed
    }

    pub fn contains(&self, bird: Entity) -> bool {
        self.birds.contains(&bird)
    }

    /// Live count: entries for which `is_alive` returns false are purged first.
    pub fn count(&mut self, is_alive: impl Fn(Entity) -> bool) -> usize {
        self.birds.retain(|bird| is_alive(*bird));
        self.birds.len()
    }

    /// Number of entries without purging. May include despawned birds.
    pub fn raw_len(&self) -> usize {
        self.birds.len()
    }

    /// Drop every entry; used at level teardown.
    pub fn clear(&mut self) {
        self.birds.clear();
    }
}
