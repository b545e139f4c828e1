//! Pickup slot for the opposing team.
//!
//! A [`Holder`] can carry at most one bird at a time. Picking a free bird
//! up marks it [`BirdState::Held`](crate::components::bird::BirdState::Held);
//! dropping it (or a global force drop) returns it to `Free` unless the cage
//! has already captured it.

use bevy_ecs::prelude::{Component, Entity};

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Holder {
    pub held: Option<Entity>,
}

impl Holder {
    pub fn new() -> Self {
        Self { held: None }
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    /// Clear the slot and return what was held.
    pub fn take(&mut self) -> Option<Entity> {
        self.held.take()
    }
}
