//! Pickup and drop requests from the opposing team's controller.
//!
//! These events are the boundary with the locomotion/input layer: the
//! controller decides *when* to grab or release, and the observers in
//! [`crate::systems::pickup`] keep [`Bird`](crate::components::bird::Bird)
//! states consistent with [`Holder`](crate::components::holder::Holder) slots.

use bevy_ecs::prelude::*;

/// `holder` tries to pick up `target`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupEvent {
    pub holder: Entity,
    pub target: Entity,
}

/// `holder` lets go of whatever it carries.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
    pub holder: Entity,
}
