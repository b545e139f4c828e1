//! Global "drop everything" broadcast.
//!
//! A containment zone triggers [`ForceDropEvent`] before it finalizes a
//! capture, so no holder is left carrying a bird in a half-captured state.
//! The [`force_drop_observer`](crate::systems::pickup::force_drop_observer)
//! empties every [`Holder`](crate::components::holder::Holder).

use bevy_ecs::prelude::*;

/// Event asking every holder to drop what it carries.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ForceDropEvent;
