//! Overlap notifications between a cage and another entity.
//!
//! The [`cage_overlap_detector`](crate::systems::cage::cage_overlap_detector)
//! system emits one [`OverlapEvent`] per cage/entity pair and tick: `Enter`
//! on the first overlapping tick, `Stay` while the overlap continues, and
//! `Exit` on the first tick without it. Hosts with their own physics can
//! trigger these events directly instead of running the detector.
//!
//! The cage answers an overlap partly through `Commands` (settle insert,
//! force drop, win notification). Outside a system, deliver the event with
//! [`trigger_overlap`](crate::game::trigger_overlap), which flushes the world
//! afterwards; a bare `world.trigger` leaves those commands queued.
//!
//! # Example
//!
//! ```ignore
//! trigger_overlap(&mut world, OverlapEvent::enter(cage, bird));
//! ```

use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapKind {
    Enter,
    Stay,
    Exit,
}

/// Event fired when an entity enters, stays in, or leaves a cage volume.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapEvent {
    /// The cage entity (carries a `ContainmentZone`).
    pub zone: Entity,
    /// The entity overlapping it.
    pub other: Entity,
    pub kind: OverlapKind,
}

impl OverlapEvent {
    pub fn enter(zone: Entity, other: Entity) -> Self {
        Self {
            zone,
            other,
            kind: OverlapKind::Enter,
        }
    }

    pub fn stay(zone: Entity, other: Entity) -> Self {
        Self {
            zone,
            other,
            kind: OverlapKind::Stay,
        }
    }

    pub fn exit(zone: Entity, other: Entity) -> Self {
        Self {
            zone,
            other,
            kind: OverlapKind::Exit,
        }
    }
}
