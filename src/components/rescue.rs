//! Timed rescue countdown.
//!
//! A [`RescueSession`] is a plain resumable state object owned by a
//! [`ContainmentZone`](crate::components::cage::ContainmentZone). The zone
//! calls [`RescueSession::advance`] once per tick with the frame delta and
//! the result of its guard checks; the returned [`RescueStep`] tells the
//! zone whether the countdown keeps running, was cancelled, or completed.
//!
//! # Lifecycle
//!
//! ```text
//! (none) --try_start_rescue--> Active --guard fails--> Cancelled (discarded)
//!                                 |
//!                                 +--elapsed >= deadline--> Completed (discarded)
//! ```
//!
//! Cancellation never has side effects of its own; it is the zone that
//! notifies listeners. Completion is the only path that releases birds.

use bevy_ecs::prelude::Entity;

/// Why an active rescue stopped before its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The rescuer entity no longer exists.
    RescuerGone,
    /// The rescuer left the zone.
    RescuerLeft,
    /// The rescuer was picked up.
    RescuerHeld,
    /// The rescuer was captured.
    RescuerCaptured,
    /// Nothing is left in the cage to rescue.
    CageEmpty,
}

/// Outcome of advancing a session by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RescueStep {
    Active { remaining: f32 },
    Cancelled(CancelReason),
    Completed,
}

/// Single-flight countdown bound to one rescuer.
#[derive(Debug, Clone, PartialEq)]
pub struct RescueSession {
    rescuer: Entity,
    presenter: Entity,
    elapsed: f32,
    deadline: f32,
}

impl RescueSession {
    /// Start a fresh countdown. `elapsed` always begins at zero.
    pub fn new(rescuer: Entity, presenter: Entity, deadline: f32) -> Self {
        Self {
            rescuer,
            presenter,
            elapsed: 0.0,
            deadline,
        }
    }

    pub fn rescuer(&self) -> Entity {
        self.rescuer
    }

    /// Presentation target the rescue notifications are addressed to.
    pub fn presenter(&self) -> Entity {
        self.presenter
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn deadline(&self) -> f32 {
        self.deadline
    }

    pub fn remaining(&self) -> f32 {
        (self.deadline - self.elapsed).max(0.0)
    }

    /// Resume the countdown for one tick.
    ///
    /// Guards are checked before time is added, so a session whose rescuer
    /// left during this tick is cancelled even if the deadline would have
    /// been reached.
    pub fn advance(&mut self, delta: f32, guard: Result<(), CancelReason>) -> RescueStep {
        if let Err(reason) = guard {
            return RescueStep::Cancelled(reason);
        }
        self.elapsed += delta.max(0.0);
        if self.elapsed >= self.deadline {
            RescueStep::Completed
        } else {
            RescueStep::Active {
                remaining: self.deadline - self.elapsed,
            }
        }
    }
}
