//! Rescue notifications for presentation collaborators.
//!
//! Every [`ContainmentZone`](crate::components::cage::ContainmentZone) owns
//! its own list of [`RescueListener`]s, so two cages (or two local players
//! watching different cages) never receive each other's timers.
//!
//! The `target` argument is the presentation entity of the rescuer (its HUD
//! or menu controller), falling back to the rescuer itself.
//!
//! # Provided listeners
//!
//! - [`LogListener`] – writes every notice through the `log` facade
//! - [`ChannelListener`] – forwards [`RescueNotice`] values over a
//!   `crossbeam_channel` sender, e.g. to a UI thread
//!
//! # Example
//!
//! ```ignore
//! let (tx, rx) = crossbeam_channel::unbounded();
//! let zone = ContainmentZone::new(10.0)
//!     .with_listener(LogListener)
//!     .with_listener(ChannelListener::new(tx));
//! ```

use bevy_ecs::prelude::Entity;
use crossbeam_channel::Sender;
use log::{debug, info};

/// Observer interface for rescue countdowns.
pub trait RescueListener: Send + Sync {
    /// A rescue countdown of `deadline` seconds has started.
    fn rescue_started(&mut self, target: Entity, deadline: f32);
    /// The running countdown has `remaining` seconds left.
    fn rescue_updated(&mut self, target: Entity, remaining: f32);
    /// The countdown ended, either completed or cancelled.
    fn rescue_ended(&mut self, target: Entity);
}

/// Owned, value form of a rescue notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RescueNotice {
    Started { target: Entity, deadline: f32 },
    Updated { target: Entity, remaining: f32 },
    Ended { target: Entity },
}

impl RescueNotice {
    pub fn target(&self) -> Entity {
        match self {
            RescueNotice::Started { target, .. }
            | RescueNotice::Updated { target, .. }
            | RescueNotice::Ended { target } => *target,
        }
    }
}

/// Logs rescue notices. Updates go to `debug` to keep `info` readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogListener;

impl RescueListener for LogListener {
    fn rescue_started(&mut self, target: Entity, deadline: f32) {
        info!("Rescue started for {:?}: {:.1}s to go", target, deadline);
    }

    fn rescue_updated(&mut self, target: Entity, remaining: f32) {
        debug!("Rescue for {:?}: {:.2}s left", target, remaining);
    }

    fn rescue_ended(&mut self, target: Entity) {
        info!("Rescue ended for {:?}", target);
    }
}

/// Forwards notices to a channel. Send errors (receiver dropped) are ignored.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: Sender<RescueNotice>,
}

impl ChannelListener {
    pub fn new(sender: Sender<RescueNotice>) -> Self {
        Self { sender }
    }
}

impl RescueListener for ChannelListener {
    fn rescue_started(&mut self, target: Entity, deadline: f32) {
        let _ = self.sender.send(RescueNotice::Started { target, deadline });
    }

    fn rescue_updated(&mut self, target: Entity, remaining: f32) {
        let _ = self.sender.send(RescueNotice::Updated { target, remaining });
    }

    fn rescue_ended(&mut self, target: Entity) {
        let _ = self.sender.send(RescueNotice::Ended { target });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::world::World;

    #[test]
    fn channel_listener_forwards_in_order() {
        let mut world = World::new();
        let target = world.spawn_empty().id();
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut listener = ChannelListener::new(tx);

        listener.rescue_started(target, 10.0);
        listener.rescue_updated(target, 9.5);
        listener.rescue_ended(target);

        let notices: Vec<RescueNotice> = rx.try_iter().collect();
        assert_eq!(
            notices,
            vec![
                RescueNotice::Started { target, deadline: 10.0 },
                RescueNotice::Updated { target, remaining: 9.5 },
                RescueNotice::Ended { target },
            ]
        );
        assert!(notices.iter().all(|n| n.target() == target));
    }

    #[test]
    fn channel_listener_survives_dropped_receiver() {
        let mut world = World::new();
        let target = world.spawn_empty().id();
        let (tx, rx) = crossbeam_channel::unbounded();
        drop(rx);
        let mut listener = ChannelListener::new(tx);
        listener.rescue_started(target, 1.0);
        listener.rescue_ended(target);
    }
}
