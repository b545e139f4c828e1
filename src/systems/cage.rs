//! Cage systems: overlap detection, overlap dispatch and the rescue tick.
//!
//! - [`cage_overlap_detector`] compares every cage volume against every bird
//!   collider and emits [`OverlapEvent`]s (`Exit`, then `Enter`, then `Stay`).
//! - [`cage_overlap_observer`] routes those events to the matching
//!   [`ContainmentZone`] callback.
//! - [`rescue_tick_system`] advances each zone's rescue countdown and
//!   publishes cage status to [`WorldSignals`].
//!
//! All zone callbacks receive a [`CageContext`] built from [`CageParams`].
//!
//! # System Ordering
//!
//! The detector should run after movement so positions are final for the
//! tick. The rescue tick runs after the detector so that a rescuer leaving
//! the cage on the same tick is seen before the countdown advances.

use bevy_ecs::hierarchy::Children;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, warn};
use smallvec::SmallVec;

use crate::components::bird::Bird;
use crate::components::boxcollider::BoxCollider;
use crate::components::cage::{CageContext, CageOccupancy, ContainmentZone};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::events::overlap::{OverlapEvent, OverlapKind};
use crate::resources::birdregistry::BirdRegistry;
use crate::resources::wincondition::WinCondition;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

/// Bundled system parameters for zone callbacks.
///
/// This [`SystemParam`] aggregates the queries and resources needed to
/// construct a [`CageContext`].
#[derive(SystemParam)]
pub struct CageParams<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub birds: Query<'w, 's, &'static mut Bird>,
    pub poses: Query<
        'w,
        's,
        (&'static mut MapPosition, Option<&'static mut Rotation>),
        Without<ContainmentZone>,
    >,
    pub rigid_bodies: Query<'w, 's, &'static mut RigidBody>,
    pub children: Query<'w, 's, &'static Children>,
    pub registry: ResMut<'w, BirdRegistry>,
    pub win: ResMut<'w, WinCondition>,
}

impl<'w, 's> CageParams<'w, 's> {
    pub fn context<'a>(&'a mut self, zone: Entity) -> CageContext<'a, 'w, 's> {
        CageContext {
            zone,
            commands: &mut self.commands,
            birds: &mut self.birds,
            poses: &mut self.poses,
            rigid_bodies: &mut self.rigid_bodies,
            children: &self.children,
            registry: &mut *self.registry,
            win: &mut *self.win,
        }
    }
}

/// Detect bird colliders overlapping cage colliders and emit overlap events.
///
/// Each cage remembers last tick's occupants in its [`CageOccupancy`].
/// Entities that are no longer overlapping (or no longer exist) get an
/// `Exit`, new ones an `Enter`, and the rest a `Stay`. Within each kind,
/// events are emitted in entity order.
pub fn cage_overlap_detector(
    mut cages: Query<
        (Entity, &MapPosition, &BoxCollider, &mut CageOccupancy),
        With<ContainmentZone>,
    >,
    birds: Query<(Entity, &MapPosition, &BoxCollider), (With<Bird>, Without<ContainmentZone>)>,
    mut commands: Commands,
) {
    for (zone, cage_pos, cage_collider, mut occupancy) in cages.iter_mut() {
        let mut inside: SmallVec<[Entity; 16]> = birds
            .iter()
            .filter(|(_, pos, collider)| cage_collider.overlaps(cage_pos, collider, pos))
            .map(|(entity, _, _)| entity)
            .collect();
        inside.sort_unstable();

        let mut exited: SmallVec<[Entity; 8]> = occupancy
            .inside
            .iter()
            .copied()
            .filter(|entity| !inside.contains(entity))
            .collect();
        exited.sort_unstable();

        for other in exited {
            occupancy.inside.remove(&other);
            commands.trigger(OverlapEvent::exit(zone, other));
        }
        for &other in inside.iter() {
            if occupancy.inside.insert(other) {
                commands.trigger(OverlapEvent::enter(zone, other));
            } else {
                commands.trigger(OverlapEvent::stay(zone, other));
            }
        }
    }
}

/// Route an [`OverlapEvent`] to the zone's enter/stay/exit handler.
pub fn cage_overlap_observer(
    trigger: On<OverlapEvent>,
    mut zones: Query<&mut ContainmentZone>,
    mut params: CageParams,
) {
    let event = *trigger.event();
    let Ok(mut zone) = zones.get_mut(event.zone) else {
        warn!(
            "Overlap event for {:?} which has no ContainmentZone",
            event.zone
        );
        return;
    };
    let mut ctx = params.context(event.zone);
    match event.kind {
        OverlapKind::Enter => zone.on_enter(event.other, &mut ctx),
        OverlapKind::Stay => zone.on_stay(event.other, &mut ctx),
        OverlapKind::Exit => zone.on_exit(event.other, &mut ctx),
    }
}

/// Advance rescue countdowns and publish cage status.
///
/// World signals written (last cage processed wins when several exist):
/// - integer `cage:captured` – birds in the cage
/// - integer `cage:free` – free birds inside the cage
/// - scalar `cage:rescue_remaining` – seconds left, removed when idle
pub fn rescue_tick_system(
    time: Res<WorldTime>,
    mut zones: Query<(Entity, &mut ContainmentZone)>,
    mut params: CageParams,
    mut world_signals: Option<ResMut<WorldSignals>>,
) {
    let dt = time.delta;
    for (entity, mut zone) in zones.iter_mut() {
        let mut ctx = params.context(entity);
        zone.tick(dt, &mut ctx);

        if let Some(signals) = world_signals.as_deref_mut() {
            signals.set_integer("cage:captured", zone.captured().len() as i32);
            signals.set_integer("cage:free", zone.free().len() as i32);
            match zone.session() {
                Some(session) => signals.set_scalar("cage:rescue_remaining", session.remaining()),
                None => {
                    signals.remove_scalar("cage:rescue_remaining");
                }
            }
        }
        debug!("Cage {:?} after tick: {:?}", entity, *zone);
    }
}
