//! Containment zone ("cage") component and its capture/rescue state machine.
//!
//! A [`ContainmentZone`] lives on the cage entity and owns three pieces of
//! state that nothing else mutates:
//!
//! - `captured` – ordered list of caged birds, append-only until a rescue
//!   completes and clears it
//! - `free` – the `Free` birds currently overlapping the cage, ordered by
//!   entity id so the rescuer choice is deterministic (lowest id wins)
//! - `session` – at most one active [`RescueSession`]
//!
//! The zone is driven by three overlap calls ([`ContainmentZone::on_enter`],
//! [`ContainmentZone::on_exit`], [`ContainmentZone::on_stay`]) and one
//! per-tick call ([`ContainmentZone::tick`]). All of them receive a
//! [`CageContext`] bundling the queries and resources they touch, the same
//! way phase callbacks receive their context in other engine modules.
//!
//! # Capture
//!
//! A `Held` bird entering the cage is captured: its bodies become kinematic,
//! it is teleported to the spawn point and a
//! [`PhysicsSettle`](crate::components::settle::PhysicsSettle) countdown is
//! attached. The settle system restores dynamic physics later. Every capture
//! broadcasts a [`ForceDropEvent`] and consults the
//! [`WinCondition`](crate::resources::wincondition::WinCondition).
//!
//! # Rescue
//!
//! While the cage holds someone and a free bird is inside, the lowest-id
//! free bird starts a countdown. If it leaves, is picked up, is captured or
//! despawns, the countdown is cancelled and the next free bird (if any)
//! takes over. When the countdown completes every caged bird is released.
//!
//! # Related
//!
//! - [`crate::systems::cage`] – overlap adapter, observer and tick system
//! - [`crate::events::rescue::RescueListener`] – presentation notifications

use std::collections::BTreeSet;
use std::fmt;

use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::components::bird::{Bird, BirdState};
use crate::components::mapposition::MapPosition;
use crate::components::rescue::{CancelReason, RescueSession, RescueStep};
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::components::settle::PhysicsSettle;
use crate::events::forcedrop::ForceDropEvent;
use crate::events::gamestate::TeamCapturedEvent;
use crate::events::rescue::RescueListener;
use crate::resources::birdregistry::BirdRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::wincondition::WinCondition;

/// A configured pose inside the level (cage spawn or release point).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CagePoint {
    pub x: f32,
    pub y: f32,
    /// Rotation in degrees.
    pub rotation: f32,
}

impl CagePoint {
    pub fn new(x: f32, y: f32, rotation: f32) -> Self {
        Self { x, y, rotation }
    }
}

/// Context passed to zone operations, providing access to ECS queries and resources.
pub struct CageContext<'a, 'w, 's> {
    /// The cage entity being driven.
    pub zone: Entity,
    pub commands: &'a mut Commands<'w, 's>,
    pub birds: &'a mut Query<'w, 's, &'static mut Bird>,
    pub poses: &'a mut Query<
        'w,
        's,
        (&'static mut MapPosition, Option<&'static mut Rotation>),
        Without<ContainmentZone>,
    >,
    pub rigid_bodies: &'a mut Query<'w, 's, &'static mut RigidBody>,
    pub children: &'a Query<'w, 's, &'static Children>,
    pub registry: &'a mut BirdRegistry,
    pub win: &'a mut WinCondition,
}

impl CageContext<'_, '_, '_> {
    fn bird_state(&self, entity: Entity) -> Option<BirdState> {
        self.birds.get(entity).ok().map(|bird| bird.state())
    }

    /// Apply `f` to every rigid body of `root` and its descendants.
    fn for_each_body(&mut self, root: Entity, mut f: impl FnMut(&mut RigidBody)) {
        let mut stack: SmallVec<[Entity; 8]> = SmallVec::new();
        stack.push(root);
        while let Some(entity) = stack.pop() {
            if let Ok(mut body) = self.rigid_bodies.get_mut(entity) {
                f(&mut *body);
            }
            if let Ok(children) = self.children.get(entity) {
                stack.extend(children.iter());
            }
        }
    }

    fn place(&mut self, entity: Entity, point: CagePoint) {
        if let Ok((mut position, rotation)) = self.poses.get_mut(entity) {
            position.x = point.x;
            position.y = point.y;
            if let Some(mut rotation) = rotation {
                rotation.degrees = point.rotation;
            }
        } else {
            debug!("{:?} has no MapPosition, placement skipped", entity);
        }
    }
}

/// Entities the overlap detector saw inside the cage on the previous tick.
///
/// Only the built-in detector reads this; hosts that trigger
/// [`OverlapEvent`](crate::events::overlap::OverlapEvent)s themselves can
/// ignore it.
#[derive(Component, Debug, Clone, Default)]
pub struct CageOccupancy {
    pub inside: FxHashSet<Entity>,
}

/// Cage state: captured birds, free birds inside, and the active rescue.
#[derive(Component)]
#[require(CageOccupancy)]
pub struct ContainmentZone {
    captured: Vec<Entity>,
    free: BTreeSet<Entity>,
    session: Option<RescueSession>,
    listeners: Vec<Box<dyn RescueListener>>,
    /// Seconds a rescuer must hold out.
    pub rescue_time: f32,
    /// Seconds captured birds stay kinematic after the teleport.
    pub teleport_delay: f32,
    /// Minimum physics steps before captured birds are dynamic again.
    pub settle_steps: u32,
    /// Where captured birds are teleported. Without it, captures are skipped.
    pub spawn_point: Option<CagePoint>,
    /// Where rescued birds are moved. Without it, they are freed in place.
    pub release_point: Option<CagePoint>,
}

impl ContainmentZone {
    pub fn new(rescue_time: f32) -> Self {
        Self {
            captured: Vec::new(),
            free: BTreeSet::new(),
            session: None,
            listeners: Vec::new(),
            rescue_time,
            teleport_delay: 0.1,
            settle_steps: 1,
            spawn_point: None,
            release_point: None,
        }
    }

    /// Build a zone from the loaded configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            teleport_delay: config.teleport_delay,
            settle_steps: config.settle_steps,
            spawn_point: config.cage_spawn,
            release_point: config.cage_release,
            ..Self::new(config.rescue_time)
        }
    }

    pub fn with_spawn_point(mut self, point: CagePoint) -> Self {
        self.spawn_point = Some(point);
        self
    }

    pub fn with_release_point(mut self, point: CagePoint) -> Self {
        self.release_point = Some(point);
        self
    }

    pub fn with_settle(mut self, delay: f32, steps: u32) -> Self {
        self.teleport_delay = delay;
        self.settle_steps = steps;
        self
    }

    pub fn with_listener(mut self, listener: impl RescueListener + 'static) -> Self {
        self.add_listener(listener);
        self
    }

    pub fn add_listener(&mut self, listener: impl RescueListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn captured(&self) -> &[Entity] {
        &self.captured
    }

    pub fn free(&self) -> &BTreeSet<Entity> {
        &self.free
    }

    pub fn session(&self) -> Option<&RescueSession> {
        self.session.as_ref()
    }

    pub fn is_rescuing(&self) -> bool {
        self.session.is_some()
    }

    pub fn rescuer(&self) -> Option<Entity> {
        self.session.as_ref().map(|s| s.rescuer())
    }

    fn is_rescuer(&self, entity: Entity) -> bool {
        self.rescuer() == Some(entity)
    }

    /// An entity started overlapping the cage.
    pub fn on_enter(&mut self, other: Entity, ctx: &mut CageContext) {
        let Some(state) = ctx.bird_state(other) else {
            debug!("Ignoring enter of non-bird {:?}", other);
            return;
        };
        debug!("{:?} entered cage {:?} while {:?}", other, ctx.zone, state);

        match state {
            BirdState::Held => self.capture_sequence(other, ctx),
            BirdState::Captured => {}
            BirdState::Free => {
                self.track_free(other);
                self.try_start_rescue(ctx);
            }
        }
    }

    /// An entity stopped overlapping the cage.
    pub fn on_exit(&mut self, other: Entity, ctx: &mut CageContext) {
        let reason = match ctx.bird_state(other) {
            Some(BirdState::Captured) => return,
            Some(_) => CancelReason::RescuerLeft,
            None => CancelReason::RescuerGone,
        };

        if self.free.remove(&other) {
            debug!("{:?} left cage {:?}. Free: {}", other, ctx.zone, self.free.len());
            if self.is_rescuer(other) {
                self.cancel_rescue(reason, ctx);
            }
        }
    }

    /// An entity is still overlapping; reconcile state changes that
    /// enter/exit alone cannot observe. Never captures.
    pub fn on_stay(&mut self, other: Entity, ctx: &mut CageContext) {
        let state = ctx.bird_state(other);
        match state {
            None => self.on_exit(other, ctx),
            Some(BirdState::Held) | Some(BirdState::Captured) => {
                if self.free.remove(&other) {
                    debug!(
                        "{:?} no longer free inside cage {:?}. Free: {}",
                        other,
                        ctx.zone,
                        self.free.len()
                    );
                    if self.is_rescuer(other) {
                        let reason = if state == Some(BirdState::Held) {
                            CancelReason::RescuerHeld
                        } else {
                            CancelReason::RescuerCaptured
                        };
                        self.cancel_rescue(reason, ctx);
                    }
                }
            }
            Some(BirdState::Free) => {
                self.track_free(other);
                self.try_start_rescue(ctx);
            }
        }
    }

    fn track_free(&mut self, bird: Entity) {
        if self.captured.contains(&bird) {
            warn!("{:?} is marked free but still listed as caged", bird);
            return;
        }
        if self.free.insert(bird) {
            debug!(
                "Tracking free bird {:?}. Free: {}, caged: {}",
                bird,
                self.free.len(),
                self.captured.len()
            );
        }
    }

    /// Start a countdown if none is running, someone is caged, and a free
    /// bird is inside. The lowest entity id among valid free birds wins.
    pub fn try_start_rescue(&mut self, ctx: &mut CageContext) {
        if self.session.is_some() || self.captured.is_empty() {
            return;
        }
        let Some(rescuer) = self
            .free
            .iter()
            .copied()
            .find(|bird| ctx.bird_state(*bird) == Some(BirdState::Free))
        else {
            return;
        };
        let presenter = ctx
            .birds
            .get(rescuer)
            .map(|bird| bird.presentation_target(rescuer))
            .unwrap_or(rescuer);

        info!("Rescue started by {:?} in cage {:?}", rescuer, ctx.zone);
        self.session = Some(RescueSession::new(rescuer, presenter, self.rescue_time));
        for listener in self.listeners.iter_mut() {
            listener.rescue_started(presenter, self.rescue_time);
        }
    }

    /// Drop the active session (if any), notify, and let another free bird
    /// take over.
    pub fn cancel_rescue(&mut self, reason: CancelReason, ctx: &mut CageContext) {
        if let Some(session) = self.session.take() {
            info!(
                "Rescue by {:?} cancelled after {:.1}s: {:?}",
                session.rescuer(),
                session.elapsed(),
                reason
            );
            for listener in self.listeners.iter_mut() {
                listener.rescue_ended(session.presenter());
            }
        }
        self.try_start_rescue(ctx);
    }

    /// Teleport a held bird into the cage and mark it captured.
    pub fn capture_sequence(&mut self, bird: Entity, ctx: &mut CageContext) {
        match ctx.bird_state(bird) {
            None => return,
            Some(BirdState::Captured) => {
                debug!("{:?} is already caged", bird);
                return;
            }
            Some(_) => {}
        }
        if self.captured.contains(&bird) {
            return;
        }
        let Some(spawn) = self.spawn_point else {
            warn!("Cage spawn point not assigned, {:?} was not captured", bird);
            return;
        };

        info!("Teleporting {:?} into cage {:?}", bird, ctx.zone);
        ctx.for_each_body(bird, RigidBody::make_kinematic);
        ctx.place(bird, spawn);
        ctx.commands
            .entity(bird)
            .try_insert(PhysicsSettle::new(self.teleport_delay, self.settle_steps));

        if let Ok(mut state) = ctx.birds.get_mut(bird) {
            state.set_state(BirdState::Captured);
        }

        self.free.remove(&bird);
        if self.is_rescuer(bird) {
            self.cancel_rescue(CancelReason::RescuerCaptured, ctx);
        }

        self.captured.push(bird);
        info!("Caged {:?}. Total caged: {}", bird, self.captured.len());

        ctx.commands.trigger(ForceDropEvent);

        let total = ctx.registry.count(|e| ctx.birds.contains(e));
        if ctx.win.check(self.captured.len(), total) {
            ctx.commands.trigger(TeamCapturedEvent { zone: ctx.zone });
        }

        self.try_start_rescue(ctx);
    }

    /// Free every caged bird and clear the captured list.
    pub fn release_all(&mut self, ctx: &mut CageContext) {
        let released = std::mem::take(&mut self.captured);
        let mut count = 0;
        if self.release_point.is_none() && !released.is_empty() {
            warn!("Cage release point not assigned, birds are freed in place");
        }

        for bird in released {
            let Ok(mut state) = ctx.birds.get_mut(bird) else {
                warn!("Despawned bird {:?} in cage list during release", bird);
                continue;
            };
            state.set_state(BirdState::Free);

            ctx.for_each_body(bird, RigidBody::unfreeze);
            ctx.commands.entity(bird).try_remove::<PhysicsSettle>();
            if let Some(point) = self.release_point {
                ctx.place(bird, point);
            }
            debug!("Released {:?}", bird);
            count += 1;
        }

        info!("Released {} birds from cage {:?}", count, ctx.zone);
    }

    /// Drop stale handles and advance the rescue countdown by `delta`.
    pub fn tick(&mut self, delta: f32, ctx: &mut CageContext) {
        self.captured.retain(|bird| {
            let alive = ctx.birds.contains(*bird);
            if !alive {
                debug!("Dropping despawned bird {:?} from cage list", bird);
            }
            alive
        });
        self.free.retain(|bird| ctx.birds.contains(*bird));

        let Some(rescuer) = self.rescuer() else {
            return;
        };
        let guard = self.rescue_guard(rescuer, ctx);
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.advance(delta, guard) {
            RescueStep::Active { remaining } => {
                let presenter = session.presenter();
                for listener in self.listeners.iter_mut() {
                    listener.rescue_updated(presenter, remaining);
                }
            }
            RescueStep::Cancelled(reason) => self.cancel_rescue(reason, ctx),
            RescueStep::Completed => {
                let presenter = session.presenter();
                self.session = None;
                info!(
                    "Rescue completed by {:?}, releasing {} birds",
                    rescuer,
                    self.captured.len()
                );
                self.release_all(ctx);
                for listener in self.listeners.iter_mut() {
                    listener.rescue_ended(presenter);
                }
            }
        }
    }

    fn rescue_guard(&self, rescuer: Entity, ctx: &CageContext) -> Result<(), CancelReason> {
        match ctx.bird_state(rescuer) {
            None => return Err(CancelReason::RescuerGone),
            Some(BirdState::Held) => return Err(CancelReason::RescuerHeld),
            Some(BirdState::Captured) => return Err(CancelReason::RescuerCaptured),
            Some(BirdState::Free) => {}
        }
        if !self.free.contains(&rescuer) {
            return Err(CancelReason::RescuerLeft);
        }
        if self.captured.is_empty() {
            return Err(CancelReason::CageEmpty);
        }
        Ok(())
    }
}

impl fmt::Debug for ContainmentZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainmentZone")
            .field("captured", &self.captured)
            .field("free", &self.free)
            .field("session", &self.session)
            .field("listeners", &self.listeners.len())
            .field("rescue_time", &self.rescue_time)
            .field("spawn_point", &self.spawn_point)
            .field("release_point", &self.release_point)
            .finish()
    }
}
