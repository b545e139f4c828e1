//! Pickup, drop and force-drop observers.
//!
//! These keep [`Holder`] slots and [`Bird`] states consistent:
//! - a pickup succeeds only for an empty holder and a `Free` bird
//! - a drop returns a `Held` bird to `Free`
//! - a force drop empties every holder; birds the cage already captured
//!   stay `Captured`
//!
//! [`carry_system`] moves held birds along with their holder.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::bird::{Bird, BirdState};
use crate::components::holder::Holder;
use crate::components::mapposition::MapPosition;
use crate::events::forcedrop::ForceDropEvent;
use crate::events::pickup::{DropEvent, PickupEvent};

pub fn pickup_observer(
    trigger: On<PickupEvent>,
    mut holders: Query<&mut Holder>,
    mut birds: Query<&mut Bird>,
) {
    let PickupEvent { holder, target } = *trigger.event();
    let Ok(mut slot) = holders.get_mut(holder) else {
        debug!("Pickup by {:?} ignored: not a holder", holder);
        return;
    };
    if !slot.is_empty() {
        debug!("Pickup by {:?} ignored: hands full", holder);
        return;
    }
    let Ok(mut bird) = birds.get_mut(target) else {
        debug!("Pickup of {:?} ignored: not a bird", target);
        return;
    };
    if !bird.is_free() {
        debug!("Pickup of {:?} ignored: bird is {:?}", target, bird.state());
        return;
    }
    bird.set_state(BirdState::Held);
    slot.held = Some(target);
    info!("{:?} picked up {:?}", holder, target);
}

pub fn drop_observer(
    trigger: On<DropEvent>,
    mut holders: Query<&mut Holder>,
    mut birds: Query<&mut Bird>,
) {
    let holder = trigger.event().holder;
    let Some(target) = holders.get_mut(holder).ok().and_then(|mut h| h.take()) else {
        return;
    };
    release(target, &mut birds);
    info!("{:?} dropped {:?}", holder, target);
}

/// Empty every holder. Fired by the cage after each capture.
pub fn force_drop_observer(
    _trigger: On<ForceDropEvent>,
    mut holders: Query<&mut Holder>,
    mut birds: Query<&mut Bird>,
) {
    for mut slot in holders.iter_mut() {
        if let Some(target) = slot.take() {
            release(target, &mut birds);
            debug!("Force-dropped {:?}", target);
        }
    }
}

fn release(target: Entity, birds: &mut Query<&mut Bird>) {
    if let Ok(mut bird) = birds.get_mut(target)
        && bird.is_held()
    {
        bird.set_state(BirdState::Free);
    }
}

/// Keep carried birds on top of their holder.
///
/// Runs after movement and before overlap detection, so a bird carried into
/// the cage is seen entering it on the same tick.
pub fn carry_system(
    holders: Query<(&Holder, &MapPosition)>,
    mut carried: Query<&mut MapPosition, (With<Bird>, Without<Holder>)>,
) {
    for (slot, holder_pos) in holders.iter() {
        if let Some(target) = slot.held
            && let Ok(mut pos) = carried.get_mut(target)
        {
            pos.x = holder_pos.x;
            pos.y = holder_pos.y;
        }
    }
}
