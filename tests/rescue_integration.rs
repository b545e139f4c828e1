//! Capture and rescue flows driven by explicit overlap events.

mod common;

use bevy_ecs::prelude::*;
use crossbeam_channel::unbounded;

use birdcage::components::bird::{Bird, BirdState};
use birdcage::components::cage::ContainmentZone;
use birdcage::components::holder::Holder;
use birdcage::components::rotation::Rotation;
use birdcage::components::settle::PhysicsSettle;
use birdcage::events::rescue::{ChannelListener, RescueNotice};
use birdcage::game::spawn_holder;
use birdcage::resources::birdregistry::BirdRegistry;

use common::{Level, RELEASE, SPAWN};

const DT: f32 = 0.5;

fn rescue_zone() -> ContainmentZone {
    ContainmentZone::new(10.0)
        .with_spawn_point(SPAWN)
        .with_release_point(RELEASE)
}

#[test]
fn three_bird_rescue_example() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let a = level.bird(BirdState::Held);
    let b = level.bird(BirdState::Free);
    let c = level.bird(BirdState::Free);
    level.step(0.0);
    assert_eq!(level.world.resource::<BirdRegistry>().raw_len(), 3);

    level.enter(cage, a);
    assert_eq!(level.zone(cage).captured(), &[a]);
    assert_eq!(level.state(a), BirdState::Captured);

    level.enter(cage, b);
    assert!(level.zone(cage).free().contains(&b));
    assert_eq!(level.zone(cage).rescuer(), Some(b));
    assert_eq!(level.zone(cage).session().unwrap().deadline(), 10.0);

    level.steps(8, DT);
    assert_eq!(level.zone(cage).session().unwrap().elapsed(), 4.0);

    level.exit(cage, b);
    assert!(!level.zone(cage).is_rescuing());
    assert_eq!(level.zone(cage).captured(), &[a]);
    assert_eq!(level.state(a), BirdState::Captured);

    level.enter(cage, c);
    assert_eq!(level.zone(cage).rescuer(), Some(c));

    level.steps(19, DT);
    assert_eq!(level.zone(cage).rescuer(), Some(c));
    assert_eq!(level.state(a), BirdState::Captured);

    level.step(DT);
    assert!(!level.zone(cage).is_rescuing());
    assert!(level.zone(cage).captured().is_empty());
    assert_eq!(level.state(a), BirdState::Free);
}

#[test]
fn capture_teleports_and_freezes_bird() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let a = level.bird(BirdState::Held);

    level.enter(cage, a);

    let pos = level.position(a);
    assert_eq!((pos.x, pos.y), (SPAWN.x, SPAWN.y));
    assert_eq!(level.world.get::<Rotation>(a).unwrap().degrees, SPAWN.rotation);
    let body = level.body(a);
    assert!(body.is_kinematic());
    assert_eq!((body.velocity_x, body.velocity_y), (0.0, 0.0));
    assert!(level.world.get::<PhysicsSettle>(a).is_some());
}

#[test]
fn capturing_twice_is_a_no_op() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let a = level.bird(BirdState::Held);

    level.enter(cage, a);
    level.exit(cage, a);
    level.enter(cage, a);

    assert_eq!(level.zone(cage).captured(), &[a]);
    assert!(level.zone(cage).free().is_empty());
}

#[test]
fn free_bird_waits_until_someone_is_caged() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let b = level.bird(BirdState::Free);

    level.enter(cage, b);
    assert!(level.zone(cage).free().contains(&b));
    assert!(!level.zone(cage).is_rescuing());

    // Once someone is caged, the bird already standing inside takes over.
    let a = level.bird(BirdState::Held);
    level.enter(cage, a);
    assert_eq!(level.zone(cage).rescuer(), Some(b));
}

#[test]
fn lowest_entity_id_is_chosen_as_rescuer() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let first = level.bird(BirdState::Free);
    let second = level.bird(BirdState::Free);
    let a = level.bird(BirdState::Held);

    level.enter(cage, second);
    level.enter(cage, first);
    level.enter(cage, a);

    let expected = first.min(second);
    assert_eq!(level.zone(cage).rescuer(), Some(expected));
}

#[test]
fn rescuer_picked_up_cancels_and_hands_over() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let a = level.bird(BirdState::Held);
    level.enter(cage, a);
    let b = level.bird(BirdState::Free);
    let c = level.bird(BirdState::Free);
    level.enter(cage, b);
    level.enter(cage, c);
    let rescuer = level.zone(cage).rescuer().unwrap();
    let other = if rescuer == b { c } else { b };

    level.steps(4, DT);
    level
        .world
        .get_mut::<Bird>(rescuer)
        .unwrap()
        .set_state(BirdState::Held);
    level.stay(cage, rescuer);

    assert_eq!(level.zone(cage).rescuer(), Some(other));
    assert_eq!(level.zone(cage).session().unwrap().elapsed(), 0.0);
    assert!(!level.zone(cage).free().contains(&rescuer));
    assert_eq!(level.zone(cage).captured(), &[a]);
}

#[test]
fn rescuer_held_between_overlap_events_is_caught_by_the_tick() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let a = level.bird(BirdState::Held);
    let b = level.bird(BirdState::Free);
    level.enter(cage, a);
    level.enter(cage, b);

    level
        .world
        .get_mut::<Bird>(b)
        .unwrap()
        .set_state(BirdState::Held);
    level.step(DT);

    assert!(!level.zone(cage).is_rescuing());
    assert_eq!(level.state(a), BirdState::Captured);
}

#[test]
fn carried_rescuer_entering_again_is_captured_and_session_ends() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let a = level.bird(BirdState::Held);
    let b = level.bird(BirdState::Free);
    level.enter(cage, a);
    level.enter(cage, b);
    assert_eq!(level.zone(cage).rescuer(), Some(b));

    level
        .world
        .get_mut::<Bird>(b)
        .unwrap()
        .set_state(BirdState::Held);
    level.enter(cage, b);

    assert!(!level.zone(cage).is_rescuing());
    assert_eq!(level.zone(cage).captured(), &[a, b]);
    assert!(level.zone(cage).free().is_empty());
}

#[test]
fn despawned_rescuer_cancels_on_next_tick() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let a = level.bird(BirdState::Held);
    let b = level.bird(BirdState::Free);
    level.enter(cage, a);
    level.enter(cage, b);

    level.world.despawn(b);
    level.step(DT);

    assert!(!level.zone(cage).is_rescuing());
    assert!(level.zone(cage).free().is_empty());
    assert_eq!(level.zone(cage).captured(), &[a]);
    assert_eq!(level.world.resource::<BirdRegistry>().raw_len(), 1);
}

#[test]
fn despawned_captured_bird_is_dropped_from_the_list() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let a = level.bird(BirdState::Held);
    let b = level.bird(BirdState::Free);
    level.enter(cage, a);
    level.enter(cage, b);

    level.world.despawn(a);
    level.step(DT);

    assert!(level.zone(cage).captured().is_empty());
    assert!(!level.zone(cage).is_rescuing());
    assert_eq!(level.state(b), BirdState::Free);
}

#[test]
fn completion_releases_everyone_to_release_point() {
    let mut level = Level::new();
    let cage = level.cage(rescue_zone());
    let a = level.bird(BirdState::Held);
    let d = level.bird(BirdState::Held);
    let b = level.bird(BirdState::Free);
    level.enter(cage, a);
    level.enter(cage, d);
    level.enter(cage, b);

    level.steps(20, DT);

    assert!(level.zone(cage).captured().is_empty());
    for bird in [a, d] {
        assert_eq!(level.state(bird), BirdState::Free);
        let pos = level.position(bird);
        assert_eq!((pos.x, pos.y), (RELEASE.x, RELEASE.y));
        assert!(!level.body(bird).is_kinematic());
        assert!(level.world.get::<PhysicsSettle>(bird).is_none());
    }
    assert_eq!(level.state(b), BirdState::Free);
}

#[test]
fn missing_spawn_point_skips_capture() {
    let mut level = Level::new();
    let cage = level.cage(ContainmentZone::new(10.0));
    let a = level.bird(BirdState::Held);
    let before = level.position(a);

    level.enter(cage, a);

    assert!(level.zone(cage).captured().is_empty());
    assert_eq!(level.state(a), BirdState::Held);
    assert_eq!(level.position(a), before);
    assert!(!level.body(a).is_kinematic());
}

#[test]
fn missing_release_point_frees_in_place() {
    let mut level = Level::new();
    let cage = level.cage(ContainmentZone::new(2.0).with_spawn_point(SPAWN));
    let a = level.bird(BirdState::Held);
    let b = level.bird(BirdState::Free);
    level.enter(cage, a);
    level.enter(cage, b);

    level.steps(4, DT);

    assert_eq!(level.state(a), BirdState::Free);
    let pos = level.position(a);
    assert_eq!((pos.x, pos.y), (SPAWN.x, SPAWN.y));
}

#[test]
fn bird_freed_in_place_and_picked_up_inside_needs_to_reenter() {
    let mut level = Level::new();
    let cage = level.cage(ContainmentZone::new(2.0).with_spawn_point(SPAWN));
    let a = level.bird(BirdState::Held);
    let b = level.bird(BirdState::Free);
    let hunter = spawn_holder(&mut level.world, SPAWN.x, SPAWN.y);
    level.enter(cage, a);
    level.enter(cage, b);
    level.steps(4, DT);
    assert_eq!(level.state(a), BirdState::Free);

    // Still standing in the cage when it gets grabbed.
    level.pickup(hunter, a);
    assert_eq!(level.state(a), BirdState::Held);
    for _ in 0..3 {
        level.stay(cage, a);
    }
    assert_eq!(level.state(a), BirdState::Held);
    assert!(level.zone(cage).captured().is_empty());
    assert_eq!(level.world.get::<Holder>(hunter).unwrap().held, Some(a));

    level.exit(cage, a);
    level.enter(cage, a);
    assert_eq!(level.state(a), BirdState::Captured);
    assert_eq!(level.zone(cage).captured(), &[a]);
    assert!(level.world.get::<Holder>(hunter).unwrap().is_empty());
}

#[test]
fn listeners_receive_start_updates_and_end() {
    let (tx, rx) = unbounded();
    let mut level = Level::new();
    let cage = level.cage(rescue_zone().with_listener(ChannelListener::new(tx)));
    let hud = level.world.spawn_empty().id();
    let a = level.bird(BirdState::Held);
    let b = level
        .world
        .spawn(Bird::new().with_presenter(hud))
        .id();

    level.enter(cage, a);
    level.enter(cage, b);
    level.steps(2, DT);
    level.exit(cage, b);

    let notices: Vec<RescueNotice> = rx.try_iter().collect();
    assert_eq!(
        notices,
        vec![
            RescueNotice::Started {
                target: hud,
                deadline: 10.0
            },
            RescueNotice::Updated {
                target: hud,
                remaining: 9.5
            },
            RescueNotice::Updated {
                target: hud,
                remaining: 9.0
            },
            RescueNotice::Ended { target: hud },
        ]
    );
}

#[test]
fn each_cage_notifies_only_its_own_listeners() {
    let (tx_one, rx_one) = unbounded();
    let (tx_two, rx_two) = unbounded();
    let mut level = Level::new();
    let one = level.cage(rescue_zone().with_listener(ChannelListener::new(tx_one)));
    let two = level.cage(rescue_zone().with_listener(ChannelListener::new(tx_two)));
    let a = level.bird(BirdState::Held);
    let b = level.bird(BirdState::Free);

    level.enter(one, a);
    level.enter(one, b);

    assert_eq!(rx_one.try_iter().count(), 1);
    assert_eq!(rx_two.try_iter().count(), 0);
    assert!(!level.zone(two).is_rescuing());
}
