//! Level setup and the per-tick schedule.
//!
//! The host (the headless binary or a test) builds a level in four steps:
//!
//! 1. [`setup_world`] inserts every resource derived from [`GameConfig`]
//! 2. [`register_observers`] spawns the global observers
//! 3. [`spawn_cage`] / [`spawn_bird`] / [`spawn_holder`] populate the level
//! 4. [`start_round`] enters `Playing`, then [`step`] runs one tick at a time
//!
//! # Tick order
//!
//! time update → registry sync → movement → carry → settle → overlap
//! detection → rescue tick → win check → round clock → pending state

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::bird::Bird;
use crate::components::boxcollider::BoxCollider;
use crate::components::cage::ContainmentZone;
use crate::components::holder::Holder;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::rotation::Rotation;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::overlap::OverlapEvent;
use crate::events::pickup::{DropEvent, PickupEvent};
use crate::events::rescue::LogListener;
use crate::resources::birdregistry::BirdRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::roundclock::RoundClock;
use crate::resources::wincondition::WinCondition;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;
use crate::systems::birdregistry::sync_bird_registry;
use crate::systems::cage::{cage_overlap_detector, cage_overlap_observer, rescue_tick_system};
use crate::systems::gamestate::{check_pending_state, state_is_playing};
use crate::systems::movement::movement_system;
use crate::systems::pickup::{carry_system, drop_observer, force_drop_observer, pickup_observer};
use crate::systems::roundclock::round_clock_system;
use crate::systems::settle::physics_settle_system;
use crate::systems::time::update_world_time;
use crate::systems::wincondition::{team_captured_observer, win_condition_system};

/// Insert the level resources. `config` is moved into the world last.
pub fn setup_world(world: &mut World, config: GameConfig) {
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(WorldSignals::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(BirdRegistry::new());
    world.insert_resource(WinCondition::new(config.win_scene.clone()));
    world.insert_resource(RoundClock::new(config.round_duration));
    world.insert_resource(config.movement);
    world.insert_resource(config);
}

/// Spawn the global observers. Must run before the first tick.
pub fn register_observers(world: &mut World) {
    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(cage_overlap_observer));
    world.spawn(Observer::new(team_captured_observer));
    world.spawn(Observer::new(pickup_observer));
    world.spawn(Observer::new(drop_observer));
    world.spawn(Observer::new(force_drop_observer));
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();
}

/// Build the update schedule in the fixed tick order.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            sync_bird_registry,
            movement_system,
            carry_system,
            physics_settle_system,
            cage_overlap_detector,
            rescue_tick_system,
            win_condition_system,
            round_clock_system.run_if(state_is_playing),
            check_pending_state,
        )
            .chain(),
    );
    update
}

/// Spawn a cage covering `width` x `height` from `(x, y)`, configured from
/// [`GameConfig`] and logging its rescue notifications.
pub fn spawn_cage(world: &mut World, x: f32, y: f32, width: f32, height: f32) -> Entity {
    let zone = match world.get_resource::<GameConfig>() {
        Some(config) => ContainmentZone::from_config(config),
        None => ContainmentZone::new(GameConfig::new().rescue_time),
    };
    let cage = world
        .spawn((
            zone.with_listener(LogListener),
            MapPosition::new(x, y),
            BoxCollider::new(width, height),
        ))
        .id();
    if let Some(mut signals) = world.get_resource_mut::<WorldSignals>() {
        signals.set_entity("cage", cage);
    }
    info!("Spawned cage {:?} at ({}, {})", cage, x, y);
    cage
}

/// Spawn a free bird with a dynamic body and a `size` x `size` collider.
pub fn spawn_bird(world: &mut World, x: f32, y: f32, size: f32) -> Entity {
    world
        .spawn((
            Bird::new(),
            MapPosition::new(x, y),
            Rotation::default(),
            RigidBody::new(),
            BoxCollider::new(size, size),
        ))
        .id()
}

/// Spawn a member of the opposing team with an empty pickup slot.
pub fn spawn_holder(world: &mut World, x: f32, y: f32) -> Entity {
    world
        .spawn((Holder::new(), MapPosition::new(x, y), RigidBody::new()))
        .id()
}

/// Enter `Playing` immediately and start the round clock.
pub fn start_round(world: &mut World) {
    world.resource_mut::<NextGameState>().set(GameStates::Playing);
    world.trigger(GameStateChangedEvent {});
}

/// Deliver an overlap from outside the schedule and apply everything the cage
/// queued in response (settle insert, force drop, win notification).
pub fn trigger_overlap(world: &mut World, event: OverlapEvent) {
    world.trigger(event);
    world.flush();
}

/// Have `holder` try to pick up `target` from outside the schedule.
pub fn trigger_pickup(world: &mut World, holder: Entity, target: Entity) {
    world.trigger(PickupEvent { holder, target });
    world.flush();
}

/// Have `holder` drop whatever it carries from outside the schedule.
pub fn trigger_drop(world: &mut World, holder: Entity) {
    world.trigger(DropEvent { holder });
    world.flush();
}

/// Run one tick of `dt` unscaled seconds.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers(); // Clear changed components for next tick
}

/// Despawn every bird and cage and re-arm the round.
pub fn clean_level(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Bird>, With<ContainmentZone>, With<Holder>)>>()
        .iter(world)
        .collect();
    for entity in entities {
        world.despawn(entity);
    }
    world.resource_mut::<BirdRegistry>().clear();
    world.resource_mut::<WinCondition>().reset();
    let duration = world
        .get_resource::<GameConfig>()
        .map_or(GameConfig::new().round_duration, |c| c.round_duration);
    world.resource_mut::<RoundClock>().reset(duration);
    info!("Level cleaned");
}
