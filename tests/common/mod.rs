//! Shared level fixtures for the integration tests.

#![allow(dead_code)]

use bevy_ecs::prelude::*;

use birdcage::components::bird::{Bird, BirdState};
use birdcage::components::boxcollider::BoxCollider;
use birdcage::components::cage::{CagePoint, ContainmentZone};
use birdcage::components::mapposition::MapPosition;
use birdcage::components::rigidbody::RigidBody;
use birdcage::components::rotation::Rotation;
use birdcage::events::overlap::OverlapEvent;
use birdcage::game::{
    build_schedule, register_observers, setup_world, step, trigger_drop, trigger_overlap,
    trigger_pickup,
};
use birdcage::resources::gameconfig::GameConfig;

pub const SPAWN: CagePoint = CagePoint {
    x: 20.0,
    y: 20.0,
    rotation: 90.0,
};
pub const RELEASE: CagePoint = CagePoint {
    x: 80.0,
    y: 20.0,
    rotation: 0.0,
};

pub struct Level {
    pub world: World,
    pub schedule: Schedule,
}

impl Level {
    pub fn new() -> Self {
        let mut config = GameConfig::new();
        config.cage_spawn = Some(SPAWN);
        config.cage_release = Some(RELEASE);
        Self::with_config(config)
    }

    pub fn with_config(config: GameConfig) -> Self {
        let mut world = World::new();
        setup_world(&mut world, config);
        register_observers(&mut world);
        Self {
            world,
            schedule: build_schedule(),
        }
    }

    /// A 40x40 cage at the origin driven by `zone`.
    pub fn cage(&mut self, zone: ContainmentZone) -> Entity {
        self.world
            .spawn((zone, MapPosition::new(0.0, 0.0), BoxCollider::new(40.0, 40.0)))
            .id()
    }

    /// A cage configured like the level's `GameConfig`.
    pub fn default_cage(&mut self) -> Entity {
        let zone = ContainmentZone::from_config(self.world.resource::<GameConfig>());
        self.cage(zone)
    }

    /// A bird without a collider: only explicit overlap events reach the cage.
    pub fn bird(&mut self, state: BirdState) -> Entity {
        self.world
            .spawn((
                Bird::new().with_state(state),
                MapPosition::new(200.0, 200.0),
                Rotation::default(),
                RigidBody::with_velocity(3.0, -1.0),
            ))
            .id()
    }

    pub fn step(&mut self, dt: f32) {
        step(&mut self.world, &mut self.schedule, dt);
    }

    pub fn steps(&mut self, n: usize, dt: f32) {
        for _ in 0..n {
            self.step(dt);
        }
    }

    pub fn enter(&mut self, cage: Entity, other: Entity) {
        trigger_overlap(&mut self.world, OverlapEvent::enter(cage, other));
    }

    pub fn exit(&mut self, cage: Entity, other: Entity) {
        trigger_overlap(&mut self.world, OverlapEvent::exit(cage, other));
    }

    pub fn stay(&mut self, cage: Entity, other: Entity) {
        trigger_overlap(&mut self.world, OverlapEvent::stay(cage, other));
    }

    pub fn pickup(&mut self, holder: Entity, target: Entity) {
        trigger_pickup(&mut self.world, holder, target);
    }

    pub fn drop_held(&mut self, holder: Entity) {
        trigger_drop(&mut self.world, holder);
    }

    pub fn zone(&self, cage: Entity) -> &ContainmentZone {
        self.world
            .get::<ContainmentZone>(cage)
            .expect("cage entity has a ContainmentZone")
    }

    pub fn state(&self, bird: Entity) -> BirdState {
        self.world.get::<Bird>(bird).expect("bird exists").state()
    }

    pub fn position(&self, entity: Entity) -> MapPosition {
        *self.world.get::<MapPosition>(entity).expect("entity has a position")
    }

    pub fn body(&self, entity: Entity) -> RigidBody {
        self.world
            .get::<RigidBody>(entity)
            .expect("entity has a body")
            .clone()
    }
}
