//! Headless scenario scripts.
//!
//! A scenario is a JSON file describing the cage, the birds, the opposing
//! team's holders, and a list of actions keyed by tick number. The binary
//! uses it to drive a level without input or rendering.
//!
//! # Format
//!
//! ```json
//! {
//!   "cage": { "x": 0, "y": 0, "width": 40, "height": 40 },
//!   "birds": [ { "name": "robin", "x": 100, "y": 0, "size": 4 } ],
//!   "holders": [ { "name": "hunter", "x": 100, "y": 0 } ],
//!   "actions": [
//!     { "tick": 1, "action": "pickup", "holder": "hunter", "target": "robin" },
//!     { "tick": 2, "action": "move", "target": "hunter", "x": 10, "y": 10 },
//!     { "tick": 3, "action": "drop", "holder": "hunter" },
//!     { "tick": 9, "action": "despawn", "target": "robin" }
//!   ]
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::*;
use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::components::mapposition::MapPosition;
use crate::game::{spawn_bird, spawn_cage, spawn_holder, trigger_drop, trigger_pickup};

#[derive(Debug, Clone, Deserialize)]
pub struct CageSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BirdSpec {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_bird_size")]
    pub size: f32,
}

fn default_bird_size() -> f32 {
    4.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct HolderSpec {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Move { target: String, x: f32, y: f32 },
    Pickup { holder: String, target: String },
    Drop { holder: String },
    Despawn { target: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedAction {
    pub tick: u64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub cage: CageSpec,
    pub birds: Vec<BirdSpec>,
    #[serde(default)]
    pub holders: Vec<HolderSpec>,
    #[serde(default)]
    pub actions: Vec<ScriptedAction>,
}

/// Entities spawned for a scenario, by name.
#[derive(Debug, Clone)]
pub struct ScenarioEntities {
    pub cage: Entity,
    pub named: FxHashMap<String, Entity>,
}

impl ScenarioEntities {
    pub fn get(&self, name: &str) -> Option<Entity> {
        self.named.get(name).copied()
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse scenario: {}", e))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scenario {:?}: {}", path, e))?;
        Self::from_json(&json)
    }

    /// Last tick that has a scripted action, if any.
    pub fn last_tick(&self) -> Option<u64> {
        self.actions.iter().map(|a| a.tick).max()
    }

    /// Spawn the cage, birds and holders into `world`.
    pub fn spawn(&self, world: &mut World) -> ScenarioEntities {
        let cage = spawn_cage(
            world,
            self.cage.x,
            self.cage.y,
            self.cage.width,
            self.cage.height,
        );
        let mut named = FxHashMap::default();
        for bird in &self.birds {
            let entity = spawn_bird(world, bird.x, bird.y, bird.size);
            if named.insert(bird.name.clone(), entity).is_some() {
                warn!("Duplicate scenario name '{}', last one wins", bird.name);
            }
        }
        for holder in &self.holders {
            let entity = spawn_holder(world, holder.x, holder.y);
            if named.insert(holder.name.clone(), entity).is_some() {
                warn!("Duplicate scenario name '{}', last one wins", holder.name);
            }
        }
        ScenarioEntities { cage, named }
    }

    /// Run every action scripted for `tick`, in file order.
    pub fn apply(&self, world: &mut World, tick: u64, entities: &ScenarioEntities) {
        for scripted in self.actions.iter().filter(|a| a.tick == tick) {
            debug!("Tick {}: {:?}", tick, scripted.action);
            apply_action(world, &scripted.action, entities);
        }
    }
}

fn resolve(entities: &ScenarioEntities, name: &str) -> Option<Entity> {
    let entity = entities.get(name);
    if entity.is_none() {
        warn!("Scenario action refers to unknown name '{}'", name);
    }
    entity
}

fn apply_action(world: &mut World, action: &Action, entities: &ScenarioEntities) {
    match action {
        Action::Move { target, x, y } => {
            let Some(entity) = resolve(entities, target) else {
                return;
            };
            if let Some(mut pos) = world.get_mut::<MapPosition>(entity) {
                pos.x = *x;
                pos.y = *y;
            } else {
                debug!("Move of '{}' skipped: entity has no position", target);
            }
        }
        Action::Pickup { holder, target } => {
            if let (Some(holder), Some(target)) =
                (resolve(entities, holder), resolve(entities, target))
            {
                trigger_pickup(world, holder, target);
            }
        }
        Action::Drop { holder } => {
            if let Some(holder) = resolve(entities, holder) {
                trigger_drop(world, holder);
            }
        }
        Action::Despawn { target } => {
            let Some(entity) = resolve(entities, target) else {
                return;
            };
            match world.get_entity_mut(entity) {
                Ok(entity_mut) => entity_mut.despawn(),
                Err(_) => debug!("Despawn of '{}' skipped: already gone", target),
            }
        }
    }
}
