//! Win condition polling and the "team captured" reaction.
//!
//! Captures consult the [`WinCondition`] latch directly. The per-tick
//! [`win_condition_system`] covers the other way a level can end up fully
//! caged: a free bird despawning while everyone else is already inside.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::bird::Bird;
use crate::components::cage::ContainmentZone;
use crate::events::gamestate::TeamCapturedEvent;
use crate::resources::birdregistry::BirdRegistry;
use crate::resources::gamestate::{GameStates, NextGameState, Outcome};
use crate::resources::wincondition::WinCondition;
use crate::resources::worldsignals::WorldSignals;

/// Compare each cage's captured count against the registry.
pub fn win_condition_system(
    zones: Query<(Entity, &ContainmentZone)>,
    birds: Query<(), With<Bird>>,
    mut registry: ResMut<BirdRegistry>,
    mut win: ResMut<WinCondition>,
    mut commands: Commands,
) {
    if win.has_fired() {
        return;
    }
    let total = registry.count(|e| birds.contains(e));
    for (zone, cage) in zones.iter() {
        if win.check(cage.captured().len(), total) {
            commands.trigger(TeamCapturedEvent { zone });
            return;
        }
    }
}

/// Request the win scene and end the round.
///
/// The scene name is published as the world signal string `scene`; the host
/// hands it to its scene loader. Without a configured scene the round still
/// ends, only the transition is skipped.
pub fn team_captured_observer(
    trigger: On<TeamCapturedEvent>,
    win: Res<WinCondition>,
    mut next_state: ResMut<NextGameState>,
    mut world_signals: ResMut<WorldSignals>,
) {
    info!("Every bird caged in {:?}", trigger.event().zone);
    match win.scene.as_deref() {
        Some(scene) => world_signals.set_string("scene", scene),
        None => warn!("Win scene not configured, scene transition skipped"),
    }
    next_state.set(GameStates::Finished(Outcome::BirdsCaptured));
}
