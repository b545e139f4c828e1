//! Game state polling.
//!
//! [`check_pending_state`] turns a pending [`NextGameState`] into a
//! [`GameStateChangedEvent`], which the observer in
//! [`crate::events::gamestate`] applies. [`state_is_playing`] is a run
//! condition for systems that only make sense during a round.
use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use bevy_ecs::prelude::*;

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}
