//! Game state transition events and observer.
//!
//! Systems can request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. Emitting a [`GameStateChangedEvent`] then triggers the
//! observer in this module, which applies the transition to [`GameState`]
//! and runs the enter/exit bookkeeping (round clock, world flags).
//!
//! [`TeamCapturedEvent`] is fired by a containment zone when the win latch
//! trips; see [`crate::systems::wincondition::team_captured_observer`].
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState, Outcome};
use crate::resources::roundclock::RoundClock;
use crate::resources::worldsignals::WorldSignals;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
///
/// Emitting this event causes [`observe_gamestate_change_event`] to read
/// [`NextGameState`]. If it contains [`Pending`], the observer updates the
/// authoritative [`GameState`], runs exit/enter hooks, and clears the pending
/// value; if it is [`Unchanged`], nothing happens.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Event fired once when every registered bird is caged.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamCapturedEvent {
    /// The cage that completed the capture.
    pub zone: Entity,
}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], then runs the
///   exit hook of the previous state and the enter hook of the new one, and
///   resets [`NextGameState`] to [`Unchanged`].
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    mut world_signals: Option<ResMut<WorldSignals>>,
    mut round_clock: Option<ResMut<RoundClock>>,
) {
    debug!("GameStateChangedEvent triggered");

    if let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    {
        // Clone the next state value first so we don't keep an immutable borrow while mutating.
        let next_state_value = next_game_state.get().clone();
        match next_state_value {
            Pending(new_state) => {
                let old_state = game_state.get().clone();
                info!("Transitioning from {:?} to {:?}", old_state, new_state);
                game_state.set(new_state.clone());
                next_game_state.reset();
                on_state_exit(&old_state);
                on_state_enter(
                    &new_state,
                    world_signals.as_deref_mut(),
                    round_clock.as_deref_mut(),
                );
            }
            Unchanged => {
                debug!("No state change pending.");
            }
        }
    } else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
    }
}

/// Internal: state-specific "enter" bookkeeping.
fn on_state_enter(
    state: &GameStates,
    world_signals: Option<&mut WorldSignals>,
    round_clock: Option<&mut RoundClock>,
) {
    match state {
        GameStates::None => debug!("Entered None state"),
        GameStates::Playing => {
            if let Some(clock) = round_clock {
                clock.start();
            }
            if let Some(signals) = world_signals {
                signals.clear_flag("game_over");
            }
        }
        GameStates::Finished(outcome) => {
            if let Some(clock) = round_clock {
                clock.stop();
            }
            if let Some(signals) = world_signals {
                signals.set_flag("game_over");
                let label = match outcome {
                    Outcome::BirdsCaptured => "birds_captured",
                    Outcome::Draw => "draw",
                };
                signals.set_string("outcome", label);
            }
        }
    }
}

/// Internal: state-specific "exit" bookkeeping.
fn on_state_exit(state: &GameStates) {
    match state {
        GameStates::None => debug!("Exited None state"),
        GameStates::Playing => debug!("Exited Playing state"),
        GameStates::Finished(_) => debug!("Exited Finished state"),
    }
}
