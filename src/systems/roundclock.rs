//! Round clock system.
//!
//! Counts the [`RoundClock`] down while the game is playing and ends the
//! round in a draw when it runs out. The remaining time is published to
//! [`WorldSignals`] as scalar `round:remaining` and string `round:display`.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState, NextGameStates, Outcome};
use crate::resources::roundclock::RoundClock;
use crate::resources::worldsignals::WorldSignals;
use crate::resources::worldtime::WorldTime;

/// Advance the round clock.
///
/// Does nothing while another state change is already pending, so a capture
/// win on the last tick of the round is not overridden by the draw.
pub fn round_clock_system(
    time: Res<WorldTime>,
    mut clock: ResMut<RoundClock>,
    mut next_state: ResMut<NextGameState>,
    mut world_signals: ResMut<WorldSignals>,
    config: Option<Res<GameConfig>>,
) {
    if matches!(next_state.get(), NextGameStates::Pending(_)) {
        return;
    }
    let expired = clock.tick(time.delta);
    world_signals.set_scalar("round:remaining", clock.remaining);
    world_signals.set_string("round:display", clock.display());
    if !expired {
        return;
    }

    info!("Round time is up");
    match config.as_ref().and_then(|c| c.draw_scene.as_deref()) {
        Some(scene) => world_signals.set_string("scene", scene),
        None => warn!("Draw scene not configured, scene transition skipped"),
    }
    next_state.set(GameStates::Finished(Outcome::Draw));
}
