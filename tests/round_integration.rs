//! Round outcome: the win latch, scene hand-off and the round clock.

mod common;

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

use birdcage::components::bird::BirdState;
use birdcage::events::gamestate::TeamCapturedEvent;
use birdcage::game::start_round;
use birdcage::resources::gameconfig::GameConfig;
use birdcage::resources::gamestate::{GameState, GameStates, Outcome};
use birdcage::resources::roundclock::RoundClock;
use birdcage::resources::wincondition::WinCondition;
use birdcage::resources::worldsignals::WorldSignals;

use common::{Level, RELEASE, SPAWN};

#[derive(Resource, Default)]
struct WinCount(u32);

fn count_wins(_trigger: On<TeamCapturedEvent>, mut count: ResMut<WinCount>) {
    count.0 += 1;
}

fn level_with(round_duration: f32, win_scene: Option<&str>) -> Level {
    let mut config = GameConfig::new();
    config.cage_spawn = Some(SPAWN);
    config.cage_release = Some(RELEASE);
    config.round_duration = round_duration;
    config.win_scene = win_scene.map(str::to_string);
    let mut level = Level::with_config(config);
    level.world.init_resource::<WinCount>();
    level.world.add_observer(count_wins);
    level
}

fn game_state(level: &Level) -> GameStates {
    level.world.resource::<GameState>().get().clone()
}

#[test]
fn single_bird_capture_wins_exactly_once() {
    let mut level = level_with(300.0, Some("HumansWin"));
    let cage = level.default_cage();
    let bird = level.bird(BirdState::Held);
    start_round(&mut level.world);
    level.step(0.1);

    level.enter(cage, bird);
    assert_eq!(level.world.resource::<WinCount>().0, 1);
    assert!(level.world.resource::<WinCondition>().has_fired());
    assert!(!level.world.resource_mut::<WinCondition>().check(1, 1));

    level.steps(3, 0.1);
    assert_eq!(level.world.resource::<WinCount>().0, 1);
    assert_eq!(
        game_state(&level),
        GameStates::Finished(Outcome::BirdsCaptured)
    );
    let signals = level.world.resource::<WorldSignals>();
    assert_eq!(signals.get_string("scene").map(String::as_str), Some("HumansWin"));
    assert!(signals.has_flag("game_over"));
}

#[test]
fn partial_capture_does_not_win() {
    let mut level = level_with(300.0, Some("HumansWin"));
    let cage = level.default_cage();
    let caged = level.bird(BirdState::Held);
    let _free = level.bird(BirdState::Free);
    start_round(&mut level.world);
    level.step(0.1);

    level.enter(cage, caged);
    level.steps(3, 0.1);

    assert_eq!(level.world.resource::<WinCount>().0, 0);
    assert_eq!(game_state(&level), GameStates::Playing);
}

#[test]
fn last_free_bird_despawning_wins_on_the_next_tick() {
    let mut level = level_with(300.0, Some("HumansWin"));
    let cage = level.default_cage();
    let caged = level.bird(BirdState::Held);
    let free = level.bird(BirdState::Free);
    start_round(&mut level.world);
    level.step(0.1);
    level.enter(cage, caged);
    assert_eq!(level.world.resource::<WinCount>().0, 0);

    level.world.despawn(free);
    level.step(0.1);

    assert_eq!(level.world.resource::<WinCount>().0, 1);
    assert_eq!(
        game_state(&level),
        GameStates::Finished(Outcome::BirdsCaptured)
    );
}

#[test]
fn missing_win_scene_still_ends_the_round() {
    let mut level = level_with(300.0, None);
    let cage = level.default_cage();
    let bird = level.bird(BirdState::Held);
    start_round(&mut level.world);
    level.step(0.1);

    level.enter(cage, bird);
    level.step(0.1);

    assert_eq!(
        game_state(&level),
        GameStates::Finished(Outcome::BirdsCaptured)
    );
    assert!(level.world.resource::<WorldSignals>().get_string("scene").is_none());
}

#[test]
fn round_clock_ends_in_a_draw() {
    let mut level = level_with(1.0, Some("HumansWin"));
    level.default_cage();
    level.bird(BirdState::Free);
    start_round(&mut level.world);

    level.steps(3, 0.25);
    assert_eq!(game_state(&level), GameStates::Playing);
    assert_eq!(
        level
            .world
            .resource::<WorldSignals>()
            .get_string("round:display")
            .map(String::as_str),
        Some("0:00")
    );

    level.step(0.25);
    assert_eq!(game_state(&level), GameStates::Finished(Outcome::Draw));
    let signals = level.world.resource::<WorldSignals>();
    assert_eq!(signals.get_string("scene").map(String::as_str), Some("Draw"));
    assert_eq!(signals.get_string("outcome").map(String::as_str), Some("draw"));
    assert!(signals.has_flag("game_over"));
    assert!(!level.world.resource::<RoundClock>().running);
}

#[test]
fn round_clock_waits_for_playing() {
    let mut level = level_with(1.0, Some("HumansWin"));
    level.steps(10, 0.25);

    assert_eq!(game_state(&level), GameStates::None);
    assert_eq!(level.world.resource::<RoundClock>().remaining, 1.0);
}

#[test]
fn capture_on_the_last_tick_beats_the_draw() {
    let mut level = level_with(0.5, Some("HumansWin"));
    let cage = level.default_cage();
    let bird = level.bird(BirdState::Held);
    start_round(&mut level.world);
    level.step(0.25);

    // The pending win keeps the clock from requesting a draw on its last tick.
    level.enter(cage, bird);
    level.step(0.25);

    assert_eq!(
        game_state(&level),
        GameStates::Finished(Outcome::BirdsCaptured)
    );
}
