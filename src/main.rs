//! Birdcage headless host.
//!
//! Runs the capture-and-rescue core without a window:
//!
//! 1. Load `config.ini` into [`GameConfig`] (defaults when missing)
//! 2. Build the ECS world, observers and the update schedule
//! 3. Spawn the level from a JSON scenario
//! 4. Run fixed-rate ticks, applying scripted actions, until the round ends
//!    or the tick limit is reached
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --scenario scenarios/demo.json
//! ```

use birdcage::game::{build_schedule, register_observers, setup_world, start_round, step};
use birdcage::resources::gameconfig::GameConfig;
use birdcage::resources::gamestate::GameState;
use birdcage::resources::worldsignals::WorldSignals;
use birdcage::scenario::Scenario;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Birdcage capture-and-rescue simulation
#[derive(Parser)]
#[command(version, about = "Runs a capture-and-rescue round headlessly from a scenario script.")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Path to the JSON scenario to play.
    #[arg(long, value_name = "PATH", default_value = "scenarios/demo.json")]
    scenario: PathBuf,

    /// Stop after this many ticks even if the round is still running.
    #[arg(long)]
    ticks: Option<u64>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}. Using default configuration.", e);
    }

    let scenario = match Scenario::load_from_file(&cli.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let dt = config.tick_delta();
    let max_ticks = cli.ticks.unwrap_or_else(|| {
        // Default: the whole round plus one second of slack.
        let round_ticks = (config.round_duration / dt).ceil() as u64;
        round_ticks.max(scenario.last_tick().unwrap_or(0)) + config.tick_rate as u64
    });

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    setup_world(&mut world, config);
    register_observers(&mut world);

    let entities = scenario.spawn(&mut world);
    log::info!(
        "Scenario loaded: {} birds, {} holders, {} actions",
        scenario.birds.len(),
        scenario.holders.len(),
        scenario.actions.len()
    );

    start_round(&mut world);

    let mut update = build_schedule();

    // --------------- Main loop ---------------
    let mut tick: u64 = 0;
    while tick < max_ticks {
        if world.resource::<WorldSignals>().has_flag("game_over") {
            break;
        }
        scenario.apply(&mut world, tick, &entities);
        step(&mut world, &mut update, dt);
        tick += 1;
    }

    let state = world.resource::<GameState>().get().clone();
    let signals = world.resource::<WorldSignals>();
    log::info!(
        "Stopped after {} ticks in state {:?}. Scene: {:?}, caged: {:?}, round left: {:?}",
        tick,
        state,
        signals.get_string("scene"),
        signals.get_integer("cage:captured"),
        signals.get_string("round:display")
    );
}
