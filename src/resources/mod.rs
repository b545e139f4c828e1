//! ECS resources made available to systems.
//!
//! Overview
//! - `birdregistry` – every capturable entity alive in the level
//! - `gameconfig` – INI-backed tuning (cage points, timings, scenes)
//! - `gamestate` – authoritative and pending high-level game state
//! - `roundclock` – round countdown ending in a draw
//! - `wincondition` – one-shot "every bird caged" latch
//! - `worldsignals` – global key/value store for cross-system communication
//! - `worldtime` – simulation time and delta
pub mod birdregistry;
pub mod gameconfig;
pub mod gamestate;
pub mod roundclock;
pub mod wincondition;
pub mod worldsignals;
pub mod worldtime;
