//! Birdcage library.
//!
//! Capture-and-rescue core for a two-team game: the opposing team carries
//! birds into a cage, free birds standing in the cage long enough release
//! everyone, and the round ends when every bird is caged or time runs out.
//!
//! This module exposes the ECS components, resources, systems, and events
//! for use in integration tests and as a reusable library.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod scenario;
pub mod systems;
