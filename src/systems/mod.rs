//! Simulation systems and observers.
//!
//! Submodules overview
//! - [`birdregistry`] – keep the bird registry in sync with spawned birds
//! - [`cage`] – overlap detection and dispatch, rescue countdown tick
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`pickup`] – pickup, drop and force-drop observers
//! - [`roundclock`] – round countdown and draw outcome
//! - [`settle`] – re-enable physics on teleported birds
//! - [`time`] – update simulation time and delta
//! - [`wincondition`] – per-tick win check and the capture-win reaction

pub mod birdregistry;
pub mod cage;
pub mod gamestate;
pub mod movement;
pub mod pickup;
pub mod roundclock;
pub mod settle;
pub mod time;
pub mod wincondition;
