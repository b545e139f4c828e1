//! Event types and observers used by the capture core.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them. Events provide a decoupled
//! way for systems to communicate without tight coupling or direct
//! dependencies.
//!
//! Submodules:
//! - [`forcedrop`] – global "drop everything" broadcast issued on capture
//! - [`gamestate`] – state transition notifications and the team-captured signal
//! - [`overlap`] – enter/stay/exit notifications between cages and entities
//! - [`pickup`] – pickup and drop requests from the holder's controller
//! - [`rescue`] – per-zone listener interface for rescue countdowns
//!
//! See each submodule for concrete event data, semantics, and example usage.
pub mod forcedrop;
pub mod gamestate;
pub mod overlap;
pub mod pickup;
pub mod rescue;
