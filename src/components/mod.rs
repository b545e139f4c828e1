//! ECS components for entities.
//!
//! Submodules overview:
//! - [`bird`] – capture state of a capturable entity
//! - [`boxcollider`] – axis-aligned rectangular collider for overlap detection
//! - [`cage`] – containment zone and its capture/rescue state machine
//! - [`holder`] – single pickup slot carried by the opposing team
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`rescue`] – rescue countdown session and its outcomes
//! - [`rigidbody`] – simple body storing velocity and a kinematic flag
//! - [`rotation`] – rotation angle in degrees
//! - [`settle`] – post-teleport window before physics are re-enabled

pub mod bird;
pub mod boxcollider;
pub mod cage;
pub mod holder;
pub mod mapposition;
pub mod rescue;
pub mod rigidbody;
pub mod rotation;
pub mod settle;
