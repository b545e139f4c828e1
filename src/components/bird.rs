//! Capturable entity ("bird") component.
//!
//! Every entity that can be captured by the opposing team carries a [`Bird`]
//! component. It stores the three mutually exclusive states a bird can be in
//! and the presentation collaborator (a player's menu/HUD entity) that should
//! react to rescue notifications started by this bird.
//!
//! # State Flow
//!
//! ```text
//! Free --pickup--> Held --enters cage--> Captured --rescue--> Free
//!   ^               |
//!   +-----drop------+
//! ```
//!
//! # Related
//!
//! - [`crate::resources::birdregistry::BirdRegistry`] – tracks every live bird
//! - [`crate::components::cage::ContainmentZone`] – drives `Held -> Captured -> Free`
//! - [`crate::systems::pickup`] – drives `Free <-> Held`

use bevy_ecs::prelude::{Component, Entity};

use crate::resources::gameconfig::MovementTuning;

/// The three mutually exclusive states of a capturable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BirdState {
    /// Roaming freely; can be picked up or start a rescue.
    #[default]
    Free,
    /// Carried by a member of the opposing team.
    Held,
    /// Locked inside a containment zone until rescued.
    Captured,
}

/// Per-entity capture state.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bird {
    state: BirdState,
    /// Entity whose UI reacts to rescue notifications for this bird.
    /// `None` means the bird entity itself is the presentation target.
    pub presenter: Option<Entity>,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

impl Bird {
    /// Create a free bird without a dedicated presentation entity.
    pub fn new() -> Self {
        Self {
            state: BirdState::Free,
            presenter: None,
        }
    }

    /// Attach the presentation collaborator resolved at spawn time.
    pub fn with_presenter(mut self, presenter: Entity) -> Self {
        self.presenter = Some(presenter);
        self
    }

    /// Start in a given state. Mostly useful for tests and level scripts.
    pub fn with_state(mut self, state: BirdState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> BirdState {
        self.state
    }

    pub fn set_state(&mut self, state: BirdState) {
        self.state = state;
    }

    pub fn is_free(&self) -> bool {
        self.state == BirdState::Free
    }

    pub fn is_held(&self) -> bool {
        self.state == BirdState::Held
    }

    pub fn is_captured(&self) -> bool {
        self.state == BirdState::Captured
    }

    /// Entity that should receive presentation events for this bird.
    pub fn presentation_target(&self, own_entity: Entity) -> Entity {
        self.presenter.unwrap_or(own_entity)
    }

    /// Horizontal speed multiplier the locomotion controller should apply.
    pub fn speed_multiplier(&self, tuning: &MovementTuning) -> f32 {
        if self.is_captured() {
            tuning.caged_speed_multiplier
        } else {
            1.0
        }
    }

    /// Jump impulse multiplier the locomotion controller should apply.
    pub fn jump_multiplier(&self, tuning: &MovementTuning) -> f32 {
        if self.is_captured() {
            tuning.caged_jump_multiplier
        } else {
            1.0
        }
    }
}
