//! Game configuration resource.
//!
//! Manages cage, round and movement settings loaded from an INI configuration
//! file. Provides defaults for safe startup and methods to load/save
//! configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [cage]
//! rescue_time = 10.0
//! teleport_delay = 0.1
//! settle_steps = 1
//! spawn_x = 0.0
//! spawn_y = 0.0
//! spawn_rotation = 0.0
//! release_x = 40.0
//! release_y = 0.0
//! release_rotation = 0.0
//!
//! [win]
//! scene = HumansWin
//!
//! [round]
//! duration = 300.0
//! draw_scene = Draw
//!
//! [movement]
//! caged_speed = 0.5
//! caged_jump = 0.5
//!
//! [sim]
//! tick_rate = 60
//! ```
//!
//! Spawn and release points have no defaults: a level without them still
//! runs, but captures (or relocation on release) are skipped with a warning.

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::cage::CagePoint;

/// Default safe values for startup
const DEFAULT_RESCUE_TIME: f32 = 10.0;
const DEFAULT_TELEPORT_DELAY: f32 = 0.1;
const DEFAULT_SETTLE_STEPS: u32 = 1;
const DEFAULT_WIN_SCENE: &str = "HumansWin";
const DEFAULT_ROUND_DURATION: f32 = 300.0;
const DEFAULT_DRAW_SCENE: &str = "Draw";
const DEFAULT_CAGED_SPEED: f32 = 0.5;
const DEFAULT_CAGED_JUMP: f32 = 0.5;
const DEFAULT_TICK_RATE: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Multipliers the locomotion controller applies to captured birds.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MovementTuning {
    pub caged_speed_multiplier: f32,
    pub caged_jump_multiplier: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            caged_speed_multiplier: DEFAULT_CAGED_SPEED,
            caged_jump_multiplier: DEFAULT_CAGED_JUMP,
        }
    }
}

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Seconds a rescuer must stay in the cage to free everyone.
    pub rescue_time: f32,
    /// Seconds a captured bird stays kinematic after the teleport.
    pub teleport_delay: f32,
    /// Minimum physics steps before a teleported bird is dynamic again.
    pub settle_steps: u32,
    /// Pose captured birds are teleported to.
    pub cage_spawn: Option<CagePoint>,
    /// Pose rescued birds are moved to.
    pub cage_release: Option<CagePoint>,
    /// Scene loaded when every bird is caged.
    pub win_scene: Option<String>,
    /// Round length in seconds.
    pub round_duration: f32,
    /// Scene loaded when the round clock runs out.
    pub draw_scene: Option<String>,
    /// Caged locomotion multipliers.
    pub movement: MovementTuning,
    /// Fixed simulation ticks per second for the headless host.
    pub tick_rate: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            rescue_time: DEFAULT_RESCUE_TIME,
            teleport_delay: DEFAULT_TELEPORT_DELAY,
            settle_steps: DEFAULT_SETTLE_STEPS,
            cage_spawn: None,
            cage_release: None,
            win_scene: Some(DEFAULT_WIN_SCENE.to_string()),
            round_duration: DEFAULT_ROUND_DURATION,
            draw_scene: Some(DEFAULT_DRAW_SCENE.to_string()),
            movement: MovementTuning::default(),
            tick_rate: DEFAULT_TICK_RATE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Seconds per simulation tick.
    pub fn tick_delta(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [cage] section
        if let Some(v) = config.getfloat("cage", "rescue_time").ok().flatten() {
            self.rescue_time = v as f32;
        }
        if let Some(v) = config.getfloat("cage", "teleport_delay").ok().flatten() {
            self.teleport_delay = v as f32;
        }
        if let Some(v) = config.getuint("cage", "settle_steps").ok().flatten() {
            self.settle_steps = v as u32;
        }
        if let Some(point) = read_point(&config, "cage", "spawn") {
            self.cage_spawn = Some(point);
        }
        if let Some(point) = read_point(&config, "cage", "release") {
            self.cage_release = Some(point);
        }

        // [win] section
        if let Some(scene) = read_scene(&config, "win", "scene") {
            self.win_scene = scene;
        }

        // [round] section
        if let Some(v) = config.getfloat("round", "duration").ok().flatten() {
            self.round_duration = v as f32;
        }
        if let Some(scene) = read_scene(&config, "round", "draw_scene") {
            self.draw_scene = scene;
        }

        // [movement] section
        if let Some(v) = config.getfloat("movement", "caged_speed").ok().flatten() {
            self.movement.caged_speed_multiplier = v as f32;
        }
        if let Some(v) = config.getfloat("movement", "caged_jump").ok().flatten() {
            self.movement.caged_jump_multiplier = v as f32;
        }

        // [sim] section
        if let Some(v) = config.getuint("sim", "tick_rate").ok().flatten() {
            self.tick_rate = v as u32;
        }

        info!(
            "Loaded config: rescue={}s, settle={}s/{} steps, spawn={:?}, release={:?}, win_scene={:?}, round={}s, tick_rate={}",
            self.rescue_time,
            self.teleport_delay,
            self.settle_steps,
            self.cage_spawn,
            self.cage_release,
            self.win_scene,
            self.round_duration,
            self.tick_rate
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [cage] section
        config.set("cage", "rescue_time", Some(self.rescue_time.to_string()));
        config.set("cage", "teleport_delay", Some(self.teleport_delay.to_string()));
        config.set("cage", "settle_steps", Some(self.settle_steps.to_string()));
        if let Some(point) = self.cage_spawn {
            write_point(&mut config, "cage", "spawn", point);
        }
        if let Some(point) = self.cage_release {
            write_point(&mut config, "cage", "release", point);
        }

        // [win] section
        config.set("win", "scene", self.win_scene.clone());

        // [round] section
        config.set("round", "duration", Some(self.round_duration.to_string()));
        config.set("round", "draw_scene", self.draw_scene.clone());

        // [movement] section
        config.set(
            "movement",
            "caged_speed",
            Some(self.movement.caged_speed_multiplier.to_string()),
        );
        config.set(
            "movement",
            "caged_jump",
            Some(self.movement.caged_jump_multiplier.to_string()),
        );

        // [sim] section
        config.set("sim", "tick_rate", Some(self.tick_rate.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

/// Reads `{prefix}_x`, `{prefix}_y` and optional `{prefix}_rotation`.
/// Both coordinates must be present for the point to exist.
fn read_point(config: &Ini, section: &str, prefix: &str) -> Option<CagePoint> {
    let x = config
        .getfloat(section, &format!("{prefix}_x"))
        .ok()
        .flatten()?;
    let y = config
        .getfloat(section, &format!("{prefix}_y"))
        .ok()
        .flatten()?;
    let rotation = config
        .getfloat(section, &format!("{prefix}_rotation"))
        .ok()
        .flatten()
        .unwrap_or(0.0);
    Some(CagePoint::new(x as f32, y as f32, rotation as f32))
}

fn write_point(config: &mut Ini, section: &str, prefix: &str, point: CagePoint) {
    config.set(section, &format!("{prefix}_x"), Some(point.x.to_string()));
    config.set(section, &format!("{prefix}_y"), Some(point.y.to_string()));
    config.set(
        section,
        &format!("{prefix}_rotation"),
        Some(point.rotation.to_string()),
    );
}

/// `None` when the key is absent, `Some(None)` when it is present but empty.
fn read_scene(config: &Ini, section: &str, key: &str) -> Option<Option<String>> {
    let value = config.get_map_ref().get(section)?.get(key)?;
    Some(value.as_deref().and_then(non_empty))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
