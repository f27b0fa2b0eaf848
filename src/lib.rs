//! Shoot The Tanks - a top-down tank shooter
//!
//! Core modules:
//! - `sim`: Simulation core (entities, collisions, wave progression)
//! - `tuning`: Data-driven game balance
//! - `renderer`: Display list built from simulation state
//! - `platform`: Window/input/audio device abstraction
//! - `app`: Per-frame driver tying the above together

pub mod app;
pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use app::App;
pub use highscores::ScoreHistory;
pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 1000.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Target frame rate of the presentation loop
    pub const TARGET_FPS: u32 = 60;

    /// Full health for the player tank
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Starting health of every enemy tank
    pub const ENEMY_MAX_HEALTH: i32 = 10;

    /// Distance an enemy drives before it stops and starts shooting
    pub const ENEMY_HOLD_DISTANCE: f32 = 150.0;

    /// Cursor must be further than this (on either axis) for the player to drive
    pub const FIRE_DEAD_ZONE: f32 = 20.0;
}

/// Unit vector pointing along `rotation` (radians)
#[inline]
pub fn heading(rotation: f32) -> Vec2 {
    Vec2::new(rotation.cos(), rotation.sin())
}

/// Angle of a direction vector (radians, `atan2` convention)
#[inline]
pub fn angle_of(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}
