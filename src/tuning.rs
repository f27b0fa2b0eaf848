//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be rebalanced from a JSON
//! file without recompiling. Missing fields fall back to the defaults.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// File looked up in the working directory at start-up
pub const TUNING_FILE: &str = "tuning.json";

/// Error raised while loading configuration files
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io(std::io::Error),
    /// File is not valid JSON for the expected shape
    Parse(serde_json::Error),
    /// Parsed fine but a value is out of range
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {}", e),
            ConfigError::Invalid(what) => write!(f, "invalid config: {}", what),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Inclusive damage range rolled per hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: i32,
    pub max: i32,
}

impl DamageRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

/// Sprite dimensions in pixels (full width/height, not half-extents)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSizes {
    pub player: Vec2,
    pub enemy: Vec2,
    pub bullet: Vec2,
    pub start_button: Vec2,
    pub pause_button: Vec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            player: Vec2::new(64.0, 48.0),
            enemy: Vec2::new(64.0, 48.0),
            bullet: Vec2::new(18.0, 8.0),
            start_button: Vec2::new(220.0, 80.0),
            pause_button: Vec2::new(64.0, 64.0),
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield size in pixels
    pub playfield: Vec2,
    /// Enemies per wave
    pub spawn_number: usize,
    /// Seconds between a wave being cleared and the next one arriving
    pub wave_delay: f64,
    /// Player movement per tick
    pub player_speed: f32,
    /// Enemy movement per tick
    pub enemy_speed: f32,
    /// Projectile movement per tick
    pub projectile_speed: f32,
    /// Gap between the player's front edge and a fresh projectile
    pub player_muzzle_offset: f32,
    /// Gap between an enemy's front edge and a fresh projectile
    pub enemy_muzzle_offset: f32,
    /// Distance an enemy drives before holding position
    pub enemy_hold_distance: f32,
    /// Enemy reload duration range in seconds (drawn once per enemy)
    pub enemy_reload: (f32, f32),
    /// Cursor dead zone for driving forward
    pub drive_dead_zone: f32,
    pub player_health: i32,
    pub enemy_health: i32,
    /// Damage dealt to enemies by player projectiles
    pub player_damage: DamageRange,
    /// Damage dealt to the player by enemy projectiles
    pub enemy_damage: DamageRange,
    pub sprites: SpriteSizes,
    /// Top edge of the start button on the title screen
    pub start_button_y: f32,
    /// Top-left corner of the pause/play button, as an offset from the top-right
    pub pause_button_inset: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield: Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            spawn_number: 8,
            wave_delay: 1.0,
            player_speed: 8.0,
            enemy_speed: 8.0,
            projectile_speed: 15.0,
            player_muzzle_offset: 8.0,
            enemy_muzzle_offset: 25.0,
            enemy_hold_distance: ENEMY_HOLD_DISTANCE,
            enemy_reload: (0.5, 1.5),
            drive_dead_zone: FIRE_DEAD_ZONE,
            player_health: PLAYER_MAX_HEALTH,
            enemy_health: ENEMY_MAX_HEALTH,
            player_damage: DamageRange::new(1, 7),
            enemy_damage: DamageRange::new(1, 3),
            sprites: SpriteSizes::default(),
            start_button_y: 550.0,
            pause_button_inset: Vec2::new(200.0, 20.0),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load `tuning.json` if present, otherwise defaults
    pub fn load() -> Self {
        let path = Path::new(TUNING_FILE);
        if !path.exists() {
            log::info!("No {} found, using default tuning", TUNING_FILE);
            return Self::default();
        }

        match Self::from_path(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", TUNING_FILE);
                tuning
            }
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                Self::default()
            }
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playfield.x <= 0.0 || self.playfield.y <= 0.0 {
            return Err(ConfigError::Invalid("playfield must have a positive size"));
        }
        if self.spawn_number == 0 {
            return Err(ConfigError::Invalid("spawn_number must be at least 1"));
        }
        if self.wave_delay < 0.0 {
            return Err(ConfigError::Invalid("wave_delay must not be negative"));
        }
        for damage in [self.player_damage, self.enemy_damage] {
            if damage.min < 1 || damage.max < damage.min {
                return Err(ConfigError::Invalid("damage range must satisfy 1 <= min <= max"));
            }
        }
        let (lo, hi) = self.enemy_reload;
        if lo < 0.0 || hi < lo {
            return Err(ConfigError::Invalid("enemy_reload must satisfy 0 <= min <= max"));
        }
        if self.player_health <= 0 || self.enemy_health <= 0 {
            return Err(ConfigError::Invalid("health values must be positive"));
        }
        let sprites = self.sprites;
        let all_sizes = [sprites.player, sprites.enemy, sprites.bullet];
        if all_sizes.iter().any(|s| s.x <= 0.0 || s.y <= 0.0) {
            return Err(ConfigError::Invalid("sprite sizes must be positive"));
        }
        Ok(())
    }

    /// The eight spawn points around the playfield edge
    pub fn spawn_points(&self) -> [Vec2; 8] {
        let (w, h) = (self.playfield.x, self.playfield.y);
        [
            Vec2::new(0.0, 200.0),
            Vec2::new(0.0, h - 200.0),
            Vec2::new(200.0, h),
            Vec2::new(w - 200.0, h),
            Vec2::new(w, 200.0),
            Vec2::new(w, h - 200.0),
            Vec2::new(200.0, 0.0),
            Vec2::new(w - 200.0, 0.0),
        ]
    }

    /// Start button region as (top-left, size)
    pub fn start_button(&self) -> (Vec2, Vec2) {
        let size = self.sprites.start_button;
        let origin = Vec2::new((self.playfield.x - size.x) / 2.0, self.start_button_y);
        (origin, size)
    }

    /// Pause/play button region as (top-left, size)
    pub fn pause_button(&self) -> (Vec2, Vec2) {
        let origin = Vec2::new(
            self.playfield.x - self.pause_button_inset.x,
            self.pause_button_inset.y,
        );
        (origin, self.sprites.pause_button)
    }
}

/// Check if `point` lies inside the region (edges inclusive)
pub fn region_contains(region: (Vec2, Vec2), point: Vec2) -> bool {
    let (origin, size) = region;
    point.x >= origin.x
        && point.x <= origin.x + size.x
        && point.y >= origin.y
        && point.y <= origin.y + size.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "spawn_number": 3, "wave_delay": 0.5 }"#).unwrap();
        assert_eq!(tuning.spawn_number, 3);
        assert_eq!(tuning.wave_delay, 0.5);
        assert_eq!(tuning.player_damage, DamageRange::new(1, 7));
        assert_eq!(tuning.playfield, Vec2::new(1000.0, 800.0));
    }

    #[test]
    fn test_rejects_bad_damage_range() {
        let err = Tuning::from_json(r#"{ "enemy_damage": { "min": 4, "max": 2 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ spawn_number: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse config"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::from_path("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_spawn_points_on_perimeter() {
        let tuning = Tuning::default();
        for p in tuning.spawn_points() {
            let on_edge = p.x == 0.0 || p.y == 0.0 || p.x == 1000.0 || p.y == 800.0;
            assert!(on_edge, "{:?} is not on the playfield edge", p);
        }
    }

    #[test]
    fn test_button_regions() {
        let tuning = Tuning::default();
        let (origin, size) = tuning.start_button();
        assert_eq!(origin, Vec2::new(390.0, 550.0));
        assert!(region_contains((origin, size), origin + size / 2.0));
        assert!(!region_contains((origin, size), Vec2::new(10.0, 10.0)));

        let (origin, _) = tuning.pause_button();
        assert_eq!(origin, Vec2::new(800.0, 20.0));
    }
}
