//! Tanks and projectiles
//!
//! Each entity caches its oriented rectangle for the collision pass. Rotation
//! is stored in radians; movement is a fixed distance per tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::OrientedRect;
use crate::{angle_of, heading};

/// A projectile fired by the player or an enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Distance travelled per tick
    pub speed: f32,
    /// Heading in radians, fixed at creation
    pub rotation: f32,
    pub half_extents: Vec2,
    pub from_player: bool,
    /// Flagged for removal at the end of the tick
    pub marked: bool,
    /// Hit box as of the start of the last update
    pub rect: OrientedRect,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec2, rotation: f32, speed: f32, size: Vec2, from_player: bool) -> Self {
        let half_extents = size / 2.0;
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            speed,
            rotation,
            half_extents,
            from_player,
            marked: false,
            rect: OrientedRect::from_pose(pos, half_extents, rotation),
        }
    }

    /// Refresh the hit box, then fly forward
    pub fn update(&mut self) {
        self.rect = OrientedRect::from_pose(self.pos, self.half_extents, self.rotation);
        self.vel = heading(self.rotation) * self.speed;
        self.pos += self.vel;
    }

    /// True once the projectile has fully left a playfield of the given size
    pub fn is_outside(&self, playfield: Vec2) -> bool {
        let h = self.half_extents;
        self.pos.x - h.x > playfield.x
            || self.pos.x + h.x < 0.0
            || self.pos.y - h.y > playfield.y
            || self.pos.y + h.y < 0.0
    }
}

/// The player's tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerUnit {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    /// Vector from the tank to the cursor
    pub direction: Vec2,
    pub rotation: f32,
    pub health: i32,
    pub half_extents: Vec2,
    /// Cursor must be further than this on some axis to drive
    pub dead_zone: f32,
    /// Set on a fire press, consumed by the world
    pub wants_to_fire: bool,
    pub destroyed: bool,
    pub rect: OrientedRect,
}

impl PlayerUnit {
    pub fn new(id: u32, pos: Vec2, size: Vec2, speed: f32, health: i32, dead_zone: f32) -> Self {
        let half_extents = size / 2.0;
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            speed,
            direction: Vec2::ZERO,
            rotation: 0.0,
            health,
            half_extents,
            dead_zone,
            wants_to_fire: false,
            destroyed: false,
            rect: OrientedRect::from_pose(pos, half_extents, 0.0),
        }
    }

    /// Aim at the cursor, register a fire press and drive forward if asked
    ///
    /// Movement is per tick; `_dt` is accepted for frame-rate aware callers.
    pub fn update(&mut self, pointer: Vec2, forward_held: bool, fire_pressed: bool, _dt: f32) {
        self.direction = pointer - self.pos;
        self.rotation = angle_of(self.direction);
        self.rect = OrientedRect::from_pose(self.pos, self.half_extents, self.rotation);

        if fire_pressed {
            self.wants_to_fire = true;
        }

        let outside_dead_zone =
            self.direction.x.abs() > self.dead_zone || self.direction.y.abs() > self.dead_zone;
        if forward_held && outside_dead_zone {
            self.vel = heading(self.rotation) * self.speed;
            self.pos += self.vel;
        }
    }

    /// Apply damage, clamping at zero
    ///
    /// Returns true if this hit destroyed the tank.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        if self.health <= 0 {
            self.health = 0;
            self.destroyed = true;
            return true;
        }
        false
    }

    /// Point in front of the barrel at `gap` past the front edge
    pub fn muzzle(&self, gap: f32) -> Vec2 {
        self.pos + self.direction.normalize_or_zero() * (self.half_extents.x + gap)
    }
}

/// Enemy behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyPhase {
    /// Driving toward the player, with the distance covered so far
    Approaching { traveled: f32 },
    /// Parked, firing whenever reloaded
    Holding,
}

/// An enemy tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyUnit {
    pub id: u32,
    /// Id of the unit this tank hunts; resolved by the world every tick
    pub target: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub direction: Vec2,
    pub rotation: f32,
    pub health: i32,
    pub half_extents: Vec2,
    /// Seconds between shots once holding
    pub reload: f32,
    pub hold_distance: f32,
    pub phase: EnemyPhase,
    pub wants_to_fire: bool,
    pub marked: bool,
    /// Time of the last shot (seconds)
    pub last_fire: f64,
    pub rect: OrientedRect,
}

/// Construction parameters shared by a whole wave
#[derive(Debug, Clone, Copy)]
pub struct EnemySpec {
    pub size: Vec2,
    pub speed: f32,
    pub health: i32,
    pub hold_distance: f32,
    pub reload: (f32, f32),
}

impl EnemyUnit {
    /// Create an enemy at `pos` hunting `target`; the reload time is rolled here
    pub fn new(id: u32, target: u32, pos: Vec2, spec: &EnemySpec, rng: &mut impl Rng) -> Self {
        let (lo, hi) = spec.reload;
        let reload = if hi > lo { rng.random_range(lo..=hi) } else { lo };
        let half_extents = spec.size / 2.0;
        Self {
            id,
            target,
            pos,
            vel: Vec2::ZERO,
            speed: spec.speed,
            direction: Vec2::ZERO,
            rotation: 0.0,
            health: spec.health,
            half_extents,
            reload,
            hold_distance: spec.hold_distance,
            phase: EnemyPhase::Approaching { traveled: 0.0 },
            wants_to_fire: false,
            marked: false,
            last_fire: 0.0,
            rect: OrientedRect::from_pose(pos, half_extents, 0.0),
        }
    }

    /// Aim at the target's current position and either advance or fire
    pub fn update(&mut self, target_pos: Vec2, now: f64) {
        self.direction = target_pos - self.pos;
        self.rotation = angle_of(self.direction);

        match self.phase {
            EnemyPhase::Holding => {
                if now - self.last_fire >= self.reload as f64 {
                    self.wants_to_fire = true;
                    self.last_fire = now;
                }
            }
            EnemyPhase::Approaching { traveled } => {
                self.vel = heading(self.rotation) * self.speed;
                self.pos += self.vel;
                let traveled = traveled + self.vel.length();
                self.phase = if traveled >= self.hold_distance {
                    EnemyPhase::Holding
                } else {
                    EnemyPhase::Approaching { traveled }
                };
            }
        }

        self.rect = OrientedRect::from_pose(self.pos, self.half_extents, self.rotation);
    }

    pub fn has_reached_position(&self) -> bool {
        self.phase == EnemyPhase::Holding
    }

    /// Apply damage; marks the tank for removal once health runs out
    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
        if self.health <= 0 {
            self.marked = true;
        }
    }

    pub fn muzzle(&self, gap: f32) -> Vec2 {
        self.pos + self.direction.normalize_or_zero() * (self.half_extents.x + gap)
    }
}
