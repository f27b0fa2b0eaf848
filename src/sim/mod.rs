//! Simulation core
//!
//! All gameplay logic lives here. Nothing in this module draws or plays sound:
//! - Seeded RNG only
//! - Cues are reported through a `CueSink`
//! - Removal is flag-then-compact, never during iteration

pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use collision::{OrientedRect, point_in_triangle, rects_overlap};
pub use entity::{EnemyPhase, EnemySpec, EnemyUnit, PlayerUnit, Projectile};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, tick};
