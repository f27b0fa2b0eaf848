//! Draw commands for tanks and projectiles

use glam::Vec2;

use super::{Anchor, DrawCommand, Sprite};
use crate::settings::Settings;
use crate::sim::GameState;

/// Font size of the health number drawn on each enemy
const ENEMY_HEALTH_FONT: f32 = 30.0;

fn rotated(sprite: Sprite, pos: Vec2, half_extents: Vec2, rotation: f32) -> DrawCommand {
    DrawCommand::Sprite {
        sprite,
        pos,
        size: half_extents * 2.0,
        rotation_deg: rotation.to_degrees(),
        anchor: Anchor::Center,
    }
}

/// Projectiles first, then the player, then enemies on top
pub fn entities(state: &GameState, settings: &Settings, out: &mut Vec<DrawCommand>) {
    for p in &state.projectiles {
        out.push(rotated(Sprite::Bullet, p.pos, p.half_extents, p.rotation));
    }

    let player = &state.player;
    out.push(rotated(
        Sprite::PlayerTank,
        player.pos,
        player.half_extents,
        player.rotation,
    ));

    for enemy in &state.enemies {
        out.push(rotated(
            Sprite::EnemyTank,
            enemy.pos,
            enemy.half_extents,
            enemy.rotation,
        ));
        if settings.show_enemy_health {
            out.push(DrawCommand::text(
                enemy.health.to_string(),
                enemy.pos,
                ENEMY_HEALTH_FONT,
            ));
        }
    }
}
