//! Display list rendering
//!
//! The game never talks to a graphics API directly. Each frame is turned into
//! a flat list of draw commands that the platform replays in order.

pub mod hud;
pub mod sprites;

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Textures the platform must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Ground,
    TitleScreen,
    PlayerTank,
    EnemyTank,
    Bullet,
    StartButton,
    PauseButton,
    PlayButton,
}

impl Sprite {
    pub const ALL: [Sprite; 8] = [
        Sprite::Ground,
        Sprite::TitleScreen,
        Sprite::PlayerTank,
        Sprite::EnemyTank,
        Sprite::Bullet,
        Sprite::StartButton,
        Sprite::PauseButton,
        Sprite::PlayButton,
    ];

    /// Image path relative to the asset root
    pub fn asset_path(&self) -> &'static str {
        match self {
            Sprite::Ground => "images/ground.png",
            Sprite::TitleScreen => "images/title_screen.png",
            Sprite::PlayerTank => "images/tank.png",
            Sprite::EnemyTank => "images/enemy_tank.png",
            Sprite::Bullet => "images/bullet.png",
            Sprite::StartButton => "images/start_button.png",
            Sprite::PauseButton => "images/pause_button.png",
            Sprite::PlayButton => "images/play_button.png",
        }
    }
}

/// Colors for HUD text
pub mod colors {
    /// Translucent white used for all HUD text
    pub const ACCENT: [u8; 4] = [255, 255, 255, 170];
}

/// How a sprite is placed relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `pos` is the top-left corner
    TopLeft,
    /// `pos` is the centre; rotation pivots there
    Center,
}

/// A single draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        sprite: Sprite,
        pos: Vec2,
        size: Vec2,
        /// Clockwise rotation in degrees (screen space, y down)
        rotation_deg: f32,
        anchor: Anchor,
    },
    Text {
        text: String,
        pos: Vec2,
        font_size: f32,
        color: [u8; 4],
    },
}

impl DrawCommand {
    /// Full-size sprite with its top-left at `pos`
    pub fn backdrop(sprite: Sprite, pos: Vec2, size: Vec2) -> Self {
        DrawCommand::Sprite {
            sprite,
            pos,
            size,
            rotation_deg: 0.0,
            anchor: Anchor::TopLeft,
        }
    }

    pub fn text(text: impl Into<String>, pos: Vec2, font_size: f32) -> Self {
        DrawCommand::Text {
            text: text.into(),
            pos,
            font_size,
            color: colors::ACCENT,
        }
    }
}

/// Build the draw list for the current frame
pub fn build_frame(state: &GameState, settings: &Settings) -> Vec<DrawCommand> {
    let mut frame = Vec::with_capacity(state.enemies.len() * 2 + state.projectiles.len() + 8);

    match state.phase {
        GamePhase::TitleScreen => hud::title_screen(state, &mut frame),
        GamePhase::Playing => {
            frame.push(DrawCommand::backdrop(Sprite::Ground, Vec2::ZERO, state.tuning.playfield));
            sprites::entities(state, settings, &mut frame);
            hud::gameplay(state, settings, &mut frame);
        }
    }

    frame
}
