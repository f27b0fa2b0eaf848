//! Title screen and in-game HUD

use glam::Vec2;

use super::{DrawCommand, Sprite};
use crate::settings::Settings;
use crate::sim::GameState;

const HUD_FONT: f32 = 40.0;

/// Title backdrop, session stats and the start button
pub fn title_screen(state: &GameState, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::backdrop(
        Sprite::TitleScreen,
        Vec2::ZERO,
        state.tuning.playfield,
    ));

    if state.games_played > 0 {
        out.push(DrawCommand::text(
            format!("Games Played: {}", state.games_played),
            Vec2::new(50.0, 400.0),
            HUD_FONT,
        ));
        out.push(DrawCommand::text(
            format!("High score: {}", state.high_score),
            Vec2::new(50.0, 450.0),
            HUD_FONT,
        ));
    }

    let (origin, size) = state.tuning.start_button();
    out.push(DrawCommand::backdrop(Sprite::StartButton, origin, size));
}

/// Pause/play button plus health and wave counters
pub fn gameplay(state: &GameState, settings: &Settings, out: &mut Vec<DrawCommand>) {
    let (origin, size) = state.tuning.pause_button();
    let button = if state.paused {
        Sprite::PlayButton
    } else {
        Sprite::PauseButton
    };
    out.push(DrawCommand::backdrop(button, origin, size));

    if !settings.show_hud {
        return;
    }

    out.push(DrawCommand::text(
        format!("Health: {}", state.player.health),
        Vec2::new(50.0, 50.0),
        HUD_FONT,
    ));
    out.push(DrawCommand::text(
        format!("Waves Defeated : {}", state.wave_display()),
        Vec2::new(50.0, 90.0),
        HUD_FONT,
    ));
}
