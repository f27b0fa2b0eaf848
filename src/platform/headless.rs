//! Windowless platform driven by an autopilot
//!
//! Runs on a fixed 60 Hz clock. The autopilot only looks at the last frame it
//! was given, the same information a player has: it presses start, aims at
//! the nearest enemy tank, closes in and fires on a fixed rhythm.

use glam::Vec2;

use super::{Button, Platform};
use crate::audio::SoundEffect;
use crate::consts::TARGET_FPS;
use crate::renderer::{Anchor, DrawCommand, Sprite};

/// Autopilot stops driving once an enemy is this close
const ENGAGE_DISTANCE: f32 = 250.0;

#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    frame: u64,
    max_frames: u64,
    max_runs: u32,
    runs_seen: u32,
    fire_interval: u64,
    pointer: Vec2,
    click: bool,
    fire: bool,
    forward: bool,
    focused: bool,
    minimized: bool,
    was_playing: bool,
    last_frame: Vec<DrawCommand>,
    played: Vec<(SoundEffect, f32)>,
    music_frames: u64,
}

impl HeadlessPlatform {
    /// Run for at most `max_frames` frames
    pub fn new(max_frames: u64) -> Self {
        Self {
            frame: 0,
            max_frames,
            max_runs: u32::MAX,
            runs_seen: 0,
            fire_interval: 12,
            pointer: Vec2::ZERO,
            click: false,
            fire: false,
            forward: false,
            focused: true,
            minimized: false,
            was_playing: false,
            last_frame: Vec::new(),
            played: Vec::new(),
            music_frames: 0,
        }
    }

    /// Close after this many finished runs
    pub fn with_max_runs(mut self, runs: u32) -> Self {
        self.max_runs = runs;
        self
    }

    /// Frames between shots
    pub fn with_fire_interval(mut self, frames: u64) -> Self {
        self.fire_interval = frames.max(1);
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Runs that ended in a return to the title screen
    pub fn runs_seen(&self) -> u32 {
        self.runs_seen
    }

    pub fn played(&self) -> &[(SoundEffect, f32)] {
        &self.played
    }

    pub fn count_played(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|(e, _)| *e == effect).count()
    }

    pub fn music_frames(&self) -> u64 {
        self.music_frames
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// Advance the clock and decide this frame's input from the last frame
    pub fn begin_frame(&mut self) {
        self.frame += 1;
        self.click = false;
        self.fire = false;
        self.forward = false;

        let mut start_button = None;
        let mut play_button = None;
        let mut player = None;
        let mut enemies = Vec::new();

        for command in &self.last_frame {
            let DrawCommand::Sprite {
                sprite,
                pos,
                size,
                anchor,
                ..
            } = command
            else {
                continue;
            };
            let center = match anchor {
                Anchor::Center => *pos,
                Anchor::TopLeft => *pos + *size / 2.0,
            };
            match sprite {
                Sprite::StartButton => start_button = Some(center),
                Sprite::PlayButton => play_button = Some(center),
                Sprite::PlayerTank => player = Some(center),
                Sprite::EnemyTank => enemies.push(center),
                _ => {}
            }
        }

        if let Some(button) = start_button {
            if self.was_playing {
                self.runs_seen += 1;
                self.was_playing = false;
                log::info!("Autopilot saw run {} end", self.runs_seen);
            }
            self.pointer = button;
            self.click = true;
            return;
        }

        if player.is_some() {
            self.was_playing = true;
        }

        // Only resume when we'd be allowed to stay unpaused
        if let Some(button) = play_button {
            if self.focused && !self.minimized {
                self.pointer = button;
                self.click = true;
            }
            return;
        }

        let Some(me) = player else {
            return;
        };

        let nearest = enemies
            .iter()
            .copied()
            .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)));

        if let Some(target) = nearest {
            self.pointer = target;
            self.forward = target.distance(me) > ENGAGE_DISTANCE;
            self.fire = self.frame % self.fire_interval == 0;
        }
    }
}

impl Platform for HeadlessPlatform {
    fn pointer(&self) -> Vec2 {
        self.pointer
    }

    fn is_down(&self, button: Button) -> bool {
        match button {
            Button::Primary => self.click,
            Button::Fire => self.fire,
            Button::Forward => self.forward,
        }
    }

    fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::Primary => self.click,
            Button::Fire => self.fire,
            // Held key; only ever reported as down
            Button::Forward => false,
        }
    }

    fn time(&self) -> f64 {
        self.frame as f64 / TARGET_FPS as f64
    }

    fn frame_time(&self) -> f32 {
        1.0 / TARGET_FPS as f32
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn is_minimized(&self) -> bool {
        self.minimized
    }

    fn should_close(&self) -> bool {
        self.frame >= self.max_frames || self.runs_seen >= self.max_runs
    }

    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("play {:?} at {:.2}", effect, volume);
        self.played.push((effect, volume));
    }

    fn stream_music(&mut self, _volume: f32) {
        self.music_frames += 1;
    }

    fn submit(&mut self, frame: &[DrawCommand]) {
        self.last_frame.clear();
        self.last_frame.extend_from_slice(frame);
    }
}
