//! Per-frame driver
//!
//! One call to [`App::frame`] reads input, advances the simulation, plays the
//! cues it raised and hands the finished frame to the platform.

use serde::Serialize;

use crate::audio::{AudioManager, SoundEffect};
use crate::platform::{Platform, capture_input};
use crate::renderer::build_frame;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct App {
    pub state: GameState,
    pub settings: Settings,
    audio: AudioManager,
    /// Reused between frames
    cues: Vec<SoundEffect>,
    frames: u64,
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub frames: u64,
    pub games_played: u32,
    pub high_score: u32,
    pub runs: Vec<u32>,
    /// Waves defeated in the run still in progress, if any
    pub current_wave: Option<u32>,
}

impl App {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        log::info!("New session (seed {})", seed);
        Self {
            state: GameState::new(seed, tuning),
            audio: AudioManager::from_settings(&settings),
            settings,
            cues: Vec::new(),
            frames: 0,
        }
    }

    /// Run one frame against the platform
    pub fn frame(&mut self, platform: &mut impl Platform) {
        let input = capture_input(&*platform);
        self.audio.set_focused(input.focused && !input.minimized);

        self.cues.clear();
        tick(&mut self.state, &input, &mut self.cues);
        self.audio.dispatch(&self.cues, platform);

        if self.state.phase == GamePhase::Playing && !self.state.paused {
            platform.stream_music(self.audio.effective_music_volume());
        }

        let frame = build_frame(&self.state, &self.settings);
        platform.submit(&frame);
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.state.seed,
            frames: self.frames,
            games_played: self.state.games_played,
            high_score: self.state.high_score,
            runs: self.state.scores.runs().to_vec(),
            current_wave: match self.state.phase {
                GamePhase::Playing => self.state.waves_defeated,
                GamePhase::TitleScreen => None,
            },
        }
    }
}
