//! Sound cues and volume mixing
//!
//! The simulation only names cues; the platform owns the actual sound device.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// A tank fired
    Gunshot,
    /// A projectile hit a tank
    Hit,
    /// Menu/button click
    Selection,
}

impl SoundEffect {
    /// Asset path the platform should load for this cue
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundEffect::Gunshot => "sounds/gunshot.wav",
            SoundEffect::Hit => "sounds/hit.wav",
            SoundEffect::Selection => "sounds/selection.wav",
        }
    }
}

/// Background music stream
pub const MUSIC_PATH: &str = "sounds/boss_music.wav";

/// Anything that collects cues raised during a tick
pub trait CueSink {
    fn cue(&mut self, effect: SoundEffect);
}

impl CueSink for Vec<SoundEffect> {
    fn cue(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Applies volume settings and forwards cues to the platform
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    mute_on_blur: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioManager {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            music_volume: settings.music_volume.clamp(0.0, 1.0),
            muted: false,
            mute_on_blur: settings.mute_on_blur,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Track window focus; silences output while unfocused if configured to
    pub fn set_focused(&mut self, focused: bool) {
        if self.mute_on_blur {
            self.muted = !focused;
        }
    }

    /// Get effective effect volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Play every queued cue in order
    pub fn dispatch(&self, cues: &[SoundEffect], platform: &mut impl Platform) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        for &effect in cues {
            platform.play(effect, vol);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut audio = AudioManager::from_settings(&Settings::default());
        audio.set_master_volume(0.5);
        let expected = 0.5 * Settings::default().sfx_volume;
        assert!((audio.effective_volume() - expected).abs() < 1e-6);

        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
        assert_eq!(audio.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_mute_on_blur() {
        let mut audio = AudioManager::from_settings(&Settings::default());
        audio.set_focused(false);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_focused(true);
        assert!(audio.effective_volume() > 0.0);

        let settings = Settings {
            mute_on_blur: false,
            ..Settings::default()
        };
        let mut audio = AudioManager::from_settings(&settings);
        audio.set_focused(false);
        assert!(audio.effective_volume() > 0.0);
    }

    #[test]
    fn test_vec_collects_cues() {
        let mut cues = Vec::new();
        cues.cue(SoundEffect::Gunshot);
        cues.cue(SoundEffect::Hit);
        assert_eq!(cues, vec![SoundEffect::Gunshot, SoundEffect::Hit]);
    }
}
