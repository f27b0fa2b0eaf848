//! Platform abstraction layer
//!
//! Everything the game needs from a window, input devices and an audio
//! device, behind one trait:
//! - Time/ticks
//! - Input events (held state and this-frame presses)
//! - Visibility/focus detection
//! - Sound playback and frame submission

pub mod headless;

pub use headless::HeadlessPlatform;

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::renderer::DrawCommand;
use crate::sim::TickInput;

/// Inputs the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Left mouse button
    Primary,
    /// Space bar
    Fire,
    /// W key
    Forward,
}

/// Presentation adapter implemented by each frontend
pub trait Platform {
    /// Cursor position in playfield coordinates
    fn pointer(&self) -> Vec2;
    /// Button is currently held
    fn is_down(&self, button: Button) -> bool;
    /// Button went down this frame
    fn is_pressed(&self, button: Button) -> bool;
    /// Monotonic time in seconds
    fn time(&self) -> f64;
    /// Seconds since the previous frame
    fn frame_time(&self) -> f32;
    fn is_focused(&self) -> bool;
    fn is_minimized(&self) -> bool;
    /// The user asked to close the window
    fn should_close(&self) -> bool;

    /// Play a sound cue at the given volume (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Keep the background music stream fed
    fn stream_music(&mut self, volume: f32);
    /// Present a finished frame
    fn submit(&mut self, frame: &[DrawCommand]);
}

/// Snapshot the platform's input state for one tick
pub fn capture_input(platform: &impl Platform) -> TickInput {
    TickInput {
        pointer: platform.pointer(),
        click: platform.is_pressed(Button::Primary),
        fire: platform.is_pressed(Button::Fire),
        forward: platform.is_down(Button::Forward),
        now: platform.time(),
        dt: platform.frame_time(),
        focused: platform.is_focused(),
        minimized: platform.is_minimized(),
    }
}
