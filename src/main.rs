//! Shoot The Tanks entry point
//!
//! Loads configuration and runs a headless autopilot session. A windowed
//! frontend plugs in by implementing `platform::Platform`.

use std::time::{SystemTime, UNIX_EPOCH};

use shoot_the_tanks::audio::{MUSIC_PATH, SoundEffect};
use shoot_the_tanks::platform::{HeadlessPlatform, Platform};
use shoot_the_tanks::renderer::Sprite;
use shoot_the_tanks::{App, Settings, Tuning};

/// Ten minutes of play at 60 Hz
const MAX_FRAMES: u64 = 60 * 60 * 10;
const MAX_RUNS: u32 = 3;

fn main() {
    env_logger::init();
    log::info!("Shoot The Tanks (headless) starting...");

    let settings = Settings::load();
    let tuning = Tuning::load();

    for sprite in Sprite::ALL {
        log::debug!("texture {:?}: {}", sprite, sprite.asset_path());
    }
    for effect in [SoundEffect::Gunshot, SoundEffect::Hit, SoundEffect::Selection] {
        log::debug!("sound {:?}: {}", effect, effect.asset_path());
    }
    log::debug!("music: {}", MUSIC_PATH);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut app = App::new(seed, tuning, settings);
    let mut platform = HeadlessPlatform::new(MAX_FRAMES).with_max_runs(MAX_RUNS);

    while !platform.should_close() {
        platform.begin_frame();
        app.frame(&mut platform);
    }

    let summary = app.summary();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
    log::info!(
        "Session over: {} frames, {} games, high score {}",
        summary.frames,
        summary.games_played,
        summary.high_score
    );
}
