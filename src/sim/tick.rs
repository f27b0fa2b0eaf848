//! Per-frame simulation tick
//!
//! Step order matters: later steps read flags set by earlier ones.

use glam::Vec2;
use rand::Rng;

use super::collision::rects_overlap;
use super::state::{GamePhase, GameState};
use crate::audio::{CueSink, SoundEffect};
use crate::tuning::{DamageRange, region_contains};

/// Input snapshot for a single tick
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Cursor position in playfield coordinates
    pub pointer: Vec2,
    /// Primary button went down this frame
    pub click: bool,
    /// Fire key went down this frame
    pub fire: bool,
    /// Forward key is held
    pub forward: bool,
    /// Monotonic time in seconds
    pub now: f64,
    /// Seconds since last frame
    pub dt: f32,
    pub focused: bool,
    pub minimized: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            pointer: Vec2::ZERO,
            click: false,
            fire: false,
            forward: false,
            now: 0.0,
            dt: 0.0,
            focused: true,
            minimized: false,
        }
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, cues: &mut impl CueSink) {
    match state.phase {
        GamePhase::TitleScreen => {
            if input.click && region_contains(state.tuning.start_button(), input.pointer) {
                cues.cue(SoundEffect::Selection);
                state.phase = GamePhase::Playing;
                log::info!("Game {} started", state.games_played + 1);
            }
        }
        GamePhase::Playing => {
            if !state.paused {
                step(state, input, cues);
            }
            // Pause toggle is still read while paused; not after a game over
            if state.phase == GamePhase::Playing
                && input.click
                && region_contains(state.tuning.pause_button(), input.pointer)
            {
                state.paused = !state.paused;
                cues.cue(SoundEffect::Selection);
                log::info!("{}", if state.paused { "Paused" } else { "Resumed" });
            }
        }
    }

    if (!input.focused || input.minimized) && !state.paused {
        state.paused = true;
        log::info!("Window lost focus, pausing");
    }
}

/// One unpaused gameplay step
fn step(state: &mut GameState, input: &TickInput, cues: &mut impl CueSink) {
    let now = input.now;

    // Queue the next wave once the field is clear
    if state.enemies.is_empty() && !state.wave_pending {
        state.player.health = state.tuning.player_health;
        state.waves_defeated = Some(state.waves_defeated.map_or(0, |w| w + 1));
        state.wave_pending = true;
        state.wave_queued_at = now;
    }

    if state.wave_pending && now - state.wave_queued_at >= state.tuning.wave_delay {
        state.projectiles.clear();
        state.spawn_wave();
        state.wave_pending = false;
        log::info!(
            "Wave {} incoming: {} enemies",
            state.wave_display() + 1,
            state.enemies.len()
        );
    }

    state
        .player
        .update(input.pointer, input.forward, input.click || input.fire, input.dt);

    if state.player.wants_to_fire {
        cues.cue(SoundEffect::Gunshot);
        let muzzle = state.player.muzzle(state.tuning.player_muzzle_offset);
        let rotation = state.player.rotation;
        state.spawn_projectile(muzzle, rotation, true);
        state.player.wants_to_fire = false;
        log::debug!("Player fired from {:?}", muzzle);
    }

    if state.player.destroyed {
        end_run(state);
        return;
    }

    let gap = state.tuning.enemy_muzzle_offset;
    let mut shots = Vec::new();
    for enemy in state.enemies.iter_mut().filter(|e| e.wants_to_fire) {
        shots.push((enemy.muzzle(gap), enemy.rotation));
        enemy.wants_to_fire = false;
    }
    for (muzzle, rotation) in shots {
        cues.cue(SoundEffect::Gunshot);
        state.spawn_projectile(muzzle, rotation, false);
    }

    for projectile in &mut state.projectiles {
        projectile.update();
    }
    for i in 0..state.enemies.len() {
        let target = state.enemies[i].target;
        // Lost target: keep facing the last known spot
        let enemy = &state.enemies[i];
        let target_pos = state
            .position_of(target)
            .unwrap_or(enemy.pos + enemy.direction);
        state.enemies[i].update(target_pos, now);
    }

    let playfield = state.tuning.playfield;
    for projectile in &mut state.projectiles {
        if projectile.is_outside(playfield) {
            projectile.marked = true;
        }
    }

    resolve_collisions(state, cues);
    state.compact();
}

/// Apply hits between projectiles and tanks
///
/// Every overlapping pair is checked, including entities already flagged this
/// tick. Any projectile touching an enemy is consumed; only player shots hurt.
fn resolve_collisions(state: &mut GameState, cues: &mut impl CueSink) {
    let player_damage = state.tuning.player_damage;
    let enemy_damage = state.tuning.enemy_damage;

    for enemy in &mut state.enemies {
        for projectile in &mut state.projectiles {
            if !rects_overlap(&enemy.rect, &projectile.rect) {
                continue;
            }
            if projectile.from_player {
                cues.cue(SoundEffect::Hit);
                let damage = roll(&mut state.rng, player_damage);
                enemy.take_damage(damage);
                log::debug!("Enemy {} hit for {} ({} left)", enemy.id, damage, enemy.health);
            }
            projectile.marked = true;
        }
    }

    for projectile in &mut state.projectiles {
        if projectile.from_player || !rects_overlap(&state.player.rect, &projectile.rect) {
            continue;
        }
        cues.cue(SoundEffect::Hit);
        let damage = roll(&mut state.rng, enemy_damage);
        if state.player.take_damage(damage) {
            log::info!("Player destroyed");
        }
        projectile.marked = true;
    }
}

fn roll(rng: &mut impl Rng, range: DamageRange) -> i32 {
    rng.random_range(range.min..=range.max)
}

/// Record the finished run and return to the title screen
fn end_run(state: &mut GameState) {
    let waves = state.wave_display();
    state.high_score = state.scores.record(waves);
    state.reset_player();
    state.projectiles.clear();
    state.enemies.clear();
    state.games_played += 1;
    state.waves_defeated = None;
    state.wave_pending = false;
    state.phase = GamePhase::TitleScreen;
    log::info!(
        "Game over after {} waves; {} games played, high score {}",
        waves,
        state.games_played,
        state.high_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EnemyPhase;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345, Tuning::default());
        state.phase = GamePhase::Playing;
        state
    }

    fn at(now: f64) -> TickInput {
        TickInput {
            // Cursor on the player so it neither drives nor fires
            pointer: Vec2::new(500.0, 400.0),
            now,
            dt: 1.0 / 60.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_title_screen_start_button() {
        let mut state = GameState::new(1, Tuning::default());
        let mut cues = Vec::new();

        // Click outside the button does nothing
        let miss = TickInput {
            pointer: Vec2::new(10.0, 10.0),
            click: true,
            ..Default::default()
        };
        tick(&mut state, &miss, &mut cues);
        assert_eq!(state.phase, GamePhase::TitleScreen);

        let (origin, size) = state.tuning.start_button();
        let hit = TickInput {
            pointer: origin + size / 2.0,
            click: true,
            ..Default::default()
        };
        tick(&mut state, &hit, &mut cues);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(cues, vec![SoundEffect::Selection]);
        // Starting does not run a gameplay step
        assert!(state.waves_defeated.is_none());
    }

    #[test]
    fn test_first_tick_queues_wave_before_spawning() {
        let mut state = playing_state();
        state.player.health = 40;
        tick(&mut state, &at(5.0), &mut Vec::new());

        assert!(state.wave_pending);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.waves_defeated, Some(0));
        assert!(state.enemies.is_empty());
        assert_eq!(state.wave_queued_at, 5.0);
    }

    #[test]
    fn test_wave_spawns_after_delay() {
        let mut state = playing_state();
        tick(&mut state, &at(5.0), &mut Vec::new());
        tick(&mut state, &at(5.5), &mut Vec::new());
        assert!(state.enemies.is_empty());

        state.spawn_projectile(Vec2::new(100.0, 100.0), 0.0, true);
        tick(&mut state, &at(6.0), &mut Vec::new());
        assert!(!state.wave_pending);
        assert_eq!(state.enemies.len(), 8);
        // Stale projectiles are cleared when the wave arrives
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_enemies_track_live_player_position() {
        let mut state = playing_state();
        tick(&mut state, &at(0.0), &mut Vec::new());
        tick(&mut state, &at(1.0), &mut Vec::new());
        assert_eq!(state.enemies.len(), 8);

        // Spawned enemies have moved one step toward the centre
        let first = state.enemies[0].clone();
        assert!(first.pos.x > 0.0);

        // Move the player after spawning; the next tick re-aims at the new spot
        state.player.pos = Vec2::new(0.0, 800.0);
        let input = TickInput {
            pointer: state.player.pos,
            ..at(1.1)
        };
        tick(&mut state, &input, &mut Vec::new());
        let enemy = &state.enemies[0];
        let expected = (Vec2::new(0.0, 800.0) - first.pos).normalize();
        assert!((enemy.direction.normalize() - expected).length() < 1e-4);
    }

    #[test]
    fn test_player_fire_spawns_projectile() {
        let mut state = playing_state();
        state.wave_pending = true;
        state.wave_queued_at = 100.0;

        let input = TickInput {
            pointer: Vec2::new(800.0, 400.0),
            fire: true,
            ..at(0.0)
        };
        let mut cues = Vec::new();
        tick(&mut state, &input, &mut cues);

        assert_eq!(cues, vec![SoundEffect::Gunshot]);
        assert!(!state.player.wants_to_fire);
        assert_eq!(state.projectiles.len(), 1);
        let p = &state.projectiles[0];
        assert!(p.from_player);
        // Spawned at 500 + 32 + 8 and advanced one step of 15
        assert!((p.pos.x - 555.0).abs() < 1e-3);
        assert!((p.pos.y - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_shot_spawns_enemy_projectile() {
        let mut state = playing_state();
        state.spawn_wave();
        state.enemies.truncate(1);
        state.enemies[0].wants_to_fire = true;
        state.enemies[0].direction = Vec2::new(1.0, 0.0);

        let mut cues = Vec::new();
        tick(&mut state, &at(0.0), &mut cues);
        assert!(cues.contains(&SoundEffect::Gunshot));
        assert_eq!(state.projectiles.iter().filter(|p| !p.from_player).count(), 1);
        assert!(!state.enemies[0].wants_to_fire);
    }

    #[test]
    fn test_offscreen_projectiles_removed() {
        let mut state = playing_state();
        state.wave_pending = true;
        state.wave_queued_at = 100.0;
        state.spawn_projectile(Vec2::new(995.0, 400.0), 0.0, true);
        state.spawn_projectile(Vec2::new(500.0, 100.0), 0.0, true);

        tick(&mut state, &at(0.0), &mut Vec::new());
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos.y, 100.0);
    }

    #[test]
    fn test_enemy_destroyed_after_two_max_hits() {
        let tuning = Tuning {
            player_damage: DamageRange::new(7, 7),
            ..Tuning::default()
        };
        let mut state = GameState::new(3, tuning);
        state.phase = GamePhase::Playing;
        state.spawn_wave();
        state.enemies.truncate(2);

        let target = Vec2::new(200.0, 200.0);
        state.enemies[0].pos = target;
        state.enemies[0].phase = EnemyPhase::Holding;
        state.enemies[0].last_fire = 1e9;
        state.enemies[1].pos = Vec2::new(900.0, 700.0);
        state.enemies[1].phase = EnemyPhase::Holding;
        state.enemies[1].last_fire = 1e9;

        // Two shots first: 10 - 7 - 7 <= 0
        for _ in 0..2 {
            state.spawn_projectile(target, 0.0, true);
        }
        let mut cues = Vec::new();
        tick(&mut state, &at(0.0), &mut cues);

        assert_eq!(cues.iter().filter(|c| **c == SoundEffect::Hit).count(), 2);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].pos, Vec2::new(900.0, 700.0));
        assert!(state.projectiles.is_empty());

        // Later shots at the empty spot hit nothing
        for _ in 0..2 {
            state.spawn_projectile(target, 0.0, true);
        }
        cues.clear();
        tick(&mut state, &at(0.0), &mut cues);
        assert!(!cues.contains(&SoundEffect::Hit));
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_enemy_projectile_consumed_by_enemy_without_damage() {
        let mut state = playing_state();
        state.spawn_wave();
        state.enemies.truncate(1);
        let pos = Vec2::new(200.0, 200.0);
        state.enemies[0].pos = pos;
        state.enemies[0].phase = EnemyPhase::Holding;
        state.enemies[0].last_fire = 1e9;
        state.spawn_projectile(pos, 0.0, false);

        let mut cues = Vec::new();
        tick(&mut state, &at(0.0), &mut cues);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies[0].health, 10);
        assert!(cues.is_empty());
    }

    #[test]
    fn test_player_hit_by_enemy_projectile() {
        let mut state = playing_state();
        state.wave_pending = true;
        state.wave_queued_at = 100.0;
        state.spawn_projectile(Vec2::new(500.0, 400.0), 0.0, false);
        // Player shots never hurt the player
        state.spawn_projectile(Vec2::new(500.0, 400.0), 0.0, true);

        let mut cues = Vec::new();
        tick(&mut state, &at(0.0), &mut cues);
        assert!((97..=99).contains(&state.player.health));
        assert_eq!(cues, vec![SoundEffect::Hit]);
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.projectiles[0].from_player);
    }

    #[test]
    fn test_game_over_resets_on_next_tick() {
        let mut state = playing_state();
        state.scores.record(7);
        state.spawn_wave();
        state.spawn_projectile(Vec2::new(100.0, 100.0), 0.0, false);
        state.waves_defeated = Some(3);
        state.player.health = 0;
        state.player.destroyed = true;

        tick(&mut state, &at(10.0), &mut Vec::new());

        assert_eq!(state.phase, GamePhase::TitleScreen);
        assert_eq!(state.player.health, 100);
        assert!(!state.player.destroyed);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.games_played, 1);
        assert_eq!(state.waves_defeated, None);
        assert_eq!(state.scores.runs(), &[7, 3]);
        assert_eq!(state.high_score, 7);
    }

    #[test]
    fn test_high_score_tracks_new_best() {
        let mut state = playing_state();
        // Mid-delay, so the empty field doesn't queue another wave first
        state.wave_pending = true;
        state.wave_queued_at = 100.0;
        state.waves_defeated = Some(4);
        state.player.destroyed = true;
        tick(&mut state, &at(0.0), &mut Vec::new());
        assert_eq!(state.high_score, 4);
        assert!(!state.wave_pending);

        state.phase = GamePhase::Playing;
        state.wave_pending = true;
        state.wave_queued_at = 100.0;
        state.waves_defeated = Some(2);
        state.player.destroyed = true;
        tick(&mut state, &at(1.0), &mut Vec::new());
        assert_eq!(state.high_score, 4);
        assert_eq!(state.games_played, 2);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = playing_state();
        let (origin, size) = state.tuning.pause_button();
        let click = TickInput {
            pointer: origin + size / 2.0,
            click: true,
            ..Default::default()
        };

        let mut cues = Vec::new();
        tick(&mut state, &click, &mut cues);
        assert!(state.paused);

        // Paused: the gameplay step is skipped
        let before = state.waves_defeated;
        tick(&mut state, &at(1.0), &mut cues);
        assert_eq!(state.waves_defeated, before);

        tick(&mut state, &click, &mut cues);
        assert!(!state.paused);
        assert_eq!(
            cues.iter().filter(|c| **c == SoundEffect::Selection).count(),
            2
        );
    }

    #[test]
    fn test_pause_button_ignored_on_title_screen() {
        let mut state = GameState::new(1, Tuning::default());
        let (origin, size) = state.tuning.pause_button();
        let click = TickInput {
            pointer: origin + size / 2.0,
            click: true,
            ..Default::default()
        };
        tick(&mut state, &click, &mut Vec::new());
        assert!(!state.paused);
    }

    #[test]
    fn test_focus_loss_forces_pause() {
        let mut state = playing_state();
        let input = TickInput {
            focused: false,
            ..at(0.0)
        };
        tick(&mut state, &input, &mut Vec::new());
        assert!(state.paused);

        let mut state = playing_state();
        let input = TickInput {
            minimized: true,
            ..at(0.0)
        };
        tick(&mut state, &input, &mut Vec::new());
        assert!(state.paused);
    }

    #[test]
    fn test_compaction_leaves_no_marked_entities() {
        let mut state = playing_state();
        tick(&mut state, &at(0.0), &mut Vec::new());
        for i in 0..300 {
            let input = TickInput {
                pointer: Vec2::new(900.0, 100.0),
                fire: i % 5 == 0,
                forward: i % 3 == 0,
                ..at(1.0 + i as f64 / 60.0)
            };
            tick(&mut state, &input, &mut Vec::new());
            assert!(state.enemies.iter().all(|e| !e.marked));
            assert!(state.projectiles.iter().all(|p| !p.marked));
            if state.phase == GamePhase::TitleScreen {
                break;
            }
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing_state();
        let mut state2 = playing_state();

        for i in 0..240 {
            let input = TickInput {
                pointer: Vec2::new(300.0 + i as f32, 250.0),
                fire: i % 7 == 0,
                forward: i % 2 == 0,
                ..at(i as f64 / 60.0)
            };
            tick(&mut state1, &input, &mut Vec::new());
            tick(&mut state2, &input, &mut Vec::new());
        }

        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.projectiles.len(), state2.projectiles.len());
        assert_eq!(state1.player.health, state2.player.health);
        assert_eq!(state1.player.pos, state2.player.pos);
    }
}
