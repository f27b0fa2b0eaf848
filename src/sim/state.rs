//! Game state and core simulation types
//!
//! `GameState` owns every entity. Enemies refer to the player by id only.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{EnemySpec, EnemyUnit, PlayerUnit, Projectile};
use crate::highscores::ScoreHistory;
use crate::tuning::Tuning;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start button
    TitleScreen,
    /// Active gameplay (possibly paused)
    Playing,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub paused: bool,
    pub player: PlayerUnit,
    pub enemies: Vec<EnemyUnit>,
    pub projectiles: Vec<Projectile>,
    /// Finished runs this session
    pub scores: ScoreHistory,
    /// Waves cleared in the current run (`None` before the first wave)
    pub waves_defeated: Option<u32>,
    pub games_played: u32,
    pub high_score: u32,
    /// A wave is queued and will arrive once the delay runs out
    pub wave_pending: bool,
    /// Time the pending wave was queued
    pub wave_queued_at: f64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and tuning
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let center = tuning.playfield / 2.0;
        let player = PlayerUnit::new(
            1,
            center,
            tuning.sprites.player,
            tuning.player_speed,
            tuning.player_health,
            tuning.drive_dead_zone,
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::TitleScreen,
            paused: false,
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            scores: ScoreHistory::new(),
            waves_defeated: None,
            games_played: 0,
            high_score: 0,
            wave_pending: false,
            wave_queued_at: 0.0,
            next_id: 2,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current position of the unit with the given id, if it still exists
    pub fn position_of(&self, id: u32) -> Option<Vec2> {
        if id == self.player.id {
            return Some(self.player.pos);
        }
        self.enemies.iter().find(|e| e.id == id).map(|e| e.pos)
    }

    /// Parameters for every enemy in a wave
    pub fn enemy_spec(&self) -> EnemySpec {
        EnemySpec {
            size: self.tuning.sprites.enemy,
            speed: self.tuning.enemy_speed,
            health: self.tuning.enemy_health,
            hold_distance: self.tuning.enemy_hold_distance,
            reload: self.tuning.enemy_reload,
        }
    }

    /// Spawn one enemy per spawn point (cycling if there are more enemies than points)
    pub fn spawn_wave(&mut self) {
        let points = self.tuning.spawn_points();
        let spec = self.enemy_spec();
        let target = self.player.id;

        for i in 0..self.tuning.spawn_number {
            let id = self.next_entity_id();
            let pos = points[i % points.len()];
            let enemy = EnemyUnit::new(id, target, pos, &spec, &mut self.rng);
            self.enemies.push(enemy);
        }
    }

    /// Add a projectile flying along `rotation`
    pub fn spawn_projectile(&mut self, pos: Vec2, rotation: f32, from_player: bool) {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(
            id,
            pos,
            rotation,
            self.tuning.projectile_speed,
            self.tuning.sprites.bullet,
            from_player,
        ));
    }

    /// Drop every entity flagged for removal, keeping survivors in order
    pub fn compact(&mut self) {
        self.enemies.retain(|e| !e.marked);
        self.projectiles.retain(|p| !p.marked);
    }

    /// Restore the player for a fresh run
    pub fn reset_player(&mut self) {
        self.player.health = self.tuning.player_health;
        self.player.destroyed = false;
        self.player.wants_to_fire = false;
    }

    /// Waves defeated shown on the HUD (0 before the first wave has been queued)
    pub fn wave_display(&self) -> u32 {
        self.waves_defeated.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::TitleScreen);
        assert_eq!(state.player.pos, Vec2::new(500.0, 400.0));
        assert_eq!(state.player.health, 100);
        assert!(state.enemies.is_empty());
        assert!(state.waves_defeated.is_none());
    }

    #[test]
    fn test_spawn_wave_uses_perimeter_points() {
        let mut state = GameState::new(1, Tuning::default());
        state.spawn_wave();
        assert_eq!(state.enemies.len(), 8);

        let points = state.tuning.spawn_points();
        for (enemy, point) in state.enemies.iter().zip(points) {
            assert_eq!(enemy.pos, point);
            assert_eq!(enemy.target, state.player.id);
            assert_eq!(enemy.health, 10);
        }
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = GameState::new(1, Tuning::default());
        state.spawn_wave();
        state.spawn_projectile(Vec2::ZERO, 0.0, true);
        let mut ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        ids.extend(state.projectiles.iter().map(|p| p.id));
        ids.push(state.player.id);
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_position_of_resolves_live_player() {
        let mut state = GameState::new(1, Tuning::default());
        let id = state.player.id;
        state.player.pos = Vec2::new(10.0, 20.0);
        assert_eq!(state.position_of(id), Some(Vec2::new(10.0, 20.0)));
        assert_eq!(state.position_of(9999), None);
    }

    #[test]
    fn test_compact_preserves_order() {
        let mut state = GameState::new(1, Tuning::default());
        for i in 0..5 {
            state.spawn_projectile(Vec2::new(i as f32, 0.0), 0.0, true);
        }
        state.projectiles[1].marked = true;
        state.projectiles[3].marked = true;
        state.compact();
        let xs: Vec<f32> = state.projectiles.iter().map(|p| p.pos.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
    }
}
