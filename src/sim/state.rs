//! Session state machine and orchestrator-owned state
//!
//! `GameState` is the root of the simulation. It exclusively owns the
//! player, the entity collections, the managers, the spawn accumulators,
//! and the session RNG; every mutation flows through its command methods or
//! the tick pipeline. External layers read it as a snapshot.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Coin, Obstacle, PowerUp};
use super::level::LevelProgress;
use super::player::Player;
use super::score::ScoreBoard;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first `start_game`
    #[default]
    Idle,
    /// Ticks advance the world
    Running,
    /// Frozen; `resume_game` or the pause toggle continues
    Paused,
    /// Player died; `start_game` restarts
    GameOver,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub level: LevelProgress,
    pub score: ScoreBoard,
    /// Active obstacles in spawn order (ids are monotonic)
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub coins: Vec<Coin>,
    /// Spawn accumulators, reset when their spawner fires
    pub(crate) obstacle_timer: f32,
    pub(crate) power_up_timer: f32,
    pub(crate) coin_timer: f32,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle session with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            player: Player::new(),
            level: LevelProgress::new(),
            score: ScoreBoard::new(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            coins: Vec::new(),
            obstacle_timer: 0.0,
            power_up_timer: 0.0,
            coin_timer: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a fresh run. Also restarts from `GameOver` (or any other
    /// phase): player, progression, score, and every entity collection are
    /// re-initialized.
    pub fn start_game(&mut self) {
        self.player.reset();
        self.level.reset();
        self.score.reset();
        self.clear_entities();

        // Pre-load the accumulators so the first obstacle wave, power-up
        // attempt, and coin attempt all land on the first tick.
        self.obstacle_timer = self.level.profile().obstacle_spawn_interval;
        self.power_up_timer = POWER_UP_SPAWN_PERIOD;
        self.coin_timer = COIN_SPAWN_PERIOD;

        self.player.base_speed = self.level.profile().speed;

        self.phase = GamePhase::Running;
        log::info!("session started (seed {})", self.seed);
    }

    /// Running -> Paused; silent no-op from any other phase.
    pub fn pause_game(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
        }
    }

    /// Paused -> Running; silent no-op from any other phase.
    pub fn resume_game(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
        }
    }

    /// The decoded pause action: flip between Running and Paused.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Running,
            _ => {}
        }
    }

    /// Decoded input action; immediate mutation, safe between ticks.
    pub fn move_left(&mut self) {
        self.player.move_left();
    }

    /// Decoded input action; immediate mutation, safe between ticks.
    pub fn move_right(&mut self) {
        self.player.move_right();
    }

    /// Decoded input action; immediate mutation, safe between ticks.
    pub fn jump(&mut self) {
        self.player.jump();
    }

    /// Advance one fixed timestep.
    pub fn update(&mut self, dt: f32) {
        super::tick::tick(self, dt);
    }

    pub(crate) fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        log::info!(
            "game over: score {} with {} coins at tier {}",
            self.score.score,
            self.score.coins,
            self.level.tier
        );
    }

    fn clear_entities(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.remove();
        }
        for power_up in &mut self.power_ups {
            power_up.remove();
        }
        for coin in &mut self.coins {
            coin.remove();
        }
        self.obstacles.clear();
        self.power_ups.clear();
        self.coins.clear();
    }
}
