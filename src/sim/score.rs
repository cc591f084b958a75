//! Distance and coin scoring
//!
//! Score is recomputed from distance and coin count every tick rather than
//! accumulated, so it can never drift and never decreases within a session.

use serde::{Deserialize, Serialize};

/// Points per ten units of distance travelled
const DISTANCE_DIVISOR: f32 = 10.0;
/// Points per collected coin
const COIN_VALUE: u64 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub coins: u32,
    pub distance: f32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accrue distance at the given speed and recompute the score.
    pub fn update(&mut self, dt: f32, speed: f32) {
        self.distance += speed * dt;

        let distance_score = (self.distance / DISTANCE_DIVISOR).floor() as u64;
        self.score = distance_score + self.coins as u64 * COIN_VALUE;
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.coins += amount;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
