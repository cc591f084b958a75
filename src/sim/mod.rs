//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the session state
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod level;
pub mod player;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{clears_obstacle, coin_overlap, obstacle_overlap, power_up_overlap, resolve};
pub use entity::{Coin, Obstacle, ObstacleKind, PowerUp, PowerUpKind, RenderHandle};
pub use level::{LevelProfile, LevelProgress, MAX_TIER, PROFILES};
pub use player::{ActiveEffects, Player, PlayerPose};
pub use score::ScoreBoard;
pub use state::{GamePhase, GameState};
pub use tick::tick;
