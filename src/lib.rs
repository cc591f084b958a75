//! Neon Dash - deterministic core of a lane-based endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, spawning, collisions,
//!   level progression, scoring)
//!
//! Rendering, audio, raw input capture, and the periodic tick driver live
//! outside this crate. They talk to the core through `sim::GameState`: the
//! driver calls `update(dt)` at a fixed 60 Hz, the input layer forwards
//! decoded actions (`move_left`, `move_right`, `jump`, `toggle_pause`), and
//! the renderer mirrors the public state each frame.

pub mod sim;

pub use sim::{GamePhase, GameState};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Lateral distance between lane centerlines
    pub const LANE_WIDTH: f32 = 2.5;
    /// Rate of the first-order lag toward the lane centerline
    pub const LANE_LAG_RATE: f32 = 10.0;

    /// Player collision radius used by the resolver
    pub const PLAYER_RADIUS: f32 = 0.4;
    /// Resting height of the player above the track
    pub const GROUND_Y: f32 = 0.5;
    /// Vertical acceleration while airborne (units/s^2)
    pub const GRAVITY: f32 = -25.0;
    /// Initial vertical velocity of a jump (units/s)
    pub const JUMP_FORCE: f32 = 10.0;
    /// Extra height above an obstacle's top needed to clear it mid-jump
    pub const JUMP_CLEARANCE: f32 = 0.3;
    /// Forward speed before the level profile takes over
    pub const BASE_SPEED: f32 = 20.0;
    /// Forward speed multiplier while the speed-boost buff is active
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    pub const PLAYER_START_HEALTH: i32 = 3;

    /// Entities spawn this far ahead of the player
    pub const SPAWN_Z: f32 = -35.0;
    /// Entities past this z have scrolled behind the camera
    pub const CULL_Z: f32 = 20.0;

    /// Seconds between power-up spawn attempts
    pub const POWER_UP_SPAWN_PERIOD: f32 = 3.0;
    /// Seconds between coin spawn attempts
    pub const COIN_SPAWN_PERIOD: f32 = 0.5;
    /// Z spacing between coins in a run
    pub const COIN_SPACING: f32 = 1.5;

    /// Horizontal reach of the magnet buff
    pub const MAGNET_RANGE: f32 = 8.0;
    /// Fraction of the remaining x gap a magnetized coin closes per tick
    pub const MAGNET_PULL: f32 = 0.1;

    /// Extra reach when collecting power-ups and coins
    pub const PICKUP_MARGIN: f32 = 0.5;
    /// Vertical window for coin pickup
    pub const COIN_VERTICAL_WINDOW: f32 = 1.5;
}
