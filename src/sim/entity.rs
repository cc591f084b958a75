//! The scrolling entity family: obstacles, power-ups, and coins
//!
//! Entities spawn far ahead of the player and scroll toward +z (the world
//! moves, the player stays near the origin). Anything past the cull
//! threshold is dropped by the session's update pass.

use glam::Vec3;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Opaque slot for a handle the rendering layer attaches to a live entity.
/// The simulation never inspects it; it only creates the slot empty and
/// clears it again when the entity is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderHandle(pub u64);

/// Obstacle shapes, each with its own collision footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Spike,
    Barrier,
    Rock,
    Crate,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Spike,
        ObstacleKind::Barrier,
        ObstacleKind::Rock,
        ObstacleKind::Crate,
    ];

    /// Horizontal collision radius
    pub fn radius(self) -> f32 {
        match self {
            ObstacleKind::Spike => 0.5,
            ObstacleKind::Barrier => 0.3,
            ObstacleKind::Rock => 0.8,
            ObstacleKind::Crate => 0.7,
        }
    }

    /// Vertical collision extent
    pub fn height(self) -> f32 {
        match self {
            ObstacleKind::Spike => 0.5,
            ObstacleKind::Barrier => 1.2,
            ObstacleKind::Rock => 1.0,
            ObstacleKind::Crate => 1.0,
        }
    }

    /// Barriers and crates can be cleared mid-jump; spikes and rocks always
    /// connect.
    pub fn jumpable(self) -> bool {
        matches!(self, ObstacleKind::Barrier | ObstacleKind::Crate)
    }
}

/// A track obstacle. Colliding with one costs health unless cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: i32,
    pub position: Vec3,
    pub active: bool,
    #[serde(skip)]
    pub render: Option<RenderHandle>,
}

impl Obstacle {
    pub fn new(id: u32, kind: ObstacleKind, lane: i32, z: f32) -> Self {
        Self {
            id,
            kind,
            lane,
            position: Vec3::new(lane as f32 * LANE_WIDTH, 0.0, z),
            active: true,
            render: None,
        }
    }

    /// Spawn a uniformly random obstacle type.
    pub fn random<R: Rng>(rng: &mut R, id: u32, lane: i32, z: f32) -> Self {
        let kind = ObstacleKind::ALL
            .choose(rng)
            .copied()
            .unwrap_or(ObstacleKind::Crate);
        Self::new(id, kind, lane, z)
    }

    /// Scroll toward the player, keeping x locked to the lane centerline.
    pub fn update(&mut self, speed: f32, dt: f32) {
        self.position.z += speed * dt;
        self.position.x = self.lane as f32 * LANE_WIDTH;
    }

    /// True once the obstacle has passed behind the camera.
    pub fn is_out_of_range(&self) -> bool {
        self.position.z > CULL_Z
    }

    /// Mark inactive and detach the render handle.
    pub fn remove(&mut self) {
        self.active = false;
        self.render = None;
    }
}

/// The five collectible buffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    Shield,
    Magnet,
    Invincible,
    CoinMultiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::Shield,
        PowerUpKind::Magnet,
        PowerUpKind::Invincible,
        PowerUpKind::CoinMultiplier,
    ];

    /// Fixed duration of the buff once activated.
    pub fn duration_secs(self) -> f32 {
        match self {
            PowerUpKind::SpeedBoost => 5.0,
            PowerUpKind::Shield => 5.0,
            PowerUpKind::Magnet => 8.0,
            PowerUpKind::Invincible => 3.0,
            PowerUpKind::CoinMultiplier => 10.0,
        }
    }
}

/// A floating power-up pickup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub lane: i32,
    pub position: Vec3,
    pub active: bool,
    #[serde(skip)]
    pub render: Option<RenderHandle>,
}

impl PowerUp {
    pub const RADIUS: f32 = 0.8;
    /// Hover height above the track
    const SPAWN_Y: f32 = 0.8;

    pub fn new(id: u32, kind: PowerUpKind, lane: i32, z: f32) -> Self {
        Self {
            id,
            kind,
            lane,
            position: Vec3::new(lane as f32 * LANE_WIDTH, Self::SPAWN_Y, z),
            active: true,
            render: None,
        }
    }

    /// Spawn a uniformly random power-up type.
    pub fn random<R: Rng>(rng: &mut R, id: u32, lane: i32, z: f32) -> Self {
        let kind = PowerUpKind::ALL
            .choose(rng)
            .copied()
            .unwrap_or(PowerUpKind::SpeedBoost);
        Self::new(id, kind, lane, z)
    }

    pub fn update(&mut self, speed: f32, dt: f32) {
        self.position.z += speed * dt;
        self.position.x = self.lane as f32 * LANE_WIDTH;
    }

    pub fn is_out_of_range(&self) -> bool {
        self.position.z > CULL_Z
    }

    pub fn remove(&mut self) {
        self.active = false;
        self.render = None;
    }
}

/// A collectible coin. Spawned in runs along z within a single lane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub lane: i32,
    pub position: Vec3,
    pub active: bool,
    #[serde(skip)]
    pub render: Option<RenderHandle>,
}

impl Coin {
    pub const RADIUS: f32 = 0.5;
    /// Hover height above the track
    const SPAWN_Y: f32 = 1.0;

    pub fn new(id: u32, lane: i32, z: f32) -> Self {
        Self {
            id,
            lane,
            position: Vec3::new(lane as f32 * LANE_WIDTH, Self::SPAWN_Y, z),
            active: true,
            render: None,
        }
    }

    /// Magnet pull: while the player is within range, close a fixed fraction
    /// of the remaining x gap per tick. Exponential convergence along x
    /// only; z keeps scrolling normally.
    pub fn attract_to(&mut self, player_x: f32, player_z: f32) {
        let dx = player_x - self.position.x;
        let dz = player_z - self.position.z;
        let distance = (dx * dx + dz * dz).sqrt();

        if distance < MAGNET_RANGE {
            self.position.x += dx * MAGNET_PULL;
        }
    }

    /// Scroll toward the player. Unlike the other entities, x is not
    /// re-locked to the lane here, so magnet displacement persists.
    pub fn update(&mut self, speed: f32, dt: f32) {
        self.position.z += speed * dt;
    }

    pub fn is_out_of_range(&self) -> bool {
        self.position.z > CULL_Z
    }

    pub fn remove(&mut self) {
        self.active = false;
        self.render = None;
    }
}
