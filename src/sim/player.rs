//! Player physics and buff state
//!
//! The player owns its lane index, vertical motion, health, and the five
//! independent buff timers. Forward speed is a derived value: the session
//! feeds in the active profile's base speed and the speed-boost buff scales
//! it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entity::{PowerUpKind, RenderHandle};
use crate::consts::*;

/// Locomotion state. `Jumping` covers the ascent; the pose flips to
/// `Falling` past the apex and returns to `Running` on landing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerPose {
    #[default]
    Running,
    Jumping,
    Falling,
}

/// Countdown timers for the five buffs, in seconds remaining. A buff is
/// active while its timer is above zero; re-activation refreshes the timer,
/// it never stacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub shield: f32,
    pub invincible: f32,
    pub magnet: f32,
    pub speed_boost: f32,
    pub coin_multiplier: f32,
}

impl ActiveEffects {
    pub fn has_shield(&self) -> bool {
        self.shield > 0.0
    }

    pub fn has_invincible(&self) -> bool {
        self.invincible > 0.0
    }

    pub fn has_magnet(&self) -> bool {
        self.magnet > 0.0
    }

    pub fn has_speed_boost(&self) -> bool {
        self.speed_boost > 0.0
    }

    pub fn has_coin_multiplier(&self) -> bool {
        self.coin_multiplier > 0.0
    }

    /// Start (or refresh) a buff at its fixed duration.
    pub fn activate(&mut self, kind: PowerUpKind) {
        *self.timer_mut(kind) = kind.duration_secs();
    }

    /// A shield soaks exactly one hit, then is gone.
    pub fn consume_shield(&mut self) {
        self.shield = 0.0;
    }

    /// Count every timer down, clamping at zero.
    pub fn update(&mut self, dt: f32) {
        self.shield = (self.shield - dt).max(0.0);
        self.invincible = (self.invincible - dt).max(0.0);
        self.magnet = (self.magnet - dt).max(0.0);
        self.speed_boost = (self.speed_boost - dt).max(0.0);
        self.coin_multiplier = (self.coin_multiplier - dt).max(0.0);
    }

    fn timer_mut(&mut self, kind: PowerUpKind) -> &mut f32 {
        match kind {
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::Invincible => &mut self.invincible,
            PowerUpKind::Magnet => &mut self.magnet,
            PowerUpKind::SpeedBoost => &mut self.speed_boost,
            PowerUpKind::CoinMultiplier => &mut self.coin_multiplier,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    pub vertical_velocity: f32,
    /// Lane index: -1 left, 0 center, 1 right
    pub lane: i32,
    pub pose: PlayerPose,
    pub health: i32,
    pub dead: bool,
    pub effects: ActiveEffects,
    /// Forward speed from the active level profile
    pub base_speed: f32,
    /// Base speed with the speed-boost factor applied when active
    pub current_speed: f32,
    #[serde(skip)]
    pub render: Option<RenderHandle>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, GROUND_Y, 0.0),
            vertical_velocity: 0.0,
            lane: 0,
            pose: PlayerPose::Running,
            health: PLAYER_START_HEALTH,
            dead: false,
            effects: ActiveEffects::default(),
            base_speed: BASE_SPEED,
            current_speed: BASE_SPEED,
            render: None,
        }
    }

    /// Shift one lane left; no-op at the boundary.
    pub fn move_left(&mut self) {
        if self.lane > -1 {
            self.lane -= 1;
        }
    }

    /// Shift one lane right; no-op at the boundary.
    pub fn move_right(&mut self) {
        if self.lane < 1 {
            self.lane += 1;
        }
    }

    /// Leave the ground. Only possible while running.
    pub fn jump(&mut self) {
        if self.pose == PlayerPose::Running {
            self.pose = PlayerPose::Jumping;
            self.vertical_velocity = JUMP_FORCE;
        }
    }

    /// Advance one timestep: lane lag, vertical physics, buff timers, speed.
    pub fn update(&mut self, dt: f32) {
        // First-order lag toward the lane centerline, not an instant snap.
        let target_x = self.lane as f32 * LANE_WIDTH;
        self.position.x += (target_x - self.position.x) * LANE_LAG_RATE * dt;

        if self.pose != PlayerPose::Running {
            self.vertical_velocity += GRAVITY * dt;
            self.position.y += self.vertical_velocity * dt;

            if self.pose == PlayerPose::Jumping && self.vertical_velocity < 0.0 {
                self.pose = PlayerPose::Falling;
            }

            if self.position.y <= GROUND_Y {
                self.position.y = GROUND_Y;
                self.vertical_velocity = 0.0;
                self.pose = PlayerPose::Running;
            }
        }

        self.effects.update(dt);

        self.current_speed = if self.effects.has_speed_boost() {
            self.base_speed * SPEED_BOOST_FACTOR
        } else {
            self.base_speed
        };
    }

    /// Apply one hit. Invincibility ignores it, a shield soaks it, otherwise
    /// it costs a health point and may kill.
    pub fn take_damage(&mut self) {
        if self.effects.has_invincible() {
            return;
        }
        if self.effects.has_shield() {
            self.effects.consume_shield();
            return;
        }

        self.health -= 1;
        if self.health <= 0 {
            self.dead = true;
        }
    }

    pub fn activate(&mut self, kind: PowerUpKind) {
        self.effects.activate(kind);
    }

    /// Back to the spawn state. Base speed is left alone; the session
    /// re-seeds it from the level profile on start.
    pub fn reset(&mut self) {
        self.position = Vec3::new(0.0, GROUND_Y, 0.0);
        self.vertical_velocity = 0.0;
        self.lane = 0;
        self.pose = PlayerPose::Running;
        self.health = PLAYER_START_HEALTH;
        self.dead = false;
        self.effects = ActiveEffects::default();
        self.current_speed = self.base_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lane_shifts_clamp_at_the_edges() {
        let mut player = Player::new();

        player.move_left();
        player.move_left();
        assert_eq!(player.lane, -1);

        player.move_right();
        player.move_right();
        player.move_right();
        assert_eq!(player.lane, 1);
    }

    #[test]
    fn lateral_motion_lags_toward_the_lane() {
        let mut player = Player::new();
        player.move_right();
        player.update(SIM_DT);

        let expected = LANE_WIDTH * LANE_LAG_RATE * SIM_DT;
        assert!((player.position.x - expected).abs() < 1e-5);
        assert!(player.position.x < LANE_WIDTH);
    }

    #[test]
    fn jump_only_from_running() {
        let mut player = Player::new();
        player.jump();
        assert_eq!(player.pose, PlayerPose::Jumping);
        assert_eq!(player.vertical_velocity, JUMP_FORCE);

        player.update(SIM_DT);
        let mid_air_velocity = player.vertical_velocity;
        player.jump();
        assert_eq!(player.vertical_velocity, mid_air_velocity);
    }

    #[test]
    fn pose_falls_past_the_apex_and_lands_running() {
        let mut player = Player::new();
        player.jump();

        let mut saw_falling = false;
        for _ in 0..200 {
            player.update(SIM_DT);
            if player.pose == PlayerPose::Falling {
                saw_falling = true;
            }
            if player.pose == PlayerPose::Running {
                break;
            }
        }

        assert!(saw_falling);
        assert_eq!(player.pose, PlayerPose::Running);
        assert_eq!(player.position.y, GROUND_Y);
        assert_eq!(player.vertical_velocity, 0.0);
    }

    #[test]
    fn three_hits_kill() {
        let mut player = Player::new();
        player.take_damage();
        player.take_damage();
        assert!(!player.dead);
        player.take_damage();
        assert_eq!(player.health, 0);
        assert!(player.dead);
    }

    #[test]
    fn shield_soaks_exactly_one_hit() {
        let mut player = Player::new();
        player.activate(PowerUpKind::Shield);

        player.take_damage();
        assert_eq!(player.health, 3);
        assert!(!player.effects.has_shield());

        player.take_damage();
        assert_eq!(player.health, 2);
    }

    #[test]
    fn invincibility_blocks_damage_until_expiry() {
        let mut player = Player::new();
        player.activate(PowerUpKind::Invincible);

        // 12 * 0.25s covers the full 3s window exactly.
        for _ in 0..12 {
            player.take_damage();
            player.update(0.25);
        }
        assert_eq!(player.health, 3);
        assert!(!player.effects.has_invincible());

        player.take_damage();
        assert_eq!(player.health, 2);
    }

    #[test]
    fn reactivation_refreshes_instead_of_stacking() {
        let mut player = Player::new();
        player.activate(PowerUpKind::Magnet);
        player.update(4.0);
        assert_eq!(player.effects.magnet, 4.0);

        player.activate(PowerUpKind::Magnet);
        assert_eq!(player.effects.magnet, PowerUpKind::Magnet.duration_secs());
    }

    #[test]
    fn speed_boost_scales_current_speed_while_active() {
        let mut player = Player::new();
        player.base_speed = 20.0;

        player.activate(PowerUpKind::SpeedBoost);
        player.update(0.25);
        assert_eq!(player.current_speed, 30.0);

        player.update(5.0);
        assert_eq!(player.current_speed, 20.0);
    }

    #[test]
    fn reset_restores_spawn_state_but_keeps_base_speed() {
        let mut player = Player::new();
        player.base_speed = 27.0;
        player.move_left();
        player.jump();
        player.update(0.1);
        player.activate(PowerUpKind::Shield);
        player.take_damage();
        player.take_damage();

        player.reset();
        assert_eq!(player.position, Vec3::new(0.0, GROUND_Y, 0.0));
        assert_eq!(player.lane, 0);
        assert_eq!(player.pose, PlayerPose::Running);
        assert_eq!(player.health, PLAYER_START_HEALTH);
        assert!(!player.dead);
        assert_eq!(player.effects, ActiveEffects::default());
        assert_eq!(player.base_speed, 27.0);
        assert_eq!(player.current_speed, 27.0);
    }

    proptest! {
        #[test]
        fn lane_stays_in_bounds_for_any_move_sequence(
            moves in proptest::collection::vec(any::<bool>(), 0..64)
        ) {
            let mut player = Player::new();
            for go_right in moves {
                if go_right {
                    player.move_right();
                } else {
                    player.move_left();
                }
                prop_assert!((-1..=1).contains(&player.lane));
            }
        }
    }
}
