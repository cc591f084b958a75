//! Stateless per-tick collision resolution
//!
//! Overlap tests are cylinder-style: Euclidean distance in the ground plane
//! plus a vertical window where the entity has one. The pass runs obstacles
//! first, then power-ups, then coins, so a buff grabbed this tick already
//! applies to the coins behind it.

use glam::Vec3;

use super::entity::{Coin, Obstacle, PowerUp};
use super::player::Player;
use super::score::ScoreBoard;
use crate::consts::*;

/// Distance in the ground plane, ignoring height.
#[inline]
fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// True if the player's footprint overlaps the obstacle's collision volume.
pub fn obstacle_overlap(player_pos: Vec3, obstacle: &Obstacle) -> bool {
    let horizontal = horizontal_distance(player_pos, obstacle.position);
    let vertical = (player_pos.y - obstacle.position.y).abs();

    horizontal < obstacle.kind.radius() + PLAYER_RADIUS && vertical < obstacle.kind.height()
}

/// True if the player is airborne high enough to pass a jumpable obstacle.
pub fn clears_obstacle(player_pos: Vec3, obstacle: &Obstacle) -> bool {
    obstacle.kind.jumpable() && player_pos.y > obstacle.kind.height() + JUMP_CLEARANCE
}

/// Power-up pickup is a horizontal-only test.
pub fn power_up_overlap(player_pos: Vec3, power_up: &PowerUp) -> bool {
    horizontal_distance(player_pos, power_up.position) < PowerUp::RADIUS + PICKUP_MARGIN
}

/// Coin pickup needs horizontal overlap plus a vertical window.
pub fn coin_overlap(player_pos: Vec3, coin: &Coin) -> bool {
    horizontal_distance(player_pos, coin.position) < Coin::RADIUS + PICKUP_MARGIN
        && (player_pos.y - coin.position.y).abs() < COIN_VERTICAL_WINDOW
}

/// Run the full pass over every active entity. Colliding entities are
/// removed from their collections; effects land on the player and the score
/// tracker. Multiple simultaneous collisions all resolve within the tick.
pub fn resolve(
    player: &mut Player,
    obstacles: &mut Vec<Obstacle>,
    power_ups: &mut Vec<PowerUp>,
    coins: &mut Vec<Coin>,
    score: &mut ScoreBoard,
) {
    let player_pos = player.position;

    obstacles.retain_mut(|obstacle| {
        if !obstacle.active || !obstacle_overlap(player_pos, obstacle) {
            return true;
        }
        if clears_obstacle(player_pos, obstacle) {
            return true;
        }
        // A hit destroys the obstacle even when a shield soaks the damage.
        // Invincibility leaves it in place.
        if player.effects.has_invincible() {
            return true;
        }
        player.take_damage();
        obstacle.remove();
        false
    });

    power_ups.retain_mut(|power_up| {
        if power_up.active && power_up_overlap(player_pos, power_up) {
            player.activate(power_up.kind);
            power_up.remove();
            return false;
        }
        true
    });

    let coin_value: u32 = if player.effects.has_coin_multiplier() {
        2
    } else {
        1
    };
    coins.retain_mut(|coin| {
        if coin.active && coin_overlap(player_pos, coin) {
            score.add_coins(coin_value);
            coin.remove();
            return false;
        }
        true
    });
}
