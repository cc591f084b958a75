//! Difficulty tiers and level progression
//!
//! Ten static tuning profiles; elapsed time within a tier drives advancement.
//! The final tier never terminates the session, it only raises a completion
//! flag and keeps running at the hardest profile.

use serde::{Deserialize, Serialize};

/// Highest difficulty tier
pub const MAX_TIER: u32 = 10;

/// One tier's tuning values. Immutable, looked up by tier number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProfile {
    pub tier: u32,
    /// Player forward speed (units/s)
    pub speed: f32,
    /// Seconds between obstacle waves
    pub obstacle_spawn_interval: f32,
    /// Probability a power-up attempt spawns (0-1)
    pub power_up_chance: f32,
    /// Probability a coin attempt spawns a run (0-1)
    pub coin_chance: f32,
    /// Scroll-speed multiplier applied to every entity
    pub obstacle_speed_multiplier: f32,
    /// Seconds spent in this tier before advancing
    pub duration_secs: f32,
}

/// The full tuning table, tier 1 (easiest) through 10.
pub const PROFILES: [LevelProfile; 10] = [
    LevelProfile {
        tier: 1,
        speed: 15.0,
        obstacle_spawn_interval: 2.5,
        power_up_chance: 0.15,
        coin_chance: 0.3,
        obstacle_speed_multiplier: 1.0,
        duration_secs: 30.0,
    },
    LevelProfile {
        tier: 2,
        speed: 17.0,
        obstacle_spawn_interval: 2.2,
        power_up_chance: 0.18,
        coin_chance: 0.32,
        obstacle_speed_multiplier: 1.05,
        duration_secs: 35.0,
    },
    LevelProfile {
        tier: 3,
        speed: 19.0,
        obstacle_spawn_interval: 2.0,
        power_up_chance: 0.2,
        coin_chance: 0.35,
        obstacle_speed_multiplier: 1.1,
        duration_secs: 35.0,
    },
    LevelProfile {
        tier: 4,
        speed: 21.0,
        obstacle_spawn_interval: 1.8,
        power_up_chance: 0.22,
        coin_chance: 0.35,
        obstacle_speed_multiplier: 1.15,
        duration_secs: 40.0,
    },
    LevelProfile {
        tier: 5,
        speed: 23.0,
        obstacle_spawn_interval: 1.6,
        power_up_chance: 0.25,
        coin_chance: 0.38,
        obstacle_speed_multiplier: 1.2,
        duration_secs: 40.0,
    },
    LevelProfile {
        tier: 6,
        speed: 25.0,
        obstacle_spawn_interval: 1.5,
        power_up_chance: 0.25,
        coin_chance: 0.4,
        obstacle_speed_multiplier: 1.25,
        duration_secs: 45.0,
    },
    LevelProfile {
        tier: 7,
        speed: 27.0,
        obstacle_spawn_interval: 1.4,
        power_up_chance: 0.28,
        coin_chance: 0.4,
        obstacle_speed_multiplier: 1.3,
        duration_secs: 45.0,
    },
    LevelProfile {
        tier: 8,
        speed: 29.0,
        obstacle_spawn_interval: 1.3,
        power_up_chance: 0.3,
        coin_chance: 0.42,
        obstacle_speed_multiplier: 1.35,
        duration_secs: 50.0,
    },
    LevelProfile {
        tier: 9,
        speed: 31.0,
        obstacle_spawn_interval: 1.2,
        power_up_chance: 0.32,
        coin_chance: 0.45,
        obstacle_speed_multiplier: 1.4,
        duration_secs: 50.0,
    },
    LevelProfile {
        tier: 10,
        speed: 35.0,
        obstacle_spawn_interval: 1.0,
        power_up_chance: 0.35,
        coin_chance: 0.5,
        obstacle_speed_multiplier: 1.5,
        duration_secs: 60.0,
    },
];

impl LevelProfile {
    /// Look up a profile by tier. Out-of-range tiers clamp to the nearest
    /// valid one instead of failing.
    pub fn for_tier(tier: u32) -> &'static LevelProfile {
        let index = tier.clamp(1, MAX_TIER) as usize - 1;
        &PROFILES[index]
    }
}

/// Elapsed-time-driven tier advancement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Current tier, 1 through [`MAX_TIER`]
    pub tier: u32,
    /// Seconds spent in the current tier
    pub elapsed: f32,
    /// Set once the final tier's duration has elapsed
    pub complete: bool,
}

impl Default for LevelProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelProgress {
    pub fn new() -> Self {
        Self {
            tier: 1,
            elapsed: 0.0,
            complete: false,
        }
    }

    /// The active tuning profile.
    pub fn profile(&self) -> &'static LevelProfile {
        LevelProfile::for_tier(self.tier)
    }

    /// Accumulate time and advance the tier when the profile's duration is
    /// up. The final tier flags completion instead of advancing.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;

        if self.elapsed >= self.profile().duration_secs {
            if self.tier < MAX_TIER {
                self.tier += 1;
                self.elapsed = 0.0;
                log::info!("reached tier {}", self.tier);
            } else {
                self.complete = true;
            }
        }
    }

    /// Skip straight to the next tier (debug/testing).
    pub fn advance_tier(&mut self) {
        if self.tier < MAX_TIER {
            self.tier += 1;
            self.elapsed = 0.0;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_clamps_out_of_range_tiers() {
        assert_eq!(LevelProfile::for_tier(0).tier, 1);
        assert_eq!(LevelProfile::for_tier(1).tier, 1);
        assert_eq!(LevelProfile::for_tier(7).tier, 7);
        assert_eq!(LevelProfile::for_tier(10).tier, 10);
        assert_eq!(LevelProfile::for_tier(42).tier, 10);
    }

    #[test]
    fn table_rows_match_their_position() {
        for (i, profile) in PROFILES.iter().enumerate() {
            assert_eq!(profile.tier as usize, i + 1);
        }
    }

    #[test]
    fn advances_at_exact_duration() {
        let mut progress = LevelProgress::new();
        progress.update(29.0);
        assert_eq!(progress.tier, 1);

        // Tier 1 lasts 30 seconds; hitting it exactly rolls over.
        progress.update(1.0);
        assert_eq!(progress.tier, 2);
        assert_eq!(progress.elapsed, 0.0);
        assert!(!progress.complete);
    }

    #[test]
    fn final_tier_flags_completion_and_stays() {
        let mut progress = LevelProgress {
            tier: MAX_TIER,
            elapsed: 0.0,
            complete: false,
        };

        progress.update(60.0);
        assert_eq!(progress.tier, MAX_TIER);
        assert!(progress.complete);

        // Keeps running at the hardest profile indefinitely.
        progress.update(1000.0);
        assert_eq!(progress.tier, MAX_TIER);
        assert_eq!(progress.profile().speed, 35.0);
    }

    #[test]
    fn advance_tier_skips_and_saturates() {
        let mut progress = LevelProgress::new();
        progress.elapsed = 12.0;
        progress.advance_tier();
        assert_eq!(progress.tier, 2);
        assert_eq!(progress.elapsed, 0.0);

        progress.tier = MAX_TIER;
        progress.advance_tier();
        assert_eq!(progress.tier, MAX_TIER);
    }

    #[test]
    fn reset_returns_to_tier_one() {
        let mut progress = LevelProgress::new();
        progress.update(200.0);
        progress.complete = true;
        progress.reset();
        assert_eq!(progress, LevelProgress::new());
    }
}
