//! Neon Dash headless driver
//!
//! Runs the simulation at its fixed 60 Hz with a small autoplay policy and
//! prints a JSON snapshot of the final state. The real game embeds the crate
//! behind a renderer and an input layer; this binary stands in for both so a
//! run can be watched end to end from a terminal.
//!
//! Usage: `neon-dash [seed] [seconds]`

use neon_dash::consts::SIM_DT;
use neon_dash::sim::{GamePhase, GameState};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

    log::info!("autoplay run: seed {seed}, up to {seconds}s of simulated time");

    let mut state = GameState::new(seed);
    state.start_game();

    let ticks = (seconds / SIM_DT) as u64;
    for _ in 0..ticks {
        autoplay(&mut state);
        state.update(SIM_DT);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "finished: score {}, {} coins, tier {}, health {}, {:.0} units travelled",
        state.score.score,
        state.score.coins,
        state.level.tier,
        state.player.health,
        state.score.distance
    );

    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot failed: {err}"),
    }
}

/// How far ahead the autoplayer starts reacting to obstacles.
const REACTION_Z: f32 = -10.0;

/// Dodge the nearest threatening obstacle, or jump it when it can be
/// cleared. Deliberately imperfect: it only looks one obstacle ahead.
fn autoplay(state: &mut GameState) {
    let lane = state.player.lane;

    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.lane == lane && o.position.z > REACTION_Z && o.position.z < 1.0)
        .max_by(|a, b| {
            a.position
                .z
                .partial_cmp(&b.position.z)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(threat) = threat else {
        return;
    };

    if threat.kind.jumpable() {
        state.jump();
        return;
    }

    let lane_is_blocked = |l: i32| {
        state
            .obstacles
            .iter()
            .any(|o| o.lane == l && o.position.z > REACTION_Z && o.position.z < 1.0)
    };
    let open = [lane - 1, lane + 1]
        .into_iter()
        .find(|&l| (-1..=1).contains(&l) && !lane_is_blocked(l));

    match open {
        Some(l) if l < lane => state.move_left(),
        Some(_) => state.move_right(),
        // Boxed in; jumping at least clears barriers and crates.
        None => state.jump(),
    }
}
