//! Procedural obstacle spawning
//!
//! Obstacles always enter fully beyond the right edge. The next one is
//! appended once the previous obstacle's leading edge has scrolled left of
//! `VIEW_WIDTH - next_gap`, so consecutive leading edges are never closer
//! than the gap that was rolled for them. Gaps shrink with score.

use rand::Rng;

use super::state::{Obstacle, RunState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Spawn offset ranges past the right edge
const FIRST_OFFSET: (i32, i32) = (0, 80);
const GROUND_OFFSET: (i32, i32) = (0, 40);
const FLYER_OFFSET: (i32, i32) = (20, 80);

fn offset(range: (i32, i32), rng: &mut impl Rng) -> f32 {
    VIEW_WIDTH + rng.random_range(range.0..=range.1) as f32
}

fn ground_obstacle(x: f32, rng: &mut impl Rng) -> Obstacle {
    let (w, h) = GROUND_CATALOG[rng.random_range(0..GROUND_CATALOG.len())];
    Obstacle::ground(x, w, h)
}

fn flyer_obstacle(x: f32, rng: &mut impl Rng) -> Obstacle {
    let y = FLYER_BANDS[rng.random_range(0..FLYER_BANDS.len())];
    Obstacle::flyer(x, y)
}

/// Roll the gap that must open up before the following spawn
pub fn roll_gap(score: f64, tuning: &Tuning, rng: &mut impl Rng) -> f32 {
    rng.random_range(tuning.min_gap..=tuning.gap_ceiling(score))
}

/// Append an obstacle if one is due. Returns true when one was spawned.
pub fn ensure_spawns(state: &mut RunState) -> bool {
    let RunState {
        obstacles,
        next_gap,
        rng,
        tuning,
        score,
        ..
    } = state;

    let obstacle = match obstacles.last() {
        None => {
            let first = ground_obstacle(offset(FIRST_OFFSET, rng), rng);
            *next_gap = rng.random_range(tuning.min_gap..=tuning.max_gap);
            first
        }
        Some(last) if last.rect.left() < VIEW_WIDTH - *next_gap => {
            let flyers_unlocked = *score > tuning.flyer_unlock_score;
            let next = if flyers_unlocked && rng.random_bool(tuning.flyer_chance) {
                flyer_obstacle(offset(FLYER_OFFSET, rng), rng)
            } else {
                ground_obstacle(offset(GROUND_OFFSET, rng), rng)
            };
            *next_gap = roll_gap(*score, tuning, rng);
            next
        }
        Some(_) => return false,
    };

    log::debug!(
        "spawn {:?} at x={:.0} (next gap {:.0})",
        obstacle.kind,
        obstacle.rect.left(),
        next_gap
    );
    obstacles.push(obstacle);
    true
}
