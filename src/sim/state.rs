//! Run state and world entity types
//!
//! A `RunState` is the single owner of everything a run touches. It is
//! replaced wholesale on restart; only the best score carries over.

use glam::Vec2;
use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::EffectsPool;
use super::player::PlayerState;
use crate::consts::*;
use crate::tuning::Tuning;

/// Mode derived from the run flags, in banner priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first jump/start signal
    Ready,
    Running,
    Paused,
    GameOver,
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Sits on the ground; must be jumped
    Ground,
    /// Flies at a fixed band with a small bob
    Flyer {
        /// Wing phase in [0, TAU)
        flap: f32,
    },
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Ground obstacle with its base on the ground line
    pub fn ground(x: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, GROUND_Y - height, width, height),
            kind: ObstacleKind::Ground,
        }
    }

    /// Flyer with its top edge at `y`
    pub fn flyer(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, FLYER_WIDTH, FLYER_HEIGHT),
            kind: ObstacleKind::Flyer { flap: 0.0 },
        }
    }

    pub fn is_flyer(&self) -> bool {
        matches!(self.kind, ObstacleKind::Flyer { .. })
    }

    /// Scroll left and animate. Flyers bob with their wing phase.
    pub fn advance(&mut self, distance: f32, dt: f32) {
        self.rect.pos.x -= distance;
        if let ObstacleKind::Flyer { ref mut flap } = self.kind {
            *flap = (*flap + dt * 10.0) % std::f32::consts::TAU;
            self.rect.pos.y += flap.sin() * 18.0 * dt;
        }
    }

    /// True once the trailing edge has passed the left edge of the view
    pub fn is_offscreen(&self) -> bool {
        self.rect.right() < 0.0
    }
}

/// Background cloud (decoration only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: Vec2,
}

/// Cloud drift speed (px/s), independent of world speed
pub const CLOUD_SPEED: f32 = 32.0;
/// Clouds seeded on reset
pub const INITIAL_CLOUDS: usize = 5;
/// Keep at least this many clouds alive
pub const MIN_CLOUDS: usize = 7;

impl Cloud {
    pub fn random(x: f32, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(x, rng.random_range(24..=140) as f32),
            size: Vec2::new(
                rng.random_range(46..=90) as f32,
                rng.random_range(18..=34) as f32,
            ),
        }
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Seed this run was started from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Seconds of simulated (unpaused) time
    pub time: f32,
    pub score: f64,
    /// Best score seen this session; never decreases
    pub best_score: f64,
    /// World scroll speed (px/s)
    pub speed: f32,
    pub player: PlayerState,
    /// Spawn order == left-to-right order
    pub obstacles: Vec<Obstacle>,
    pub effects: EffectsPool,
    pub clouds: Vec<Cloud>,
    /// Leading-edge spacing required before the next spawn
    pub next_gap: f32,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
}

impl RunState {
    /// Fresh run that has not started yet
    pub fn new(seed: u64, best_score: f64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let clouds = (0..INITIAL_CLOUDS)
            .map(|_| {
                let x = rng.random_range(0..=VIEW_WIDTH as i32) as f32;
                Cloud::random(x, &mut rng)
            })
            .collect();
        let next_gap = tuning.max_gap;

        Self {
            seed,
            rng,
            time: 0.0,
            score: 0.0,
            best_score: best_score.max(0.0),
            speed: tuning.start_speed,
            player: PlayerState::new(),
            obstacles: Vec::new(),
            effects: EffectsPool::default(),
            clouds,
            next_gap,
            started: false,
            paused: false,
            game_over: false,
            tuning,
        }
    }

    /// Replace this run with a fresh, already-started one.
    /// Keeps the best score and tuning; reseeds from the current RNG.
    pub fn restart(&mut self) {
        let seed = self.rng.next_u64();
        let tuning = self.tuning.clone();
        *self = RunState::new(seed, self.best_score, tuning);
        self.started = true;
    }

    pub fn phase(&self) -> GamePhase {
        if !self.started {
            GamePhase::Ready
        } else if self.paused {
            GamePhase::Paused
        } else if self.game_over {
            GamePhase::GameOver
        } else {
            GamePhase::Running
        }
    }
}
