//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-clamped timestep only
//! - Seeded RNG only, owned by the run
//! - Obstacles kept in spawn (left-to-right) order
//! - No rendering, input device or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Rect, first_hit};
pub use effects::{CameraState, EffectsPool, Particle, Streak};
pub use player::{PlayerEvent, PlayerState};
pub use spawner::ensure_spawns;
pub use state::{Cloud, GamePhase, Obstacle, ObstacleKind, RunState};
pub use tick::{GameEvent, TickInput, tick};
