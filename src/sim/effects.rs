//! Transient visual effects: dust particles, motion streaks, camera shake
//!
//! Nothing here affects gameplay. Effects are spawned from player events,
//! aged once per frame and pruned when their life runs out.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::{PlayerEvent, PlayerState};
use crate::consts::*;

/// Particle lifetime at spawn; opacity is measured against this
pub const PARTICLE_MAX_LIFE: f32 = 0.5;
/// Streak lifetime at spawn
pub const STREAK_MAX_LIFE: f32 = 0.18;
/// Life of the low dust kicked up while sliding
pub const SLIDE_PARTICLE_LIFE: f32 = 0.25;
/// Downward pull on dust (px/s²)
pub const PARTICLE_GRAVITY: f32 = 1200.0;
/// Maximum particles
pub const MAX_PARTICLES: usize = 256;
/// Per-frame chance of slide dust at full slide intensity
pub const SLIDE_DUST_CHANCE: f64 = 0.4;

/// Camera impulse on a fatal hit
pub const HIT_SHAKE: (f32, f32) = (14.0, 0.25);
/// Landing shake intensity range and duration
pub const LAND_SHAKE_MIN: f32 = 6.0;
pub const LAND_SHAKE_MAX: f32 = 12.0;
pub const LAND_SHAKE_TIME: f32 = 0.15;

/// A dust speck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds remaining
    pub life: f32,
}

impl Particle {
    pub fn opacity(&self) -> f32 {
        (self.life / PARTICLE_MAX_LIFE).clamp(0.0, 1.0)
    }
}

/// A horizontal motion line, drawn from `pos` leftward by `length`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Streak {
    pub pos: Vec2,
    pub length: f32,
    pub thickness: f32,
    pub life: f32,
}

impl Streak {
    pub fn new(x: f32, y: f32, length: f32, thickness: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            length,
            thickness,
            life: STREAK_MAX_LIFE,
        }
    }

    pub fn opacity(&self) -> f32 {
        (self.life / STREAK_MAX_LIFE).clamp(0.0, 1.0)
    }
}

/// Camera shake and bob
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraState {
    pub shake_intensity: f32,
    /// Seconds of shake remaining
    pub shake_timer: f32,
    /// Shake offset resampled each frame while shaking
    pub shake_offset: Vec2,
    pub bob: f32,
}

impl CameraState {
    /// Start a shake impulse, replacing any shake in progress
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        self.shake_intensity = intensity;
        self.shake_timer = duration;
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_timer > 0.0
    }

    /// Advance the shake timer and resample the offset
    pub fn age(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.shake_timer > 0.0 {
            self.shake_timer -= dt;
            let i = self.shake_intensity;
            self.shake_offset = Vec2::new(
                rng.random_range(-1.0f32..=1.0) * i,
                rng.random_range(-1.0f32..=1.0) * i,
            );
        } else {
            self.shake_timer = 0.0;
            self.shake_offset = Vec2::ZERO;
        }
    }

    /// Bob follows the run cycle on the ground and sits still in the air
    pub fn update_bob(&mut self, player: &PlayerState) {
        self.bob = if player.on_ground {
            (player.anim_phase * std::f32::consts::TAU).sin() * 2.4
        } else {
            0.6
        };
    }
}

/// All live effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectsPool {
    pub particles: Vec<Particle>,
    pub streaks: Vec<Streak>,
    pub camera: CameraState,
}

impl EffectsPool {
    fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    fn push_dust(&mut self, x: f32, y: f32, hard: bool, rng: &mut impl Rng) {
        let radius = (if hard {
            rng.random_range(3..=5)
        } else {
            rng.random_range(2..=3)
        }) as f32;
        let side = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let vel = Vec2::new(
            (rng.random::<f32>() * 80.0 + 80.0) * side,
            -(rng.random::<f32>() * 80.0 + 30.0),
        );
        self.push_particle(Particle {
            pos: Vec2::new(x, y),
            vel,
            radius,
            life: PARTICLE_MAX_LIFE,
        });
    }

    /// Turn a player event into effects
    pub fn spawn(&mut self, event: &PlayerEvent, world_speed: f32, rng: &mut impl Rng) {
        match *event {
            PlayerEvent::Jumped { pos } => {
                for _ in 0..6 {
                    self.push_dust(pos.x + 8.0, GROUND_Y, false, rng);
                }
                self.streaks
                    .push(Streak::new(pos.x - 8.0, pos.y + 12.0, 36.0, 3.0));
            }
            PlayerEvent::Landed { pos, impact_speed } => {
                self.camera.shake(
                    (impact_speed / 80.0).clamp(LAND_SHAKE_MIN, LAND_SHAKE_MAX),
                    LAND_SHAKE_TIME,
                );
                for _ in 0..8 {
                    self.push_dust(pos.x + 10.0, GROUND_Y, true, rng);
                }
            }
            PlayerEvent::Slid {
                pos,
                height,
                intensity,
            } => {
                let chance = (SLIDE_DUST_CHANCE * intensity as f64).clamp(0.0, 1.0);
                if rng.random_bool(chance) {
                    self.push_particle(Particle {
                        pos: Vec2::new(pos.x - 4.0, GROUND_Y - 2.0),
                        vel: Vec2::new(
                            -world_speed * 0.2,
                            -(rng.random_range(10..=30) as f32),
                        ),
                        radius: rng.random_range(1..=2) as f32,
                        life: SLIDE_PARTICLE_LIFE,
                    });
                    let length = 22.0 + rng.random_range(-4..=6) as f32;
                    self.streaks
                        .push(Streak::new(pos.x - 12.0, pos.y + height - 6.0, length, 2.0));
                }
            }
        }
    }

    /// Age every effect by `dt` and drop the expired ones
    pub fn age(&mut self, dt: f32, rng: &mut impl Rng) {
        for p in &mut self.particles {
            p.life -= dt;
            p.pos += p.vel * dt;
            p.vel.y += PARTICLE_GRAVITY * dt;
        }
        self.particles
            .retain(|p| p.life > 0.0 && p.pos.y < VIEW_HEIGHT + 10.0);

        for s in &mut self.streaks {
            s.life -= dt;
        }
        self.streaks.retain(|s| s.life > 0.0);

        self.camera.age(dt, rng);
    }
}
