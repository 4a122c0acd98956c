//! Player controller
//!
//! One actor with a fixed set of motion primitives: run, jump (with coyote
//! time, jump buffering and hold-for-height), and duck-slide. Each step reads
//! the frame's normalized input and reports the physics events that effects
//! should react to.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;

/// Physics events raised by the controller for the effects pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// A jump was admitted from `pos`
    Jumped { pos: Vec2 },
    /// Touched down hard enough to kick up dust
    Landed { pos: Vec2, impact_speed: f32 },
    /// Ducking on the ground; `intensity` in [0, 1] grows with slide duration
    Slid {
        pos: Vec2,
        height: f32,
        intensity: f32,
    },
}

/// The player actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top-left of the hitbox; x never changes
    pub pos: Vec2,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    pub width: f32,
    /// Standing or ducking height
    pub height: f32,
    pub on_ground: bool,
    pub duck: bool,
    /// Run cycle phase in [0, 1)
    pub anim_phase: f32,
    pub coyote_timer: f32,
    pub jump_buffer_timer: f32,
    /// Time since the current jump started, while jump is still held
    pub jump_hold_timer: Option<f32>,
    /// Squash/stretch scale (x, y), eased back toward 1
    pub stretch: Vec2,
    /// Grows while ducking, decays otherwise
    pub slide_timer: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    /// Standing on the ground at the fixed run position
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_HEIGHT),
            vel_y: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            on_ground: true,
            duck: false,
            anim_phase: 0.0,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
            jump_hold_timer: None,
            stretch: Vec2::ONE,
            slide_timer: 0.0,
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Y of the feet
    pub fn feet_y(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Advance the player by `dt`, returning the events raised this step
    pub fn step(&mut self, input: &TickInput, dt: f32, tuning: &Tuning) -> Vec<PlayerEvent> {
        let mut events = Vec::new();

        if input.jump_requested {
            self.jump_buffer_timer = tuning.jump_buffer;
        }

        self.duck = input.duck_held && self.on_ground;
        self.height = if self.duck {
            PLAYER_DUCK_HEIGHT
        } else {
            PLAYER_HEIGHT
        };
        // Ducking lowers the top edge; feet stay on the ground line
        if self.on_ground {
            self.pos.y = GROUND_Y - self.height;
        }
        self.slide_timer = if self.duck {
            (self.slide_timer + dt).min(tuning.slide_max)
        } else {
            (self.slide_timer - dt * tuning.slide_decay).max(0.0)
        };

        if !self.on_ground {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }
        self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);

        if (self.on_ground || self.coyote_timer > 0.0) && self.jump_buffer_timer > 0.0 {
            if self.duck {
                // Stand up to launch
                self.duck = false;
                self.height = PLAYER_HEIGHT;
                self.pos.y = GROUND_Y - PLAYER_HEIGHT;
            }
            self.vel_y = tuning.jump_velocity;
            self.on_ground = false;
            self.coyote_timer = 0.0;
            self.jump_buffer_timer = 0.0;
            self.jump_hold_timer = Some(0.0);
            self.stretch = Vec2::new(0.94, 1.08);
            events.push(PlayerEvent::Jumped { pos: self.pos });
        }

        // Releasing jump ends the hold window for this jump
        if !input.jump_held {
            self.jump_hold_timer = None;
        }
        let boosted = match self.jump_hold_timer.as_mut() {
            Some(held) => {
                *held += dt;
                *held < tuning.max_jump_hold && self.vel_y < 0.0
            }
            None => false,
        };
        let gravity_scale = if boosted {
            tuning.hold_gravity_scale
        } else {
            1.0
        };
        self.vel_y += tuning.gravity * gravity_scale * dt;
        self.pos.y += self.vel_y * dt;

        let ground_top = GROUND_Y - self.height;
        if self.pos.y >= ground_top {
            self.pos.y = ground_top;
            let impact_speed = self.vel_y.abs();
            if !self.on_ground && impact_speed > tuning.hard_landing_speed {
                self.stretch = Vec2::new(1.08, 0.92);
                events.push(PlayerEvent::Landed {
                    pos: self.pos,
                    impact_speed,
                });
            }
            self.vel_y = 0.0;
            self.on_ground = true;
            self.coyote_timer = tuning.coyote_time;
            self.jump_hold_timer = None;
        } else {
            self.on_ground = false;
        }

        if self.duck {
            let intensity = if tuning.slide_max > 0.0 {
                self.slide_timer / tuning.slide_max
            } else {
                1.0
            };
            events.push(PlayerEvent::Slid {
                pos: self.pos,
                height: self.height,
                intensity,
            });
        }

        self.anim_phase = (self.anim_phase + dt * tuning.step_freq).rem_euclid(1.0);

        let ease = (dt * tuning.stretch_ease_rate).min(1.0);
        self.stretch += (Vec2::ONE - self.stretch) * ease;

        events
    }
}
