//! Data-driven game balance
//!
//! Every gameplay constant that shapes feel or difficulty lives here so a run
//! can be re-tuned from JSON without touching the simulation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Vertical launch velocity (negative is up)
    pub jump_velocity: f32,
    /// Grace period after leaving the ground during which a jump still counts
    pub coyote_time: f32,
    /// How long an early jump request is remembered
    pub jump_buffer: f32,
    /// Window during which holding jump reduces gravity
    pub max_jump_hold: f32,
    /// Gravity multiplier while the hold boost is active
    pub hold_gravity_scale: f32,
    /// Run cycles per second
    pub step_freq: f32,
    /// Slide timer cap while ducking
    pub slide_max: f32,
    /// Slide timer decay multiplier when not ducking
    pub slide_decay: f32,
    /// Rate at which squash/stretch eases back to neutral
    pub stretch_ease_rate: f32,
    /// Impact speed above which landing kicks up dust and shakes the camera
    pub hard_landing_speed: f32,

    // === World ===
    pub start_speed: f32,
    pub max_speed: f32,
    /// Speed gained per second
    pub speed_accel: f32,
    /// Score gained per second
    pub score_rate: f32,

    // === Spawning ===
    /// Minimum gap between consecutive obstacles
    pub min_gap: f32,
    /// Maximum gap (also the first gap of a run)
    pub max_gap: f32,
    /// Gap shrink per point of score
    pub gap_shrink_per_point: f32,
    /// Score after which flyers can appear
    pub flyer_unlock_score: f64,
    /// Flyer probability once unlocked
    pub flyer_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 2400.0,
            jump_velocity: -820.0,
            coyote_time: 0.08,
            jump_buffer: 0.12,
            max_jump_hold: 0.22,
            hold_gravity_scale: 0.55,
            step_freq: 8.5,
            slide_max: 0.25,
            slide_decay: 2.5,
            stretch_ease_rate: 12.0,
            hard_landing_speed: 300.0,

            start_speed: 360.0,
            max_speed: 880.0,
            speed_accel: 14.0,
            score_rate: 10.0,

            min_gap: 360.0,
            max_gap: 720.0,
            gap_shrink_per_point: 0.7,
            flyer_unlock_score: 260.0,
            flyer_chance: 0.22,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        for (field, value) in [
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("coyote_time", self.coyote_time),
            ("jump_buffer", self.jump_buffer),
            ("max_jump_hold", self.max_jump_hold),
            ("hold_gravity_scale", self.hold_gravity_scale),
            ("step_freq", self.step_freq),
            ("slide_max", self.slide_max),
            ("slide_decay", self.slide_decay),
            ("stretch_ease_rate", self.stretch_ease_rate),
            ("hard_landing_speed", self.hard_landing_speed),
            ("start_speed", self.start_speed),
            ("max_speed", self.max_speed),
            ("speed_accel", self.speed_accel),
            ("score_rate", self.score_rate),
            ("min_gap", self.min_gap),
            ("max_gap", self.max_gap),
            ("gap_shrink_per_point", self.gap_shrink_per_point),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        if !self.flyer_unlock_score.is_finite() {
            return Err(invalid("flyer_unlock_score", "must be finite"));
        }

        if self.gravity <= 0.0 {
            return Err(invalid("gravity", "must be positive"));
        }
        if self.jump_velocity >= 0.0 {
            return Err(invalid("jump_velocity", "must be negative (upward)"));
        }
        if !(0.0..=1.0).contains(&self.hold_gravity_scale) {
            return Err(invalid("hold_gravity_scale", "must be within [0, 1]"));
        }
        for (field, value) in [
            ("coyote_time", self.coyote_time),
            ("jump_buffer", self.jump_buffer),
            ("max_jump_hold", self.max_jump_hold),
            ("slide_max", self.slide_max),
            ("step_freq", self.step_freq),
            ("slide_decay", self.slide_decay),
            ("stretch_ease_rate", self.stretch_ease_rate),
            ("hard_landing_speed", self.hard_landing_speed),
            ("speed_accel", self.speed_accel),
            ("gap_shrink_per_point", self.gap_shrink_per_point),
        ] {
            if value < 0.0 {
                return Err(invalid(field, "must not be negative"));
            }
        }
        if self.score_rate <= 0.0 {
            return Err(invalid("score_rate", "must be positive"));
        }
        if self.start_speed <= 0.0 || self.max_speed < self.start_speed {
            return Err(invalid("max_speed", "must be >= start_speed > 0"));
        }
        if self.min_gap <= 0.0 || self.max_gap < self.min_gap {
            return Err(invalid(
                "max_gap",
                format!("gap range [{}, {}] is empty", self.min_gap, self.max_gap),
            ));
        }
        if !(0.0..=1.0).contains(&self.flyer_chance) {
            return Err(invalid("flyer_chance", "must be a probability"));
        }
        Ok(())
    }

    /// Gap ceiling at the given score (linear difficulty, clamped to the gap range)
    pub fn gap_ceiling(&self, score: f64) -> f32 {
        (self.max_gap - score as f32 * self.gap_shrink_per_point).clamp(self.min_gap, self.max_gap)
    }
}
