//! Read-only view of a run for renderers and HUDs
//!
//! Built once per frame from a `RunState` plus the presentation
//! `Settings`. Everything a consumer needs is precomputed here: opacities,
//! the final camera offset, fixed-width score text and the banner phase.

use glam::Vec2;
use serde::Serialize;

use crate::format_score;
use crate::settings::Settings;
use crate::sim::{Cloud, GamePhase, Obstacle, PlayerState, RunState};

/// Max vertical camera lean while airborne (px)
const AIR_LEAN_MAX: f32 = 4.0;
/// Lean per unit of vertical velocity
const AIR_LEAN_SCALE: f32 = 0.01;

/// Player fields needed to draw a pose
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPose {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub duck: bool,
    pub on_ground: bool,
    pub anim_phase: f32,
    pub stretch: Vec2,
}

impl From<&PlayerState> for PlayerPose {
    fn from(player: &PlayerState) -> Self {
        Self {
            pos: player.pos,
            width: player.width,
            height: player.height,
            duck: player.duck,
            on_ground: player.on_ground,
            anim_phase: player.anim_phase,
            stretch: player.stretch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakView {
    pub pos: Vec2,
    pub length: f32,
    pub thickness: f32,
    pub opacity: f32,
}

/// One frame's worth of drawable state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub time: f32,
    pub speed: f32,
    /// Floored score
    pub score: u64,
    /// Zero-padded HUD text
    pub score_text: String,
    pub best_text: String,
    pub player: PlayerPose,
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<ParticleView>,
    pub streaks: Vec<StreakView>,
    pub clouds: Vec<Cloud>,
    /// Final camera translation (shake + bob + airborne lean)
    pub camera: Vec2,
}

impl Snapshot {
    pub fn capture(state: &RunState, settings: &Settings) -> Self {
        let effects = &state.effects;

        // Newest particles win when the preset caps the count
        let cap = settings.max_particles();
        let skip = effects.particles.len().saturating_sub(cap);
        let particles = effects.particles[skip..]
            .iter()
            .map(|p| ParticleView {
                pos: p.pos,
                radius: p.radius,
                opacity: p.opacity(),
            })
            .collect();

        let streaks = if settings.effective_streaks() {
            effects
                .streaks
                .iter()
                .map(|s| StreakView {
                    pos: s.pos,
                    length: s.length,
                    thickness: s.thickness,
                    opacity: s.opacity(),
                })
                .collect()
        } else {
            Vec::new()
        };

        let clouds = if settings.quality.clouds_enabled() {
            state.clouds.clone()
        } else {
            Vec::new()
        };

        Self {
            phase: state.phase(),
            started: state.started,
            paused: state.paused,
            game_over: state.game_over,
            time: state.time,
            speed: state.speed,
            score: state.score.max(0.0).floor() as u64,
            score_text: format_score(state.score),
            best_text: format_score(state.best_score),
            player: PlayerPose::from(&state.player),
            obstacles: state.obstacles.clone(),
            particles,
            streaks,
            clouds,
            camera: camera_offset(state, settings),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Camera translation after applying motion preferences
pub fn camera_offset(state: &RunState, settings: &Settings) -> Vec2 {
    let mut offset = Vec2::ZERO;
    if settings.effective_screen_shake() {
        offset += state.effects.camera.shake_offset;
    }
    if settings.effective_camera_bob() {
        let player = &state.player;
        let lean = if player.on_ground {
            0.0
        } else {
            -(player.vel_y * AIR_LEAN_SCALE).clamp(-AIR_LEAN_MAX, AIR_LEAN_MAX)
        };
        offset.y += state.effects.camera.bob + lean;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::sim::{Particle, Streak};
    use crate::tuning::Tuning;

    fn state() -> RunState {
        let mut state = RunState::new(3, 1234.9, Tuning::default());
        state.started = true;
        state.score = 42.7;
        state
    }

    #[test]
    fn test_score_text_is_padded() {
        let snap = Snapshot::capture(&state(), &Settings::default());
        assert_eq!(snap.score, 42);
        assert_eq!(snap.score_text, "00042");
        assert_eq!(snap.best_text, "01234");
        assert_eq!(snap.phase, GamePhase::Running);
    }

    #[test]
    fn test_reduced_motion_zeroes_camera() {
        let mut state = state();
        state.effects.camera.shake_offset = Vec2::new(5.0, -3.0);
        state.effects.camera.bob = 2.0;

        let snap = Snapshot::capture(&state, &Settings::default());
        assert_eq!(snap.camera, Vec2::new(5.0, -1.0));

        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert_eq!(Snapshot::capture(&state, &calm).camera, Vec2::ZERO);
    }

    #[test]
    fn test_airborne_lean_is_clamped() {
        let mut state = state();
        state.player.on_ground = false;
        state.player.vel_y = -820.0;
        state.effects.camera.bob = 0.6;
        let offset = camera_offset(&state, &Settings::default());
        assert!((offset.y - 4.6).abs() < 1e-5);

        state.player.vel_y = 200.0;
        let offset = camera_offset(&state, &Settings::default());
        assert!((offset.y - (0.6 - 2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_particle_cap_keeps_newest() {
        let mut state = state();
        for i in 0..100 {
            state.effects.particles.push(Particle {
                pos: Vec2::new(i as f32, 0.0),
                vel: Vec2::ZERO,
                radius: 2.0,
                life: 0.25,
            });
        }
        let snap = Snapshot::capture(&state, &Settings::from_preset(QualityPreset::Low));
        assert_eq!(snap.particles.len(), 48);
        assert_eq!(snap.particles.last().unwrap().pos.x, 99.0);
        assert!((snap.particles[0].opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_low_preset_hides_streaks_and_clouds() {
        let mut state = state();
        state.effects.streaks.push(Streak::new(10.0, 10.0, 36.0, 3.0));
        let snap = Snapshot::capture(&state, &Settings::from_preset(QualityPreset::Low));
        assert!(snap.streaks.is_empty());
        assert!(snap.clouds.is_empty());

        let snap = Snapshot::capture(&state, &Settings::default());
        assert_eq!(snap.streaks.len(), 1);
        assert_eq!(snap.clouds.len(), state.clouds.len());
    }

    #[test]
    fn test_serializes_to_json() {
        let json = Snapshot::capture(&state(), &Settings::default()).to_json().unwrap();
        assert!(json.contains(r#""score_text":"00042""#));
        assert!(json.contains(r#""phase":"Running""#));
    }
}
