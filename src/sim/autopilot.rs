//! Demo-mode autopilot
//!
//! Reads the run and produces the input a reasonable player would give:
//! short hops over anything at running height, ducks under low flyers,
//! and restarts after a crash. Used by the headless demo and soak tests.

use super::state::{GamePhase, Obstacle, RunState};
use super::tick::TickInput;
use crate::consts::*;

/// Seconds of look-ahead before jumping
const JUMP_LEAD: f32 = 0.12;
/// Seconds of look-ahead before ducking
const DUCK_LEAD: f32 = 0.35;

/// What the player has to do about an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Threat {
    Jump,
    Duck,
    Ignore,
}

fn classify(obstacle: &Obstacle) -> Threat {
    let bottom = obstacle.rect.bottom();
    if bottom < GROUND_Y - PLAYER_HEIGHT {
        // Passes over a standing player
        Threat::Ignore
    } else if obstacle.is_flyer() && bottom < GROUND_Y - PLAYER_DUCK_HEIGHT {
        Threat::Duck
    } else {
        Threat::Jump
    }
}

/// Decide this frame's input
pub fn autopilot(state: &RunState) -> TickInput {
    match state.phase() {
        GamePhase::Ready | GamePhase::GameOver => {
            return TickInput {
                restart_requested: true,
                ..Default::default()
            };
        }
        GamePhase::Paused => return TickInput::default(),
        GamePhase::Running => {}
    }

    let player = &state.player;
    let player_right = player.pos.x + player.width;

    // Nearest obstacle that has not fully passed the player
    let next = state
        .obstacles
        .iter()
        .filter(|o| o.rect.right() >= player.pos.x)
        .find(|o| classify(o) != Threat::Ignore);

    let mut input = TickInput::default();
    if let Some(obstacle) = next {
        let distance = obstacle.rect.left() - player_right;
        match classify(obstacle) {
            Threat::Duck => {
                input.duck_held = distance < state.speed * DUCK_LEAD;
            }
            Threat::Jump => {
                if player.on_ground && distance < state.speed * JUMP_LEAD {
                    input.jump_requested = true;
                }
            }
            Threat::Ignore => {}
        }
    }
    input
}
