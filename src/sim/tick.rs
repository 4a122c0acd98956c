//! Per-frame world step
//!
//! Advances one run by one (pre-clamped) frame in a fixed order: gates,
//! time and speed, spawning, scrolling, player, collision, effects, score.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::first_hit;
use super::effects::HIT_SHAKE;
use super::player::PlayerEvent;
use super::spawner::ensure_spawns;
use super::state::{CLOUD_SPEED, Cloud, MIN_CLOUDS, RunState};
use crate::consts::*;

/// Normalized input signals for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Jump pressed this frame (edge)
    pub jump_requested: bool,
    /// Jump currently held (level)
    pub jump_held: bool,
    /// Duck currently held (level)
    pub duck_held: bool,
    /// Pause pressed this frame (edge)
    pub pause_toggled: bool,
    /// Restart pressed this frame (edge)
    pub restart_requested: bool,
}

/// Things that happened during a tick, for the session and audio/HUD hooks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Restarted,
    /// Score passed the previous best
    NewBest { score: f64 },
    GameOver { score: f64 },
    Player(PlayerEvent),
}

/// Advance the run by `dt` seconds
pub fn tick(state: &mut RunState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause_toggled {
        state.paused = !state.paused;
        events.push(if state.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        });
    }

    if !state.started {
        if input.jump_requested || input.restart_requested {
            state.started = true;
            log::info!("Run started (seed {})", state.seed);
            events.push(GameEvent::Started);
        }
        return events;
    }

    if state.paused {
        return events;
    }

    // Game over only listens for restart; the crash shake still plays out
    if state.game_over {
        if input.restart_requested {
            state.restart();
            log::debug!("Run restarted (seed {})", state.seed);
            events.push(GameEvent::Restarted);
        } else {
            state.effects.camera.age(dt, &mut state.rng);
        }
        return events;
    }

    state.time += dt;
    state.speed = (state.speed + state.tuning.speed_accel * dt)
        .clamp(state.tuning.start_speed, state.tuning.max_speed);

    ensure_spawns(state);

    let distance = state.speed * dt;
    for obstacle in &mut state.obstacles {
        obstacle.advance(distance, dt);
    }
    state.obstacles.retain(|o| !o.is_offscreen());
    scroll_clouds(state, dt);

    let player_events = state.player.step(input, dt, &state.tuning);
    for event in &player_events {
        state.effects.spawn(event, state.speed, &mut state.rng);
    }
    events.extend(player_events.into_iter().map(GameEvent::Player));
    state.effects.camera.update_bob(&state.player);

    if first_hit(&state.player.hitbox(), &state.obstacles).is_some() {
        state.game_over = true;
        state.effects.camera.shake(HIT_SHAKE.0, HIT_SHAKE.1);
        log::info!(
            "Game over: score {} (best {})",
            crate::format_score(state.score),
            crate::format_score(state.best_score)
        );
        events.push(GameEvent::GameOver { score: state.score });
        return events;
    }

    state.effects.age(dt, &mut state.rng);

    state.score += state.tuning.score_rate as f64 * dt as f64;
    if state.score > state.best_score {
        state.best_score = state.score;
        events.push(GameEvent::NewBest { score: state.score });
    }

    events
}

/// Drift clouds left and keep the sky populated
fn scroll_clouds(state: &mut RunState, dt: f32) {
    for cloud in &mut state.clouds {
        cloud.pos.x -= CLOUD_SPEED * dt;
    }
    state.clouds.retain(|c| c.pos.x + c.size.x > -20.0);

    let needs_cloud = state.clouds.len() < MIN_CLOUDS
        || state
            .clouds
            .last()
            .is_none_or(|c| c.pos.x < VIEW_WIDTH - 220.0);
    if needs_cloud {
        let x = VIEW_WIDTH + state.rng.random_range(40..=120) as f32;
        let cloud = Cloud::random(x, &mut state.rng);
        state.clouds.push(cloud);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT_60HZ as DT;
    use crate::sim::state::{GamePhase, Obstacle};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn started(seed: u64) -> RunState {
        let mut state = RunState::new(seed, 0.0, Tuning::default());
        state.started = true;
        state
    }

    fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    #[test]
    fn test_waits_for_start() {
        let mut state = RunState::new(1, 0.0, Tuning::default());
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.is_empty());
        assert_eq!(state.time, 0.0);
        assert_eq!(state.phase(), GamePhase::Ready);

        let events = tick(&mut state, &press(|i| i.jump_requested = true), DT);
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.phase(), GamePhase::Running);

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.time > 0.0);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = started(2);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        let pause = press(|i| i.pause_toggled = true);
        tick(&mut state, &pause, DT);
        assert_eq!(state.phase(), GamePhase::Paused);

        let before = (state.time, state.score, state.player.clone(), state.obstacles.clone());
        for _ in 0..30 {
            tick(&mut state, &press(|i| i.jump_requested = true), DT);
        }
        let after = (state.time, state.score, state.player.clone(), state.obstacles.clone());
        assert_eq!(before, after);

        let events = tick(&mut state, &pause, DT);
        assert_eq!(events[0], GameEvent::Resumed);
        assert!(state.time > before.0);
    }

    #[test]
    fn test_score_and_speed_advance() {
        let mut state = started(3);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!((state.score - 10.0).abs() < 0.01);
        assert!((state.speed - 374.0).abs() < 0.1);
        assert_eq!(state.best_score, state.score);
    }

    #[test]
    fn test_speed_caps() {
        let mut state = started(4);
        state.speed = state.tuning.max_speed - 0.01;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.speed, state.tuning.max_speed);
    }

    #[test]
    fn test_jump_leaves_ground_within_one_frame() {
        let mut state = started(5);
        let events = tick(&mut state, &press(|i| i.jump_requested = true), DT);
        assert!(!state.player.on_ground);
        assert!(events.contains(&GameEvent::Player(PlayerEvent::Jumped {
            pos: glam::Vec2::new(PLAYER_X, GROUND_Y - PLAYER_HEIGHT)
        })));
        assert_eq!(state.effects.particles.len(), 6);
        assert_eq!(state.effects.streaks.len(), 1);
    }

    #[test]
    fn test_collision_ends_run_and_freezes_score() {
        let mut state = started(6);
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), DT);
        }
        let score_before = state.score;
        let hitbox = state.player.hitbox();
        let mut obstacle = Obstacle::ground(0.0, hitbox.size.x, hitbox.size.y);
        // The obstacle will scroll by speed * dt before the check; pre-compensate
        obstacle.rect.pos.x = hitbox.pos.x + state.speed * DT;
        state.obstacles.insert(0, obstacle);

        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(state.game_over);
        assert!(matches!(events.last(), Some(GameEvent::GameOver { .. })));
        assert_eq!(state.score, score_before);
        assert!(state.effects.camera.is_shaking());

        for _ in 0..10 {
            tick(&mut state, &press(|i| i.jump_requested = true), DT);
        }
        assert_eq!(state.score, score_before);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_crash_shake_plays_out_after_game_over() {
        let mut state = started(12);
        state.game_over = true;
        state.effects.camera.shake(HIT_SHAKE.0, HIT_SHAKE.1);

        tick(&mut state, &TickInput::default(), DT);
        assert!(state.effects.camera.shake_timer < HIT_SHAKE.1);
        assert_ne!(state.effects.camera.shake_offset, glam::Vec2::ZERO);

        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!(!state.effects.camera.is_shaking());
        assert_eq!(state.effects.camera.shake_offset, glam::Vec2::ZERO);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.time, 0.0);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = started(7);
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), DT);
        }
        state.game_over = true;
        let best = state.best_score;

        let events = tick(&mut state, &press(|i| i.restart_requested = true), DT);
        assert_eq!(events, vec![GameEvent::Restarted]);
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.best_score, best);
        assert_eq!(state.speed, state.tuning.start_speed);
        assert!(state.obstacles.is_empty());
        assert!(state.effects.particles.is_empty());
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut state = started(8);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        let seed = state.seed;
        let events = tick(&mut state, &press(|i| i.restart_requested = true), DT);
        assert!(!events.contains(&GameEvent::Restarted));
        assert_eq!(state.seed, seed);
        assert!(state.score > 0.0);
    }

    #[test]
    fn test_offscreen_obstacles_removed() {
        let mut state = started(9);
        tick(&mut state, &TickInput::default(), DT);
        let step = state.speed * DT;
        let mut leaving = Obstacle::flyer(0.0, 10.0);
        leaving.rect.pos.x = -leaving.rect.size.x + step * 0.5;
        let mut staying = Obstacle::flyer(0.0, 10.0);
        staying.rect.pos.x = -staying.rect.size.x + step * 2.0;
        // Far tail keeps the spawner quiet
        let tail = Obstacle::ground(2_000.0, 22.0, 42.0);
        state.obstacles = vec![leaving, staying, tail];

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.obstacles.len(), 2);
        assert!(state.obstacles[0].is_flyer());
        assert!(state.obstacles[0].rect.right() >= 0.0);
    }

    #[test]
    fn test_obstacle_order_is_left_to_right() {
        let mut state = started(10);
        for _ in 0..600 {
            tick(&mut state, &press(|i| i.duck_held = true), DT);
            state.game_over = false;
            let xs: Vec<f32> = state.obstacles.iter().map(|o| o.rect.left()).collect();
            assert!(xs.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_clouds_stay_populated() {
        let mut state = started(11);
        for _ in 0..1200 {
            tick(&mut state, &TickInput::default(), DT);
            state.game_over = false;
        }
        assert!(!state.clouds.is_empty());
        assert!(state.clouds.iter().all(|c| c.pos.x + c.size.x > -20.0));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = started(99999);
        let mut state2 = started(99999);

        let inputs = [
            TickInput::default(),
            press(|i| {
                i.jump_requested = true;
                i.jump_held = true
            }),
            press(|i| i.jump_held = true),
            press(|i| i.duck_held = true),
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, DT);
                tick(&mut state2, input, DT);
            }
        }

        assert_eq!(state1.time, state2.time);
        assert_eq!(state1.obstacles, state2.obstacles);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.score, state2.score);
    }

    proptest! {
        #[test]
        fn prop_score_monotonic_and_best_never_drops(
            seed in any::<u64>(),
            frames in proptest::collection::vec(
                (
                    0.001f32..=MAX_FRAME_DT,
                    any::<bool>(),
                    any::<bool>(),
                    any::<bool>(),
                    any::<bool>(),
                ),
                1..600,
            )
        ) {
            let mut state = started(seed);
            let mut best = state.best_score;
            let mut score = state.score;
            for (dt, jump, duck, restart, held) in frames {
                let input = TickInput {
                    jump_requested: jump,
                    jump_held: held,
                    duck_held: duck,
                    restart_requested: restart,
                    ..Default::default()
                };
                let was_over = state.game_over;
                let events = tick(&mut state, &input, dt);
                if events.contains(&GameEvent::Restarted) {
                    prop_assert_eq!(state.score, 0.0);
                } else if was_over {
                    prop_assert_eq!(state.score, score);
                } else {
                    prop_assert!(state.score >= score);
                }
                prop_assert!(state.best_score >= best);
                prop_assert!(state.best_score >= state.score);
                prop_assert!(state.player.feet_y() <= GROUND_Y + 1e-3);
                score = state.score;
                best = state.best_score;
            }
        }
    }
}
