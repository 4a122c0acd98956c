//! Frame driver
//!
//! A `Session` is what a host loop talks to: it clamps the real frame
//! delta, steps the run, and keeps the best-score store in sync. Storage
//! is best-effort; no persistence error ever reaches the caller.

use crate::consts::MAX_FRAME_DT;
use crate::persistence::{BestScoreStore, PersistenceError};
use crate::settings::Settings;
use crate::sim::{GameEvent, RunState, TickInput, tick};
use crate::snapshot::Snapshot;
use crate::tuning::Tuning;

/// Clamp a host-supplied delta into the range the simulation accepts
pub fn clamp_frame_dt(real_dt: f32) -> f32 {
    if real_dt.is_finite() {
        real_dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

pub struct Session<S: BestScoreStore = Box<dyn BestScoreStore>> {
    state: RunState,
    store: S,
    /// False once the store reported itself unavailable
    store_enabled: bool,
    /// Last value handed to the store
    saved_best: u64,
    pub settings: Settings,
}

impl<S: BestScoreStore> Session<S> {
    /// Load the previous best and create a run waiting for its first jump
    pub fn new(seed: u64, mut store: S, tuning: Tuning, settings: Settings) -> Self {
        let mut store_enabled = true;
        let best = match store.load_best() {
            Ok(best) => best,
            Err(e) => {
                log::warn!("Could not load best score, starting from 0: {}", e);
                if matches!(e, PersistenceError::Unavailable(_)) {
                    store_enabled = false;
                }
                0
            }
        };

        Self {
            state: RunState::new(seed, best as f64, tuning),
            store,
            store_enabled,
            saved_best: best,
            settings,
        }
    }

    /// Advance by one host frame
    pub fn frame(&mut self, real_dt: f32, input: &TickInput) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input, clamp_frame_dt(real_dt));

        if events.iter().any(|e| matches!(e, GameEvent::NewBest { .. })) {
            self.persist_best();
        }
        events
    }

    fn persist_best(&mut self) {
        let best = self.state.best_score.floor() as u64;
        if !self.store_enabled || best <= self.saved_best {
            return;
        }
        match self.store.save_best(best) {
            Ok(()) => self.saved_best = best,
            Err(PersistenceError::Unavailable(reason)) => {
                log::warn!("Best score storage unavailable, saves disabled: {}", reason);
                self.store_enabled = false;
            }
            Err(e) => log::warn!("Failed to save best score {}: {}", best, e),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.settings)
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    #[cfg(test)]
    fn store(&self) -> &S {
        &self.store
    }

    /// Best score most recently written to storage
    pub fn saved_best(&self) -> u64 {
        self.saved_best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT_60HZ as DT;
    use crate::persistence::{MemoryStore, UnavailableStore};
    use crate::sim::GamePhase;

    fn memory_session(seed: u64, store: MemoryStore) -> Session<MemoryStore> {
        Session::new(seed, store, Tuning::default(), Settings::default())
    }

    fn jump() -> TickInput {
        TickInput {
            jump_requested: true,
            ..Default::default()
        }
    }

    fn restart() -> TickInput {
        TickInput {
            restart_requested: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_clamp_frame_dt() {
        assert_eq!(clamp_frame_dt(0.5), MAX_FRAME_DT);
        assert_eq!(clamp_frame_dt(0.01), 0.01);
        assert_eq!(clamp_frame_dt(-1.0), 0.0);
        assert_eq!(clamp_frame_dt(f32::NAN), 0.0);
        assert_eq!(clamp_frame_dt(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut session = memory_session(1, MemoryStore::default());
        session.frame(DT, &jump());
        session.frame(2.0, &TickInput::default());
        assert!((session.state().time - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_loads_previous_best() {
        let session = memory_session(1, MemoryStore::with_best(250));
        assert_eq!(session.state().best_score, 250.0);
        assert_eq!(session.snapshot().best_text, "00250");
    }

    #[test]
    fn test_unavailable_store_starts_at_zero() {
        let mut session =
            Session::new(1, UnavailableStore, Tuning::default(), Settings::default());
        assert_eq!(session.state().best_score, 0.0);
        session.frame(DT, &jump());
        for _ in 0..120 {
            session.frame(DT, &TickInput::default());
        }
        assert!(session.state().best_score > 0.0);
        assert_eq!(session.saved_best(), 0);
    }

    #[test]
    fn test_saves_only_when_floored_best_advances() {
        let mut session = memory_session(1, MemoryStore::default());
        session.frame(DT, &jump());
        // One second at 10 points/s
        for _ in 0..60 {
            session.frame(DT, &TickInput::default());
        }
        let floored = session.state().best_score.floor() as u64;
        assert_eq!(session.store().best(), floored);
        assert_eq!(session.store().saves as u64, floored);
    }

    #[test]
    fn test_no_save_below_previous_best() {
        let mut session = memory_session(1, MemoryStore::with_best(500));
        session.frame(DT, &jump());
        for _ in 0..60 {
            session.frame(DT, &TickInput::default());
        }
        assert_eq!(session.store().saves, 0);
        assert_eq!(session.state().best_score, 500.0);
    }

    #[test]
    fn test_best_survives_restarts() {
        let mut session = memory_session(9, MemoryStore::default());
        session.frame(DT, &jump());
        let mut best = 0.0;
        let mut restarts = 0;
        for _ in 0..3_000 {
            let input = if session.state().phase() == GamePhase::GameOver {
                restarts += 1;
                restart()
            } else {
                TickInput::default()
            };
            session.frame(DT, &input);
            assert!(session.state().best_score >= best);
            best = session.state().best_score;
        }
        assert!(restarts > 0);
        assert_eq!(session.store().best(), best.floor() as u64);
    }

    #[test]
    fn test_boxed_store_session() {
        let store: Box<dyn BestScoreStore> = Box::new(MemoryStore::with_best(3));
        let session: Session = Session::new(1, store, Tuning::default(), Settings::default());
        assert_eq!(session.state().best_score, 3.0);
    }
}
