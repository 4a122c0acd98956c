//! Best-score persistence
//!
//! The simulation never touches storage. A `Session` owns one
//! `BestScoreStore` and treats every failure as non-fatal: a failed load
//! means best = 0, a failed save is logged and skipped.
//!
//! Backends:
//! - `MemoryStore`: in-process, for tests and as a fallback
//! - `UnavailableStore`: always fails, models disabled storage
//! - `JsonFileStore` (native): `{ "best": <u64> }` in a file
//! - `LocalStorageStore` (wasm32): integer string under `dash_runner_best`

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use thiserror::Error;

/// Storage failures
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored best score is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Load/save of the all-time best score (floored integer)
pub trait BestScoreStore {
    /// Previously saved best, 0 when nothing was saved yet
    fn load_best(&mut self) -> Result<u64, PersistenceError>;
    fn save_best(&mut self, best: u64) -> Result<(), PersistenceError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: u64,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryStore {
    pub fn with_best(best: u64) -> Self {
        Self { best, saves: 0 }
    }

    pub fn best(&self) -> u64 {
        self.best
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best(&mut self) -> Result<u64, PersistenceError> {
        Ok(self.best)
    }

    fn save_best(&mut self, best: u64) -> Result<(), PersistenceError> {
        self.best = best;
        self.saves += 1;
        Ok(())
    }
}

/// Store whose backing medium is missing (private browsing, read-only disk)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl BestScoreStore for UnavailableStore {
    fn load_best(&mut self) -> Result<u64, PersistenceError> {
        Err(PersistenceError::Unavailable("no storage backend".into()))
    }

    fn save_best(&mut self, _best: u64) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("no storage backend".into()))
    }
}

/// Boxed stores forward to their contents
impl<S: BestScoreStore + ?Sized> BestScoreStore for Box<S> {
    fn load_best(&mut self) -> Result<u64, PersistenceError> {
        (**self).load_best()
    }

    fn save_best(&mut self, best: u64) -> Result<(), PersistenceError> {
        (**self).save_best(best)
    }
}
