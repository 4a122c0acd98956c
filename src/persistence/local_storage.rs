use super::{BestScoreStore, PersistenceError};

/// Best score kept in browser LocalStorage as an integer string
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub const STORAGE_KEY: &'static str = "dash_runner_best";

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Unavailable("LocalStorage disabled".into()))
    }
}

impl BestScoreStore for LocalStorageStore {
    fn load_best(&mut self) -> Result<u64, PersistenceError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(Self::STORAGE_KEY)
            .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))?;
        let Some(raw) = raw else {
            log::info!("No best score found, starting fresh");
            return Ok(0);
        };
        // Stored as a bare integer, which is also valid JSON
        let best = serde_json::from_str::<f64>(raw.trim())?;
        Ok(if best.is_finite() && best > 0.0 {
            best.floor() as u64
        } else {
            0
        })
    }

    fn save_best(&mut self, best: u64) -> Result<(), PersistenceError> {
        Self::storage()?
            .set_item(Self::STORAGE_KEY, &best.to_string())
            .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))?;
        log::info!("Best score saved ({})", best);
        Ok(())
    }
}
