use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{BestScoreStore, PersistenceError};

#[derive(Debug, Serialize, Deserialize)]
struct BestRecord {
    best: u64,
}

/// Best score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreStore for JsonFileStore {
    fn load_best(&mut self) -> Result<u64, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let record: BestRecord = serde_json::from_str(&json)?;
        log::info!("Loaded best score {} from {}", record.best, self.path.display());
        Ok(record.best)
    }

    fn save_best(&mut self, best: u64) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&BestRecord { best })?;
        // Write then rename so a crash never leaves a truncated file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Best score {} saved to {}", best, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dash-runner-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_missing_file_is_zero() {
        let mut store = JsonFileStore::new(scratch("missing.json"));
        assert_eq!(store.load_best().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("best.json");
        let mut store = JsonFileStore::new(&path);
        store.save_best(1234).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"best":1234}"#);

        let mut reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load_best().unwrap(), 1234);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = scratch("corrupt.json");
        fs::write(&path, "{ best: oops").unwrap();
        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.load_best(), Err(PersistenceError::Json(_))));
    }
}
