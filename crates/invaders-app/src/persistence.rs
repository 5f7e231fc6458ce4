//! JSON file high-score store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use invaders_sim::collaborators::{HighScoreStore, PersistenceError};

/// On-disk record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// Keeps the best score in a small JSON file. A missing file means no
/// record yet.
#[derive(Debug, Clone)]
pub struct JsonHighScoreStore {
    path: PathBuf,
}

impl JsonHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonHighScoreStore {
    fn load_high_score(&mut self) -> Result<Option<u64>, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)
            .map_err(|e| PersistenceError::Format(e.to_string()))?;
        Ok(Some(record.high_score))
    }

    fn save_high_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score: score })
            .map_err(|e| PersistenceError::Format(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
