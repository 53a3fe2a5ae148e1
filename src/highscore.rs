//! High score persistence
//!
//! The core only ever stores a single scalar. Storage is an external
//! collaborator behind [`HighScoreStore`]; failures are reported but never
//! block gameplay.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Key-value style storage for the single high score value
pub trait HighScoreStore {
    /// Stored high score, `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<u64>, StorageError>;

    fn save(&mut self, score: u64) -> Result<(), StorageError>;

    /// Remove the stored value entirely
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-memory store (tests, embedding without persistence)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    /// Simulate an unreachable backend
    offline: bool,
    writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a value
    pub fn with_value(score: u64) -> Self {
        Self {
            value: Some(score),
            ..Self::default()
        }
    }

    /// Store whose every operation fails
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u64> {
        self.value
    }

    /// Number of successful saves and clears
    pub fn writes(&self) -> u32 {
        self.writes
    }

    fn check_online(&self) -> Result<(), StorageError> {
        if self.offline {
            Err(StorageError::Unavailable("memory store is offline".into()))
        } else {
            Ok(())
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u64>, StorageError> {
        self.check_online()?;
        Ok(self.value)
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        self.check_online()?;
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.check_online()?;
        self.value = None;
        self.writes += 1;
        Ok(())
    }
}

/// On-disk record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u64,
}

/// JSON file store: `{ "high_score": n }`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Default file name used by the demo driver
    pub const DEFAULT_FILE: &'static str = "lane_dodge_highscore.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<u64>, StorageError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        log::info!("Loaded high score {} from {}", record.high_score, self.path.display());
        Ok(Some(record.high_score))
    }

    fn save(&mut self, score: u64) -> Result<(), StorageError> {
        let json = serde_json::to_string(&HighScoreRecord { high_score: score })?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
