//! Save state - the high score record kept between runs.
//!
//! The file holds `{"version": 1, "high_score": n}`. Anything unreadable
//! (missing file, empty content, `null`, `{}`, malformed JSON) recovers to a
//! fresh record. Records stamped with any other version have their high score
//! divided by ten and are restamped with the current version. Opening a store always writes the file back, so a first run or a
//! damaged file is repaired immediately.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// Persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedState {
    pub version: u32,
    pub high_score: u64,
}

impl Default for SavedState {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            high_score: 0,
        }
    }
}

/// On-disk shape, tolerant of missing fields.
#[derive(Debug, Deserialize)]
struct RawState {
    version: Option<u32>,
    high_score: Option<u64>,
}

impl SavedState {
    /// Parse file contents, recovering to a default record.
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::default();
        }
        let raw = match serde_json::from_str::<Option<RawState>>(text) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("save state is not valid JSON, starting fresh: {}", e);
                return Self::default();
            }
        };
        let Some(high_score) = raw.high_score else {
            return Self::default();
        };

        let version = raw.version.unwrap_or(0);
        if version != SAVE_VERSION {
            info!(
                "migrating save state from version {} to {}",
                version, SAVE_VERSION
            );
            return Self {
                version: SAVE_VERSION,
                high_score: high_score / 10,
            };
        }
        Self {
            version: SAVE_VERSION,
            high_score,
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A save file plus its loaded record.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
    state: SavedState,
}

impl SaveStore {
    /// Load `path` and immediately write the normalized record back.
    ///
    /// Never fails; read and write problems are logged and play continues.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(text) => SavedState::parse(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => SavedState::default(),
            Err(e) => {
                warn!("failed to read save state {}: {}", path.display(), e);
                SavedState::default()
            }
        };

        let store = Self { path, state };
        if let Err(e) = store.save() {
            warn!("{}", e);
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> SavedState {
        self.state
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let json = self.state.to_json()?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Record `score` if it beats the high score. Returns whether it did.
    pub fn maybe_update_high_score(&mut self, score: u64) -> bool {
        if score <= self.state.high_score {
            return false;
        }
        self.state.high_score = score;
        if let Err(e) = self.save() {
            warn!("{}", e);
        }
        true
    }
}
