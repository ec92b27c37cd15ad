//! Level catalog - the list shown by the level select menu.
//!
//! Read from `<root>/levels.json`:
//!
//! ```json
//! [{"id": 1, "description": "First steps", "path": "level1.txt"}]
//! ```
//!
//! Paths are relative to `<root>/side-scroller-levels/`. Without a
//! `levels.json`, any `level1.txt`..`level9.txt` found there are listed.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;

use crate::types::FINAL_LEVEL;
use crate::StoreError;

pub const CATALOG_FILE: &str = "levels.json";
pub const LEVEL_DIR: &str = "side-scroller-levels";

#[derive(Debug, Deserialize)]
struct RawEntry {
    id: u32,
    description: String,
    path: String,
}

/// One selectable level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelEntry {
    pub id: u32,
    pub description: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    level_dir: PathBuf,
    entries: Vec<LevelEntry>,
}

/// Conventional file name for a level number.
pub fn level_file_name(id: u32) -> String {
    format!("level{}.txt", id)
}

impl LevelCatalog {
    /// Load the catalog under `root`, falling back to discovery.
    pub fn load(root: &Path) -> Result<Self, StoreError> {
        let level_dir = root.join(LEVEL_DIR);
        let catalog_path = root.join(CATALOG_FILE);
        if !catalog_path.exists() {
            info!(
                "{} not found, scanning {}",
                catalog_path.display(),
                level_dir.display()
            );
            return Ok(Self::discover(&level_dir));
        }

        let text = fs::read_to_string(&catalog_path).map_err(|source| StoreError::Io {
            path: catalog_path.clone(),
            source,
        })?;
        Self::from_json(&text, &level_dir)
    }

    pub fn from_json(text: &str, level_dir: &Path) -> Result<Self, StoreError> {
        let raw: Vec<RawEntry> = serde_json::from_str(text)?;
        let entries = raw
            .into_iter()
            .map(|e| LevelEntry {
                id: e.id,
                description: e.description,
                path: level_dir.join(e.path),
            })
            .collect::<Vec<_>>();
        debug!("catalog lists {} levels", entries.len());
        Ok(Self {
            level_dir: level_dir.to_path_buf(),
            entries,
        })
    }

    /// List the conventionally named level files that exist in `level_dir`.
    pub fn discover(level_dir: &Path) -> Self {
        let entries = (1..=FINAL_LEVEL)
            .map(|id| (id, level_dir.join(level_file_name(id))))
            .filter(|(_, path)| path.is_file())
            .map(|(id, path)| LevelEntry {
                id,
                description: format!("Level {}", id),
                path,
            })
            .collect();
        Self {
            level_dir: level_dir.to_path_buf(),
            entries,
        }
    }

    pub fn entries(&self) -> &[LevelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: u32) -> Option<&LevelEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// File for level `id`: the catalog's entry, or the conventional name.
    pub fn path_for(&self, id: u32) -> PathBuf {
        match self.find(id) {
            Some(entry) => entry.path.clone(),
            None => self.level_dir.join(level_file_name(id)),
        }
    }
}
