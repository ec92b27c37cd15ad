//! Persistence and configuration for the side-scroller.
//!
//! - [`save`]: high score record with version migration
//! - [`catalog`]: level list for the selection menu
//! - [`config`]: `SCROLLER_*` environment configuration

use std::path::PathBuf;

use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod save;

pub use tui_scroller_types as types;

pub use catalog::{LevelCatalog, LevelEntry};
pub use config::ScrollerConfig;
pub use save::{SaveStore, SavedState, SAVE_VERSION};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
