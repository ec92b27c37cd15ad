//! Process configuration from environment variables and arguments.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const ROOT_VAR: &str = "SCROLLER_ROOT";
pub const SAVE_PATH_VAR: &str = "SCROLLER_SAVE_PATH";
pub const LOG_PATH_VAR: &str = "SCROLLER_LOG_PATH";
pub const SEED_VAR: &str = "SCROLLER_SEED";

const SAVE_FILE_NAME: &str = ".side-scroller";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollerConfig {
    /// Directory holding `levels.json` and the level files.
    pub root: PathBuf,
    pub save_path: PathBuf,
    /// Log file; logging is off when unset.
    pub log_path: Option<PathBuf>,
    pub seed: Option<u32>,
    pub start_level: u32,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            save_path: PathBuf::from(".").join(SAVE_FILE_NAME),
            log_path: None,
            seed: None,
            start_level: 1,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .and_then(|s| if s.is_empty() { None } else { Some(s) })
}

impl ScrollerConfig {
    /// Read `SCROLLER_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let root = non_empty(lookup(ROOT_VAR))
            .map(PathBuf::from)
            .unwrap_or(defaults.root);
        let save_path = non_empty(lookup(SAVE_PATH_VAR))
            .map(PathBuf::from)
            .or_else(|| non_empty(lookup("HOME")).map(|home| PathBuf::from(home).join(SAVE_FILE_NAME)))
            .unwrap_or(defaults.save_path);
        let log_path = non_empty(lookup(LOG_PATH_VAR)).map(PathBuf::from);
        let seed = non_empty(lookup(SEED_VAR)).and_then(|s| s.parse().ok());

        Self {
            root,
            save_path,
            log_path,
            seed,
            start_level: defaults.start_level,
        }
    }

    /// Take the starting level from the first CLI argument, when numeric.
    pub fn with_start_level_arg(mut self, arg: Option<&str>) -> Self {
        if let Some(level) = arg.and_then(|a| a.trim().parse::<u32>().ok()).filter(|&l| l >= 1) {
            self.start_level = level;
        }
        self
    }

    /// Configured seed, or one derived from the clock.
    pub fn seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
