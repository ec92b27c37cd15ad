//! Save file and level catalog on a real filesystem.

use std::fs;

use proptest::prelude::*;
use tempfile::TempDir;

use tui_scroller::store::catalog::{CATALOG_FILE, LEVEL_DIR};
use tui_scroller::store::{LevelCatalog, SaveStore, SavedState, SAVE_VERSION};

fn read_saved(path: &std::path::Path) -> SavedState {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_open_creates_save_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".side-scroller");
    let store = SaveStore::open(&path);
    assert_eq!(store.high_score(), 0);
    assert_eq!(read_saved(&path), SavedState::default());
}

#[test]
fn test_high_score_only_rises() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("save.json");

    let mut store = SaveStore::open(&path);
    assert!(store.maybe_update_high_score(12));
    assert!(!store.maybe_update_high_score(7));
    assert_eq!(SaveStore::open(&path).high_score(), 12);
}

#[test]
fn test_high_score_boundaries_survive_reopen() {
    for score in [0, 1, 9, 10, u64::from(u32::MAX), u64::MAX - 1, u64::MAX] {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        let mut store = SaveStore::open(&path);
        store.maybe_update_high_score(score);
        assert_eq!(SaveStore::open(&path).high_score(), score, "score {}", score);
    }
}

proptest! {
    #[test]
    fn prop_high_score_round_trips(score in any::<u64>()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        let mut store = SaveStore::open(&path);
        store.maybe_update_high_score(score);

        let reopened = SaveStore::open(&path);
        prop_assert_eq!(reopened.high_score(), score);
        prop_assert_eq!(reopened.state().version, SAVE_VERSION);
    }
}

#[test]
fn test_old_version_is_migrated_on_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("save.json");
    fs::write(&path, r#"{"version": 0, "high_score": 250}"#).unwrap();

    let store = SaveStore::open(&path);
    assert_eq!(store.high_score(), 25);

    // Migration is written back, so it only happens once.
    assert_eq!(read_saved(&path).version, SAVE_VERSION);
    assert_eq!(SaveStore::open(&path).high_score(), 25);
}

#[test]
fn test_newer_version_is_migrated_on_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("save.json");
    fs::write(&path, r#"{"version": 2, "high_score": 50}"#).unwrap();

    assert_eq!(SaveStore::open(&path).high_score(), 5);
    assert_eq!(
        read_saved(&path),
        SavedState {
            version: SAVE_VERSION,
            high_score: 5,
        }
    );
}

#[test]
fn test_corrupt_save_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("save.json");
    fs::write(&path, "{{{ not json").unwrap();
    assert_eq!(SaveStore::open(&path).high_score(), 0);
}

#[test]
fn test_catalog_from_root() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(CATALOG_FILE),
        r#"[{"id": 1, "description": "Intro", "path": "intro.txt"}]"#,
    )
    .unwrap();

    let catalog = LevelCatalog::load(root.path()).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.find(1).unwrap().description, "Intro");
    assert_eq!(
        catalog.path_for(1),
        root.path().join(LEVEL_DIR).join("intro.txt")
    );
}

#[test]
fn test_catalog_discovers_level_files() {
    let root = TempDir::new().unwrap();
    let levels = root.path().join(LEVEL_DIR);
    fs::create_dir_all(&levels).unwrap();
    fs::write(levels.join("level1.txt"), "P\n=\n").unwrap();
    fs::write(levels.join("level3.txt"), "P\n=\n").unwrap();
    fs::write(levels.join("notes.txt"), "").unwrap();

    let catalog = LevelCatalog::load(root.path()).unwrap();
    let ids: Vec<u32> = catalog.entries().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(catalog.entries()[1].description, "Level 3");
}

#[test]
fn test_broken_catalog_is_an_error() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(CATALOG_FILE), "[{").unwrap();
    assert!(LevelCatalog::load(root.path()).is_err());
}
