//! Level text and file loading.

use std::fs;

use tempfile::TempDir;

use tui_scroller::core::level::{load_level_file, parse_level, LevelError};
use tui_scroller::core::{EntityKind, Session, SessionError, SimpleRng};
use tui_scroller::types::{GameStatus, Position};

fn positions(kinds: &[EntityKind], name: &str) -> Vec<Position> {
    kinds
        .iter()
        .filter(|k| k.name() == name)
        .map(|k| match k {
            EntityKind::Player(p) => p.body.position,
            EntityKind::Brick { at } => *at,
            EntityKind::Flag { at, .. } => *at,
            EntityKind::Tree { at } => *at,
            other => panic!("unexpected {:?}", other),
        })
        .collect()
}

#[test]
fn test_single_row_columns() {
    let kinds = parse_level("==P==\n", &mut SimpleRng::new(1));
    assert_eq!(
        positions(&kinds, "brick"),
        vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(0, 3),
            Position::new(0, 4)
        ]
    );
    assert_eq!(positions(&kinds, "player"), vec![Position::new(0, 2)]);
}

#[test]
fn test_last_line_is_ground() {
    let text = "   F\n T  \nP   \n====\n";
    let kinds = parse_level(text, &mut SimpleRng::new(1));
    assert_eq!(positions(&kinds, "flag"), vec![Position::new(3, 3)]);
    assert_eq!(positions(&kinds, "tree"), vec![Position::new(2, 1)]);
    assert_eq!(positions(&kinds, "player"), vec![Position::new(1, 0)]);
    assert_eq!(positions(&kinds, "brick").len(), 4);
}

#[test]
fn test_unknown_glyphs_skipped() {
    let kinds = parse_level("?x P #\n", &mut SimpleRng::new(1));
    assert_eq!(kinds.len(), 1);
    assert_eq!(positions(&kinds, "player"), vec![Position::new(0, 3)]);
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("level1.txt");
    fs::write(&path, "P F\n===\n").unwrap();

    let kinds = load_level_file(&path, &mut SimpleRng::new(1)).unwrap();
    assert_eq!(kinds.len(), 5);

    let session = Session::load(1, &path, 9).unwrap();
    assert_eq!(session.status(), GameStatus::Running);
    assert_eq!(session.player().unwrap().position(), Position::new(1, 0));
}

#[test]
fn test_missing_file_names_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("level4.txt");
    let err = load_level_file(&path, &mut SimpleRng::new(1)).unwrap_err();
    let LevelError::Io { path: reported, .. } = &err;
    assert_eq!(reported, &path);
    assert!(err.to_string().contains("level4.txt"));

    let err = Session::load(4, &path, 1).unwrap_err();
    assert!(matches!(err, SessionError::Level(_)));
}
