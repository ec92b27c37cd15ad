//! Level loader - turns a text grid into entities.
//!
//! The last line of the file is game row 0; each earlier line is one row
//! higher. Columns are character offsets within the line. Unknown glyphs
//! (including spaces) are skipped.
//!
//! | Glyph | Entity |
//! |-------|--------|
//! | `=` | brick |
//! | `+` | breakable brick |
//! | `P` | player |
//! | `E` | speed boost pickup |
//! | `W` | fireball shooter pickup |
//! | `b` | walker |
//! | `B` | bird |
//! | `T` | tree |
//! | `F` | win flag |
//! | `/` `\` | cannon aiming up-right / up-left |
//! | `🔥` | fire |
//! | `L` | fireline |

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::entity::EntityKind;
use crate::item::ItemKind;
use crate::rng::SimpleRng;
use crate::types::{Position, Velocity};

/// Highest random starting phase for fire.
const FIRE_MAX_START_PHASE: u32 = 10;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Map one glyph to an entity, drawing randomness from `rng` where needed.
pub fn entity_for_glyph(glyph: char, at: Position, rng: &mut SimpleRng) -> Option<EntityKind> {
    let kind = match glyph {
        '=' => EntityKind::brick(at),
        '+' => EntityKind::breakable_brick(at),
        'P' => EntityKind::player(at),
        'E' => EntityKind::pickup(at, ItemKind::SpeedBoost),
        'W' => EntityKind::pickup(at, ItemKind::FireballShooter),
        'b' => EntityKind::walker(at),
        'B' => EntityKind::bird(at),
        'T' => EntityKind::tree(at),
        'F' => EntityKind::flag(at),
        '/' => EntityKind::cannon(at, glyph, Velocity::new(1, 1)),
        '\\' => EntityKind::cannon(at, glyph, Velocity::new(1, -1)),
        '🔥' => EntityKind::fire(at, rng.next_inclusive(0, FIRE_MAX_START_PHASE) as u8),
        'L' => EntityKind::fireline(at),
        _ => return None,
    };
    Some(kind)
}

/// Parse level text into entities, in reading order.
///
/// # Example
///
/// ```
/// use tui_scroller_core::level::parse_level;
/// use tui_scroller_core::SimpleRng;
///
/// let kinds = parse_level("==P==\n", &mut SimpleRng::new(1));
/// assert_eq!(kinds.len(), 5);
/// ```
pub fn parse_level(text: &str, rng: &mut SimpleRng) -> Vec<EntityKind> {
    let lines: Vec<&str> = text.lines().collect();
    let total = lines.len() as i32;
    let mut kinds = Vec::new();

    for (line_index, line) in lines.iter().enumerate() {
        let row = total - line_index as i32 - 1;
        for (col, glyph) in line.chars().enumerate() {
            if let Some(kind) = entity_for_glyph(glyph, Position::new(row, col as i32), rng) {
                kinds.push(kind);
            }
        }
    }

    debug!("parsed level: {} rows, {} entities", total, kinds.len());
    kinds
}

/// Read and parse a level file.
pub fn load_level_file(path: &Path, rng: &mut SimpleRng) -> Result<Vec<EntityKind>, LevelError> {
    let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_level(&text, rng))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<EntityKind> {
        parse_level(text, &mut SimpleRng::new(1))
    }

    #[test]
    fn test_single_row_columns() {
        let kinds = parse("==P==\n");
        assert_eq!(
            kinds,
            vec![
                EntityKind::brick(Position::new(0, 0)),
                EntityKind::brick(Position::new(0, 1)),
                EntityKind::player(Position::new(0, 2)),
                EntityKind::brick(Position::new(0, 3)),
                EntityKind::brick(Position::new(0, 4)),
            ]
        );
    }

    #[test]
    fn test_last_line_is_ground() {
        let kinds = parse("  F\n P \n===\n");
        assert_eq!(kinds[0], EntityKind::flag(Position::new(2, 2)));
        assert_eq!(kinds[1], EntityKind::player(Position::new(1, 1)));
        assert_eq!(kinds[2], EntityKind::brick(Position::new(0, 0)));
    }

    #[test]
    fn test_unknown_glyphs_skipped() {
        assert!(parse("xyz ?!\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_all_glyphs() {
        let kinds = parse("+EWbBT/\\L");
        let names: Vec<_> = kinds.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            vec![
                "breakable brick",
                "pickup",
                "pickup",
                "walker",
                "bird",
                "tree",
                "cannon",
                "cannon",
                "fireline"
            ]
        );
        assert_eq!(
            kinds[7],
            EntityKind::cannon(Position::new(0, 7), '\\', Velocity::new(1, -1))
        );
    }

    #[test]
    fn test_fire_columns_count_characters() {
        let kinds = parse("🔥=");
        assert_eq!(kinds.len(), 2);
        match &kinds[0] {
            EntityKind::Fire { at, phase, .. } => {
                assert_eq!(*at, Position::new(0, 0));
                assert!(*phase <= 10);
            }
            other => panic!("expected fire, got {:?}", other),
        }
        assert_eq!(kinds[1], EntityKind::brick(Position::new(0, 1)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_level_file(Path::new("/nonexistent/level.txt"), &mut SimpleRng::new(1))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/level.txt"));
    }
}
