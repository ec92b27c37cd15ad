//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (physics, level loading, terminal rendering).
//!
//! # Coordinates
//!
//! Game space is an integer grid addressed as `(row, col)`:
//!
//! - **Row 0** is the ground line; rows increase *upward*
//! - **Column 0** is the left edge of the level; columns increase to the right
//! - Negative rows exist (things can fall below the ground line)
//!
//! The terminal renderer inverts rows when mapping onto the screen.
//!
//! # Velocity Limits
//!
//! | Axis | Cap |
//! |------|-----|
//! | vertical (`dy`) | ±4 cells per tick |
//! | horizontal (`dx`) | ±2 cells per tick |
//!
//! # Tick Timing
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 100 | Tick interval with no score and no boost |
//! | `SCORE_TICK_STEP_US` | 5000 | Interval shortened per point of score (µs) |
//! | `MIN_TICK_MS` | 20 | Fastest allowed tick interval |
//! | `MAX_TICK_MS` | 500 | Slowest allowed tick interval |
//!
//! # Examples
//!
//! ```
//! use tui_scroller_types::{GameAction, Position, Velocity};
//!
//! let pos = Position::new(0, 5);
//! assert_eq!(pos.step(Velocity::new(1, 0)), Position::new(1, 5));
//!
//! let v = Velocity::new(9, -9).clamped();
//! assert_eq!(v, Velocity::new(4, -2));
//!
//! assert_eq!(GameAction::from_str("jump"), Some(GameAction::Jump));
//! ```

use std::fmt;

/// Maximum vertical speed in cells per tick.
pub const MAX_VERTICAL_SPEED: i32 = 4;

/// Maximum horizontal speed in cells per tick.
pub const MAX_HORIZONTAL_SPEED: i32 = 2;

/// Base tick interval (no score, no boost).
pub const BASE_TICK_MS: u64 = 100;

/// Tick interval reduction per point of score, in microseconds.
pub const SCORE_TICK_STEP_US: i64 = 5_000;

/// Fastest tick interval.
pub const MIN_TICK_MS: u64 = 20;

/// Slowest tick interval.
pub const MAX_TICK_MS: u64 = 500;

/// Speed boost adjustment range (`f`/`s` keys).
pub const SPEED_BOOST_LIMIT: i32 = 5;

/// Rows kept between the player and the bottom of a panning camera.
pub const CAMERA_BOTTOM_MARGIN: i32 = 10;

/// Height of the status area drawn above the playfield.
pub const STATUS_AREA_HEIGHT: u16 = 5;

/// Movables whose lowest cell drops below this row leave the game.
pub const FALL_OUT_ROW: i32 = -20;

/// Last level of the campaign.
pub const FINAL_LEVEL: u32 = 9;

/// Speed boost pickup lifetime in ticks.
pub const SPEED_BOOST_TICKS: u32 = 300;

/// Lifetime of a fireball fired by the player.
pub const SHOT_LIFETIME: u32 = 20;

/// Lifetime of a fireball thrown by a fireline.
pub const FIRELINE_SHOT_LIFETIME: u32 = 10;

/// Ticks between cannon shots.
pub const CANNON_PERIOD: u32 = 10;

/// Creatures reverse direction once this many ticks have passed.
pub const REVERSAL_TICKS: u32 = 10;

/// A cell in game space.
///
/// Ordering is row-major (bottom row first), which gives deterministic
/// iteration when positions are used as map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Offset by a raw `(dy, dx)` pair.
    pub const fn offset(self, dy: i32, dx: i32) -> Self {
        Self {
            row: self.row + dy,
            col: self.col + dx,
        }
    }

    /// Position after moving by `v` in one go.
    pub const fn step(self, v: Velocity) -> Self {
        self.offset(v.dy, v.dx)
    }

    /// The cell directly below.
    pub const fn below(self) -> Self {
        self.offset(-1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Per-tick displacement in cells.
///
/// `dy > 0` moves up, `dx > 0` moves right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Velocity {
    pub dy: i32,
    pub dx: i32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dy: 0, dx: 0 };

    pub const fn new(dy: i32, dx: i32) -> Self {
        Self { dy, dx }
    }

    pub const fn is_zero(&self) -> bool {
        self.dy == 0 && self.dx == 0
    }

    /// Unit step toward the velocity on each axis.
    pub fn signum(&self) -> Self {
        Self {
            dy: self.dy.signum(),
            dx: self.dx.signum(),
        }
    }

    /// Clamp each axis to its speed cap.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_scroller_types::Velocity;
    ///
    /// assert_eq!(Velocity::new(5, 0).clamped(), Velocity::new(4, 0));
    /// assert_eq!(Velocity::new(0, -3).clamped(), Velocity::new(0, -2));
    /// ```
    pub fn clamped(self) -> Self {
        Self {
            dy: self.dy.clamp(-MAX_VERTICAL_SPEED, MAX_VERTICAL_SPEED),
            dx: self.dx.clamp(-MAX_HORIZONTAL_SPEED, MAX_HORIZONTAL_SPEED),
        }
    }
}

impl std::ops::Sub for Velocity {
    type Output = Velocity;

    fn sub(self, rhs: Velocity) -> Velocity {
        Velocity::new(self.dy - rhs.dy, self.dx - rhs.dx)
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.dy, self.dx)
    }
}

/// Commands the process loop can deliver to a session.
///
/// Movement actions only apply while the session is running. Level-flow
/// actions (`Restart`, `NextLevel`, `SelectLevel`, `LevelMenu`) are
/// interpreted by the process loop once a session has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Add upward velocity
    Jump,
    /// Accelerate left
    Left,
    /// Accelerate right
    Right,
    /// Accelerate downward
    Down,
    /// Trigger every held item
    Fire,
    /// Toggle pause; also continues to the next level once won
    Pause,
    /// Shorten the tick interval
    SpeedUp,
    /// Lengthen the tick interval
    SlowDown,
    /// Replay the current level
    Restart,
    /// Open the level selection menu
    LevelMenu,
    /// Jump straight to a level (1-9)
    SelectLevel(u8),
    /// Leave the game
    Quit,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_scroller_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("left"), Some(GameAction::Left));
    /// assert_eq!(GameAction::from_str("speedUp"), Some(GameAction::SpeedUp));
    /// assert_eq!(GameAction::from_str("level2"), Some(GameAction::SelectLevel(2)));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        if let Some(digits) = lower.strip_prefix("level") {
            return match digits.parse::<u8>() {
                Ok(n @ 1..=9) => Some(GameAction::SelectLevel(n)),
                _ => None,
            };
        }
        match lower.as_str() {
            "jump" => Some(GameAction::Jump),
            "left" => Some(GameAction::Left),
            "right" => Some(GameAction::Right),
            "down" => Some(GameAction::Down),
            "fire" => Some(GameAction::Fire),
            "pause" => Some(GameAction::Pause),
            "speedup" => Some(GameAction::SpeedUp),
            "slowdown" => Some(GameAction::SlowDown),
            "restart" => Some(GameAction::Restart),
            "levelmenu" => Some(GameAction::LevelMenu),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Jump => "jump",
            GameAction::Left => "left",
            GameAction::Right => "right",
            GameAction::Down => "down",
            GameAction::Fire => "fire",
            GameAction::Pause => "pause",
            GameAction::SpeedUp => "speedUp",
            GameAction::SlowDown => "slowDown",
            GameAction::Restart => "restart",
            GameAction::LevelMenu => "levelMenu",
            GameAction::SelectLevel(_) => "selectLevel",
            GameAction::Quit => "quit",
        }
    }
}

/// Session lifecycle.
///
/// ```text
/// Running <-> Paused
/// WaitingForNextLevel -> Running
/// Running -> Won | Lost      (terminal)
/// any non-terminal -> Quit   (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Running,
    Paused,
    WaitingForNextLevel,
    Won,
    Lost,
    Quit,
}

impl GameStatus {
    /// Won, lost and quit sessions never run again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost | GameStatus::Quit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::WaitingForNextLevel => "waiting",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            GameStatus::Quit => "quit",
        }
    }
}

/// Rendering class of a glyph, used by views to pick colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tint {
    #[default]
    Plain,
    Player,
    Terrain,
    Hazard,
    Fire,
    Pickup,
    Goal,
    Projectile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_bounds_are_ordered() {
        assert!(MIN_TICK_MS < BASE_TICK_MS);
        assert!(BASE_TICK_MS < MAX_TICK_MS);
        assert_eq!(MAX_VERTICAL_SPEED, 4);
        assert_eq!(MAX_HORIZONTAL_SPEED, 2);
    }

    #[test]
    fn velocity_clamps_each_axis_independently() {
        assert_eq!(Velocity::new(7, 1).clamped(), Velocity::new(4, 1));
        assert_eq!(Velocity::new(-1, -3).clamped(), Velocity::new(-1, -2));
        assert_eq!(Velocity::new(-6, 6).clamped(), Velocity::new(-4, 2));
    }

    #[test]
    fn status_terminality() {
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
        assert!(GameStatus::Quit.is_terminal());
        assert!(!GameStatus::Paused.is_terminal());
        assert!(!GameStatus::WaitingForNextLevel.is_terminal());
    }

    #[test]
    fn select_level_parses_digits() {
        assert_eq!(GameAction::from_str("level3"), Some(GameAction::SelectLevel(3)));
        assert_eq!(GameAction::from_str("level0"), None);
        assert_eq!(GameAction::SelectLevel(7).as_str(), "selectLevel");
    }
}
