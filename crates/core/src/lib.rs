//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the side-scroller's rules: the entity model, the
//! collision index, physics, level loading, and the session state machine.
//! It has **no dependencies** on the terminal or the filesystem layout, making it:
//!
//! - **Deterministic**: The same seed and inputs replay the same level
//! - **Testable**: Levels can be built from inline text
//! - **Portable**: Entities draw into a [`SceneBuffer`], not a terminal
//!
//! # Module Structure
//!
//! - [`entity`]: Tagged-variant entities with capability predicates
//! - [`item`]: Inventory items (speed boost, fireball shooter)
//! - [`world`]: Ordered entity list and the `items_at` collision index
//! - [`physics`]: Sub-stepped movement, collision response, gravity
//! - [`level`]: Text grid level loader
//! - [`session`]: Per-level game state machine and tick loop
//! - [`scene`]: Game-space glyph buffer entities render into
//! - [`debug_log`]: Session-owned status-line log
//! - [`rng`]: Deterministic LCG for animation phases and creature choices
//!
//! # Example
//!
//! ```
//! use tui_scroller_core::{Session, TickOutcome};
//! use tui_scroller_types::{GameAction, GameStatus};
//!
//! let mut session = Session::from_level_text(1, "PF\n==\n", 42).unwrap();
//! session.apply_action(GameAction::Right);
//!
//! assert_eq!(session.tick(), TickOutcome::Won);
//! assert_eq!(session.status(), GameStatus::Won);
//! ```
//!
//! # Timing
//!
//! The core has no clock. The caller ticks a session every
//! [`Session::tick_interval`], which shortens as the score grows and with
//! the player's speed-boost adjustment.

pub mod debug_log;
pub mod entity;
pub mod item;
pub mod level;
pub mod physics;
pub mod rng;
pub mod scene;
pub mod session;
pub mod world;

pub use tui_scroller_types as types;

// Re-export commonly used types for convenience
pub use debug_log::DebugLog;
pub use entity::{Body, Entity, EntityId, EntityKind, Footprint, GameEvent, Player, TickContext};
pub use item::{InventoryItem, ItemKind};
pub use level::{load_level_file, parse_level, LevelError};
pub use rng::SimpleRng;
pub use scene::{SceneBuffer, SceneCell};
pub use session::{FollowUp, Session, SessionError, TickOutcome};
pub use world::World;
