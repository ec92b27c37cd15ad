//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] during play
//! and into [`MenuInput`] on the level select screen. Nothing here touches
//! session state; the process loop decides what an action means.

pub mod map;

pub use tui_scroller_types as types;

pub use map::{handle_key_event, handle_menu_key, should_quit, MenuInput};
