//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: views draw into a framebuffer
//! that is diffed and flushed to the terminal. No widget toolkit is involved.
//!
//! - [`camera`]: which part of game space is on screen
//! - [`game_view`]: status area plus playfield, and the level select menu
//! - [`renderer`]: crossterm backend

pub mod camera;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_scroller_core as core;
pub use tui_scroller_types as types;

pub use camera::Camera;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, MenuItem, MenuView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
