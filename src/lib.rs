//! TUI side-scroller (workspace facade crate).
//!
//! Exposes `tui_scroller::{core,input,store,term,types}` so the binary, the
//! integration tests and the benches share one import path while the
//! implementation lives in dedicated crates under `crates/`.

pub use tui_scroller_core as core;
pub use tui_scroller_input as input;
pub use tui_scroller_store as store;
pub use tui_scroller_term as term;
pub use tui_scroller_types as types;
