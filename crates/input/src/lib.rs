//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. Board
//! commands coalesce until the next update, so the front-end forwards every
//! key press directly; no auto-repeat handling is needed here.

pub mod map;

pub use polyfall_types as types;

pub use map::{handle_key_event, should_quit};
