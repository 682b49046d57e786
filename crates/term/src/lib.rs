//! Terminal front-end rendering.
//!
//! A small, game-oriented rendering layer: [`BoardView`] turns a
//! [`core::BoardSnapshot`] into a [`FrameBuffer`], and [`TerminalRenderer`]
//! writes framebuffers to the terminal. Nothing here mutates a board.

pub mod fb;
pub mod renderer;
pub mod view;

pub use polyfall_core as core;
pub use polyfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{changed_rows, encode_changed_rows_into, TerminalRenderer};
pub use view::{shape_color, BoardView, Viewport};
