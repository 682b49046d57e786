//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the whole simulation of a generalized falling-block
//! puzzle. It has **zero dependencies** on terminal, input or I/O code:
//!
//! - **Procedural pieces**: every connected shape of the requested cell counts
//!   is enumerated at construction, deduplicated up to rotation
//! - **Deterministic**: a seeded RNG picks pieces; same seed and inputs replay
//!   the same game
//! - **Frame-rate independent**: gravity accumulates elapsed seconds and can
//!   drop several rows in one update
//!
//! # Module Structure
//!
//! - [`shapes`]: canonical shapes and the backtracking [`ShapeGenerator`]
//! - [`grid`]: flat cell storage, full-row detection and compaction
//! - [`board`]: the [`Board`] state machine (commands, update, queries)
//! - [`config`]: [`BoardConfig`] and its validation
//! - [`rng`]: seeded uniform shape selection
//! - [`snapshot`]: serializable [`BoardSnapshot`] for presentation layers
//!
//! # Example
//!
//! ```
//! use polyfall_core::{Board, BoardConfig};
//!
//! let mut board = Board::new(BoardConfig::new(10, 20, vec![4])).unwrap();
//! assert_eq!(board.shapes().len(), 7);
//!
//! board.reset();
//! board.set_fall_interval(0.5);
//!
//! board.move_left();
//! board.rotate_clockwise();
//! board.update(0.016);
//!
//! board.land();
//! board.update(0.016);
//! assert!(!board.is_game_over());
//! assert_eq!(board.grid().occupied_count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`Board::update`] once per frame with the elapsed time in seconds.
//! After [`Board::reset`] gravity is disabled until
//! [`Board::set_fall_interval`] is called.

pub mod board;
pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use polyfall_types as types;

// Re-export commonly used types for convenience
pub use board::{ActivePiece, Board};
pub use config::BoardConfig;
pub use error::ConfigError;
pub use grid::Grid;
pub use rng::SimpleRng;
pub use shapes::{Shape, ShapeGenerator};
pub use snapshot::BoardSnapshot;
