//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond arithmetic on
//! coordinates, making them usable in any context (core simulation, terminal
//! rendering, JSON snapshots).
//!
//! # Coordinates
//!
//! Boards use a y-up coordinate system:
//!
//! - **x**: column, `0` is the leftmost column
//! - **y**: row, `0` is the bottom row; gravity moves pieces toward `y = 0`
//!
//! Shape offsets use the same axes, relative to the piece anchor.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 10 | Columns of the visible play area |
//! | `DEFAULT_HEIGHT` | 20 | Rows of the visible play area |
//! | `DEFAULT_BLOCK_SIZES` | `[4]` | Cell counts of generated pieces |
//! | `DEFAULT_FALL_INTERVAL_SECS` | 1.0 | Seconds per row of gravity |
//! | `TICK_MS` | 16 | Frame interval of the terminal front-end (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use polyfall_types::{GameAction, Position, Rotation};
//!
//! // Positions order by x first, then y
//! assert!(Position::new(0, 5) < Position::new(1, 0));
//!
//! // Quarter turns clockwise with y pointing up
//! assert_eq!(Position::new(1, 0).rotated(1), Position::new(0, -1));
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(GameAction::from_str("land"), Some(GameAction::Land));
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_WIDTH: usize = 10;

/// Default board height in cells (visible rows, excluding headroom)
pub const DEFAULT_HEIGHT: usize = 20;

/// Default piece cell counts (tetrominoes)
pub const DEFAULT_BLOCK_SIZES: [usize; 1] = [4];

/// Default gravity interval in seconds per row
pub const DEFAULT_FALL_INTERVAL_SECS: f64 = 1.0;

/// Fixed frame interval for the terminal front-end in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Integer grid coordinate or shape offset.
///
/// Ordering is x primary, y secondary; sorted offset lists built from this
/// ordering are what make canonical shapes comparable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Rotate clockwise about the origin by `quarter_turns * 90°`
    ///
    /// Only the value modulo 4 matters.
    ///
    /// ```
    /// use polyfall_types::Position;
    ///
    /// let p = Position::new(2, 1);
    /// assert_eq!(p.rotated(0), p);
    /// assert_eq!(p.rotated(1), Position::new(1, -2));
    /// assert_eq!(p.rotated(2), Position::new(-2, -1));
    /// assert_eq!(p.rotated(3), Position::new(-1, 2));
    /// assert_eq!(p.rotated(4), p);
    /// ```
    pub const fn rotated(self, quarter_turns: u8) -> Self {
        let Position { x, y } = self;
        match quarter_turns % 4 {
            0 => Position { x, y },
            1 => Position { x: y, y: -x },
            2 => Position { x: -x, y: -y },
            _ => Position { x: -y, y: x },
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Index of a shape in the generated shape universe.
///
/// Pieces and locked cells refer to shapes by id, never by value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ShapeId(pub u32);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for ShapeId {
    fn from(index: usize) -> Self {
        ShapeId(index as u32)
    }
}

/// A cell on the game grid
///
/// - `None`: Vacant
/// - `Some(ShapeId)`: locked by a piece of the given shape
///
/// The shape id is flavour for rendering only; gameplay treats every
/// non-vacant cell the same.
pub type Cell = Option<ShapeId>;

/// Rotation states in quarter turns clockwise
///
/// - **North**: Spawn orientation (0°)
/// - **East**: 90° clockwise
/// - **South**: 180°
/// - **West**: 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use polyfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        self.rotate_by(1)
    }

    /// Rotate clockwise by `turns` quarter turns (mod 4)
    pub fn rotate_by(self, turns: u8) -> Self {
        Self::from_quarter_turns(self.quarter_turns().wrapping_add(turns % 4))
    }

    /// Number of clockwise quarter turns from North (0..=3)
    pub fn quarter_turns(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from a quarter-turn count; only the value modulo 4 matters
    pub fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Parse rotation from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "north" | "n", "east" | "e", "south" | "s", "west" | "w"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "north" | "n" => Some(Rotation::North),
            "east" | "e" => Some(Rotation::East),
            "south" | "s" => Some(Rotation::South),
            "west" | "w" => Some(Rotation::West),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Commands a presentation layer can issue against a board
///
/// Movement commands are buffered by the board and resolved on the next
/// `update`; `Reset` takes effect immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Shift piece one column left
    MoveLeft,
    /// Shift piece one column right
    MoveRight,
    /// Soft drop: one extra row down on the next update
    MoveDown,
    /// Hard drop: fall until the piece lands
    Land,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Clear the board and start over
    Reset,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use polyfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECW"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "land" => Some(GameAction::Land),
            "rotatecw" => Some(GameAction::RotateCw),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Land => "land",
            GameAction::RotateCw => "rotateCw",
            GameAction::Reset => "reset",
        }
    }
}
