//! Board module - falling-piece state machine
//!
//! The board owns the grid and the active piece. Commands never act
//! immediately: they only record pending deltas, which the next
//! [`Board::update`] resolves in a fixed order:
//!
//! 1. forget the rows erased by the previous update
//! 2. bail out if the game is over
//! 3. apply horizontal shift and rotation together, reverting both on overlap
//! 4. advance the fall timer and derive whole rows of gravity
//! 5. step down one row at a time (gravity plus soft/hard drop); the first
//!    blocked step lands the piece
//! 6. on landing: lock, clear full rows, spawn the next piece or end the game
//! 7. drop the pending deltas and wrap the anchor when `loop_x` is set
//!
//! A piece's life is `Spawned -> Falling -> Landed -> Spawned`, or
//! `-> GameOver` when the next piece cannot be placed. Game over is absorbing
//! until [`Board::reset`].

use serde::Serialize;

use crate::config::BoardConfig;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::shapes::{Shape, ShapeGenerator};
use crate::types::{GameAction, Position, Rotation, ShapeId};

/// The piece currently under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActivePiece {
    pub shape_id: ShapeId,
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
}

impl ActivePiece {
    /// A freshly spawned piece in its canonical orientation
    pub fn new(shape_id: ShapeId, anchor: Position) -> Self {
        Self {
            shape_id,
            x: anchor.x,
            y: anchor.y,
            rotation: Rotation::North,
        }
    }

    pub fn anchor(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Deltas buffered by commands until the next update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PendingInput {
    dx: i32,
    dy: u32,
    d_rotation: u8,
}

/// Absolute cells of `piece`, x wrapped into `[0, w)` when `wrap_width` is set
fn transformed(
    shape: &Shape,
    piece: ActivePiece,
    wrap_width: Option<i32>,
) -> impl Iterator<Item = Position> + '_ {
    shape.rotated(piece.rotation).map(move |offset| {
        let x = piece.x + offset.x;
        let x = match wrap_width {
            Some(w) => x.rem_euclid(w),
            None => x,
        };
        Position::new(x, piece.y + offset.y)
    })
}

/// Grid, active piece and timing of one game
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    shapes: Vec<Shape>,
    grid: Grid,
    active: Option<ActivePiece>,
    pending: PendingInput,
    /// Seconds per row of gravity; infinite disables gravity
    fall_interval: f64,
    fall_timer: f64,
    erased_rows: Vec<usize>,
    rng: SimpleRng,
    game_over: bool,
    pieces_spawned: u32,
    rows_cleared: u32,
}

impl Board {
    /// Validate `config`, generate the shape universe and allocate the grid
    ///
    /// The board starts without an active piece; call [`Board::reset`] to
    /// spawn the first one.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let shapes = ShapeGenerator::new(config.corner_allowed).generate(&config.block_sizes);
        let grid = Grid::new(config.width, config.extended_height());
        let rng = SimpleRng::new(config.seed);

        Ok(Self {
            config,
            shapes,
            grid,
            active: None,
            pending: PendingInput::default(),
            fall_interval: f64::INFINITY,
            fall_timer: 0.0,
            erased_rows: Vec::new(),
            rng,
            game_over: false,
            pieces_spawned: 0,
            rows_cleared: 0,
        })
    }

    /// Clear the grid, disable gravity and spawn the first piece
    ///
    /// The RNG is reseeded from the configuration, so every episode of the
    /// same board replays the same piece sequence for the same inputs.
    pub fn reset(&mut self) {
        self.shapes =
            ShapeGenerator::new(self.config.corner_allowed).generate(&self.config.block_sizes);
        self.grid.clear();
        self.rng = SimpleRng::new(self.config.seed);
        self.active = None;
        self.pending = PendingInput::default();
        self.fall_interval = f64::INFINITY;
        self.fall_timer = 0.0;
        self.erased_rows.clear();
        self.game_over = false;
        self.pieces_spawned = 0;
        self.rows_cleared = 0;

        log::info!(
            "board reset: {}x{} (+{} headroom), {} shapes",
            self.config.width,
            self.config.height,
            self.config.headroom(),
            self.shapes.len()
        );

        self.spawn_random();
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    /// Visible rows
    pub fn height(&self) -> usize {
        self.config.height
    }

    /// Visible rows plus headroom
    pub fn extended_height(&self) -> usize {
        self.grid.height()
    }

    pub fn loop_x(&self) -> bool {
        self.config.loop_x
    }

    /// The immutable shape universe, indexed by [`ShapeId`]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.index())
    }

    /// Stacked cells, including headroom rows
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// True once a spawn was blocked: either the spawn cell was stacked or
    /// the new piece could not be placed at the spawn position
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Rows removed by the most recent update, ascending
    pub fn erased_rows(&self) -> &[usize] {
        &self.erased_rows
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Total rows removed since the last reset
    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// Anchor of newly spawned pieces: `(width / 2, height - 1)`
    pub fn spawn_position(&self) -> Position {
        Position::new((self.config.width / 2) as i32, self.config.height as i32 - 1)
    }

    pub fn fall_interval(&self) -> f64 {
        self.fall_interval
    }

    /// Set gravity in seconds per row
    ///
    /// `f64::INFINITY` disables gravity. Zero, negative and NaN values are
    /// ignored.
    pub fn set_fall_interval(&mut self, seconds: f64) {
        if seconds.is_nan() || seconds <= 0.0 {
            log::warn!("ignoring invalid fall interval {seconds}");
            return;
        }
        self.fall_interval = seconds;
    }

    pub fn move_left(&mut self) {
        self.pending.dx = -1;
    }

    pub fn move_right(&mut self) {
        self.pending.dx = 1;
    }

    /// Queue a quarter turn; calls before the same update add up
    pub fn rotate_clockwise(&mut self) {
        self.pending.d_rotation = (self.pending.d_rotation + 1) % 4;
    }

    /// Soft drop one extra row on the next update
    pub fn move_down(&mut self) {
        self.pending.dy = self.pending.dy.max(1);
    }

    /// Hard drop: queue more rows than the piece can ever fall
    pub fn land(&mut self) {
        self.pending.dy = u32::try_from(self.config.height).unwrap_or(u32::MAX);
    }

    /// Route a [`GameAction`] to the matching command
    pub fn apply_action(&mut self, action: GameAction) {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::MoveDown => self.move_down(),
            GameAction::Land => self.land(),
            GameAction::RotateCw => self.rotate_clockwise(),
            GameAction::Reset => self.reset(),
        }
    }

    /// Advance the simulation by `delta_time` seconds
    pub fn update(&mut self, delta_time: f64) {
        self.erased_rows.clear();
        if self.game_over {
            return;
        }

        let pending = std::mem::take(&mut self.pending);
        let Some(mut piece) = self.active else {
            return;
        };

        if pending.dx != 0 || pending.d_rotation != 0 {
            let candidate = ActivePiece {
                x: piece.x + pending.dx,
                rotation: piece.rotation.rotate_by(pending.d_rotation),
                ..piece
            };
            if !self.overlaps(candidate) {
                piece = candidate;
            }
        }

        let steps = self.advance_fall_timer(delta_time).saturating_add(pending.dy);

        let mut landed = false;
        for _ in 0..steps {
            let below = ActivePiece {
                y: piece.y - 1,
                ..piece
            };
            if self.overlaps(below) {
                landed = true;
                break;
            }
            piece = below;
        }

        if landed {
            self.active = None;
            self.lock_and_respawn(piece);
        } else {
            self.active = Some(piece);
        }

        if self.config.loop_x {
            let width = self.config.width as i32;
            if let Some(active) = self.active.as_mut() {
                active.x = active.x.rem_euclid(width);
            }
        }
    }

    /// Accumulate time and return whole rows of gravity due
    fn advance_fall_timer(&mut self, delta_time: f64) -> u32 {
        if !self.fall_interval.is_finite() {
            self.fall_timer = 0.0;
            return 0;
        }
        if delta_time.is_finite() && delta_time > 0.0 {
            self.fall_timer += delta_time;
        }
        let rows = (self.fall_timer / self.fall_interval).floor();
        self.fall_timer = (self.fall_timer - rows * self.fall_interval).max(0.0);
        // Float-to-int casts saturate; landing bounds the loop anyway.
        rows as u32
    }

    fn wrap_width(&self) -> Option<i32> {
        self.config.loop_x.then_some(self.config.width as i32)
    }

    /// True if any cell of `piece` leaves the grid vertically, leaves it
    /// horizontally without wraparound, or hits a stacked cell
    ///
    /// With wraparound a piece wider than the board folds onto itself; two
    /// cells on the same grid cell also count as an overlap.
    fn overlaps(&self, piece: ActivePiece) -> bool {
        let Some(shape) = self.shapes.get(piece.shape_id.index()) else {
            return true;
        };
        let wrap = self.wrap_width();
        let extended_height = self.grid.height() as i32;
        let blocked = transformed(shape, piece, wrap)
            .any(|p| p.y < 0 || p.y >= extended_height || !self.grid.is_vacant(p.x, p.y));
        if blocked || wrap.is_none() {
            return blocked;
        }
        transformed(shape, piece, wrap)
            .enumerate()
            .any(|(i, p)| transformed(shape, piece, wrap).skip(i + 1).any(|q| q == p))
    }

    /// Landing: merge the piece into the grid, clear rows, spawn the next one
    fn lock_and_respawn(&mut self, piece: ActivePiece) {
        let wrap = self.wrap_width();
        if let Some(shape) = self.shapes.get(piece.shape_id.index()) {
            self.grid.lock(
                transformed(shape, piece, wrap).map(|p| (p.x, p.y)),
                piece.shape_id,
            );
        }

        let removed = self.grid.clear_full_rows_into(&mut self.erased_rows);
        self.rows_cleared = self.rows_cleared.saturating_add(removed as u32);

        log::debug!(
            "landed shape {} at ({}, {}) {}, erased rows {:?}",
            piece.shape_id.0,
            piece.x,
            piece.y,
            piece.rotation.as_str(),
            self.erased_rows
        );

        self.spawn_random();
    }

    fn spawn_random(&mut self) {
        match self.rng.pick_shape(self.shapes.len()) {
            Some(id) => {
                self.spawn_with(id);
            }
            None => self.enter_game_over(),
        }
    }

    /// Replace the active piece with `shape_id` at the spawn position
    ///
    /// Ends the game if the spawn cell is stacked, and also if any other cell
    /// of the piece is blocked there (stack, wall, or the piece folding onto
    /// itself under wraparound), so the active piece never overlaps the stack.
    /// Returns false when the piece was not spawned (unknown shape id, game
    /// already over, or spawn blocked).
    pub fn spawn_with(&mut self, shape_id: ShapeId) -> bool {
        if self.game_over || shape_id.index() >= self.shapes.len() {
            return false;
        }

        let spawn = self.spawn_position();
        let piece = ActivePiece::new(shape_id, spawn);
        if self.grid.is_occupied(spawn.x, spawn.y) || self.overlaps(piece) {
            self.enter_game_over();
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        true
    }

    fn enter_game_over(&mut self) {
        self.active = None;
        self.pending = PendingInput::default();
        self.game_over = true;
        log::info!(
            "game over after {} pieces, {} rows cleared",
            self.pieces_spawned,
            self.rows_cleared
        );
    }

    fn in_visible_window(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.config.width && (y as usize) < self.config.height
    }

    /// Stacked shape at `(x, y)`; `None` if vacant or outside the visible window
    pub fn shape_id(&self, x: i32, y: i32) -> Option<ShapeId> {
        if !self.in_visible_window(x, y) {
            return None;
        }
        self.grid.get(x, y).flatten()
    }

    /// True iff `(x, y)` is inside the visible window and holds no stacked cell
    pub fn is_vacant(&self, x: i32, y: i32) -> bool {
        self.in_visible_window(x, y) && self.grid.is_vacant(x, y)
    }

    /// Visible cells of the active piece; headroom cells are skipped
    pub fn active_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.visible_piece_cells(self.active)
    }

    /// Anchor y at which the active piece would land if hard-dropped now
    pub fn ghost_y(&self) -> Option<i32> {
        let mut piece = self.active?;
        loop {
            let below = ActivePiece {
                y: piece.y - 1,
                ..piece
            };
            if self.overlaps(below) {
                return Some(piece.y);
            }
            piece = below;
        }
    }

    /// Visible cells of the landing preview
    pub fn ghost_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let ghost = self
            .active
            .zip(self.ghost_y())
            .map(|(piece, y)| ActivePiece { y, ..piece });
        self.visible_piece_cells(ghost)
    }

    fn visible_piece_cells(
        &self,
        piece: Option<ActivePiece>,
    ) -> impl Iterator<Item = Position> + '_ {
        let wrap = self.wrap_width();
        piece
            .into_iter()
            .filter_map(move |piece| {
                self.shapes
                    .get(piece.shape_id.index())
                    .map(|shape| transformed(shape, piece, wrap))
            })
            .flatten()
            .filter(move |p| self.in_visible_window(p.x, p.y))
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}
