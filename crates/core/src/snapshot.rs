//! Snapshot module - serializable view of a board
//!
//! A [`BoardSnapshot`] copies everything a presentation layer needs out of a
//! [`Board`] using only its query surface. Front-ends render from snapshots;
//! tools dump them as JSON.

use serde::Serialize;

use crate::board::{ActivePiece, Board};
use crate::types::{Position, ShapeId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Visible stacked cells, `rows[y][x]`, row 0 at the bottom
    pub rows: Vec<Vec<Option<ShapeId>>>,
    pub active: Option<ActivePiece>,
    /// Visible cells of the active piece
    pub active_cells: Vec<Position>,
    /// Visible cells of the landing preview
    pub ghost_cells: Vec<Position>,
    pub erased_rows: Vec<usize>,
    pub game_over: bool,
    pub loop_x: bool,
    pub pieces_spawned: u32,
    pub rows_cleared: u32,
}

impl BoardSnapshot {
    /// Shape at `(x, y)` of the visible window, active piece excluded
    pub fn stacked(&self, x: usize, y: usize) -> Option<ShapeId> {
        self.rows.get(y).and_then(|row| row.get(x)).copied().flatten()
    }
}

impl Board {
    /// Fill `out`, reusing its allocations
    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        let (width, height) = (self.width(), self.height());
        out.width = width;
        out.height = height;

        out.rows.resize_with(height, Vec::new);
        for (y, row) in out.rows.iter_mut().enumerate() {
            row.clear();
            row.extend((0..width).map(|x| self.shape_id(x as i32, y as i32)));
        }

        out.active = self.active();
        out.active_cells.clear();
        out.active_cells.extend(self.active_cells());
        out.ghost_cells.clear();
        out.ghost_cells.extend(self.ghost_cells());
        out.erased_rows.clear();
        out.erased_rows.extend_from_slice(self.erased_rows());
        out.game_over = self.is_game_over();
        out.loop_x = self.loop_x();
        out.pieces_spawned = self.pieces_spawned();
        out.rows_cleared = self.rows_cleared();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use crate::{Board, BoardConfig};

    #[test]
    fn test_snapshot_matches_queries() {
        let mut board = Board::new(BoardConfig::new(6, 8, vec![4]).with_seed(3)).unwrap();
        board.reset();
        board.land();
        board.update(0.0);

        let snap = board.snapshot();
        assert_eq!(snap.rows.len(), 8);
        assert!(snap.rows.iter().all(|row| row.len() == 6));
        for y in 0..8 {
            for x in 0..6 {
                assert_eq!(snap.stacked(x, y), board.shape_id(x as i32, y as i32));
            }
        }
        assert_eq!(snap.active, board.active());
        assert_eq!(snap.active_cells, board.active_cells().collect::<Vec<_>>());
        assert_eq!(snap.pieces_spawned, 2);
        assert!(!snap.game_over);
    }

    #[test]
    fn test_snapshot_into_reuses_buffers() {
        let mut board = Board::new(BoardConfig::new(4, 6, vec![4])).unwrap();
        board.reset();
        let mut snap = board.snapshot();
        board.land();
        board.update(0.0);
        board.snapshot_into(&mut snap);
        assert_eq!(snap, board.snapshot());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut board = Board::new(BoardConfig::new(4, 6, vec![4])).unwrap();
        board.reset();
        let json = serde_json::to_value(board.snapshot()).unwrap();
        assert_eq!(json["width"], 4);
        assert_eq!(json["rows"].as_array().unwrap().len(), 6);
        assert_eq!(json["active"]["rotation"], "north");
        assert_eq!(json["game_over"], false);
    }
}
