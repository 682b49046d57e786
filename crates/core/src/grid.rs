//! Grid module - stacked cells of the play field
//!
//! The grid covers the visible play area plus the headroom rows above it.
//! Cells are stored in a flat, row-major vector (`y * width + x`) with row 0 at
//! the bottom, so compaction after a line clear moves rows toward lower indices.

use crate::types::{Cell, ShapeId};

/// Width x extended-height array of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid; `height` includes any headroom rows
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Total rows, including headroom
    pub fn height(&self) -> usize {
        self.height
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and vacant
    pub fn is_vacant(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// In bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Lock a set of absolute cells with the given shape id
    ///
    /// Out-of-bounds cells are skipped; callers only lock positions that
    /// already passed the overlap test.
    pub fn lock(&mut self, cells: impl IntoIterator<Item = (i32, i32)>, id: ShapeId) {
        for (x, y) in cells {
            self.set(x, y, Some(id));
        }
    }

    /// Remove every full row and compact the rest downward
    ///
    /// Removed row indices are appended to `cleared` in the order they were
    /// found scanning bottom to top, i.e. ascending. Returns the number of rows
    /// removed.
    pub fn clear_full_rows_into(&mut self, cleared: &mut Vec<usize>) -> usize {
        let width = self.width;
        let mut write_y = 0usize;
        let mut removed = 0usize;

        for read_y in 0..self.height {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
                removed += 1;
                continue;
            }
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
            write_y += 1;
        }

        for cell in &mut self.cells[write_y * width..] {
            *cell = None;
        }

        removed
    }

    /// Remove every full row, returning the removed indices (ascending)
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        self.clear_full_rows_into(&mut cleared);
        cleared
    }

    /// Number of non-vacant cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Vacate every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Raw row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
