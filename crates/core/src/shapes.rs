//! Shapes module - procedural piece enumeration
//!
//! Instead of a fixed table of tetrominoes, pieces are discovered by a bounded
//! backtracking search. Starting from a single cell, every shape is grown one
//! adjacent cell at a time. Each visited shape is reduced to its canonical
//! form, so rotations of the same piece are explored and reported once.
//!
//! Reflections are *not* identified: S and Z (or J and L) stay distinct.
//!
//! # Canonical form
//!
//! For a set of cells with bounding box `w x h`:
//!
//! 1. Pick candidate orientations: 0° and 180° when `w > h`, 90° and 270° when
//!    `h > w`, all four when square. Every candidate is landscape.
//! 2. Rotate, then translate so the minimum coordinate on each axis is
//!    `-(extent / 2)`; the origin sits at the centre of the bounding box.
//! 3. Sort the offsets by `(x, y)`.
//!
//! The lexicographically smallest candidate is the canonical form.

use std::collections::HashSet;

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{Position, Rotation};

/// Edge-adjacent neighbour offsets
const EDGE_NEIGHBOURS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal neighbour offsets, used when corners count as connected
const CORNER_NEIGHBOURS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// An immutable piece shape in canonical form.
///
/// Offsets are sorted by `(x, y)` and centred on the bounding box. Two shapes
/// compare equal iff they are rotations of each other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Shape {
    cells: Vec<Position>,
}

/// Inclusive bounding box of a cell set: `(min_x, max_x, min_y, max_y)`
fn bounds(cells: &[Position]) -> (i32, i32, i32, i32) {
    cells.iter().fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    )
}

/// Rotate, centre and sort one orientation of `cells`
fn orientation(cells: &[Position], quarter_turns: u8) -> Vec<Position> {
    let mut out: Vec<Position> = cells.iter().map(|p| p.rotated(quarter_turns)).collect();
    let (min_x, max_x, min_y, max_y) = bounds(&out);
    let dx = -((max_x - min_x + 1) / 2) - min_x;
    let dy = -((max_y - min_y + 1) / 2) - min_y;
    for p in &mut out {
        *p = p.offset(dx, dy);
    }
    out.sort_unstable();
    out
}

impl Shape {
    /// Build the canonical form of an arbitrary connected cell set
    ///
    /// Duplicate cells are ignored.
    pub fn canonical(cells: &[Position]) -> Shape {
        let mut unique = cells.to_vec();
        unique.sort_unstable();
        unique.dedup();
        if unique.is_empty() {
            return Shape { cells: unique };
        }

        let (min_x, max_x, min_y, max_y) = bounds(&unique);
        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;

        let turns: ArrayVec<u8, 4> = if width > height {
            [0, 2].into_iter().collect()
        } else if height > width {
            [1, 3].into_iter().collect()
        } else {
            [0, 1, 2, 3].into_iter().collect()
        };

        let best = turns
            .iter()
            .map(|&t| orientation(&unique, t))
            .min()
            .unwrap_or_default();

        Shape { cells: best }
    }

    /// Sorted, centred offsets
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding-box width in the canonical orientation
    pub fn width(&self) -> usize {
        if self.cells.is_empty() {
            return 0;
        }
        let (min_x, max_x, _, _) = bounds(&self.cells);
        (max_x - min_x + 1) as usize
    }

    /// Bounding-box height in the canonical orientation
    pub fn height(&self) -> usize {
        if self.cells.is_empty() {
            return 0;
        }
        let (_, _, min_y, max_y) = bounds(&self.cells);
        (max_y - min_y + 1) as usize
    }

    pub fn contains(&self, p: Position) -> bool {
        self.cells.binary_search(&p).is_ok()
    }

    /// Offsets rotated about the anchor, in canonical cell order
    ///
    /// Produces fresh values; the shape itself is never modified.
    pub fn rotated(&self, rotation: Rotation) -> impl Iterator<Item = Position> + '_ {
        let turns = rotation.quarter_turns();
        self.cells.iter().map(move |p| p.rotated(turns))
    }
}

/// Enumerates every connected shape up to rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeGenerator {
    corner_allowed: bool,
}

impl ShapeGenerator {
    /// `corner_allowed` makes diagonal neighbours count as connected
    pub fn new(corner_allowed: bool) -> Self {
        Self { corner_allowed }
    }

    pub fn corner_allowed(&self) -> bool {
        self.corner_allowed
    }

    /// Every canonical shape with `1..=max_size` cells, in discovery order
    pub fn universe(&self, max_size: usize) -> Vec<Shape> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        if max_size > 0 {
            self.explore(vec![Position::ORIGIN], max_size, &mut seen, &mut out);
        }
        out
    }

    /// Canonical shapes whose cell count is one of `sizes`
    ///
    /// Duplicate sizes are harmless; each shape is reported once. The order is
    /// deterministic, so indices into the result are stable shape ids.
    pub fn generate(&self, sizes: &[usize]) -> Vec<Shape> {
        let max_size = sizes.iter().copied().max().unwrap_or(0);
        let shapes: Vec<Shape> = self
            .universe(max_size)
            .into_iter()
            .filter(|shape| sizes.contains(&shape.len()))
            .collect();

        log::debug!(
            "generated {} shapes for sizes {:?} (corner_allowed={})",
            shapes.len(),
            sizes,
            self.corner_allowed
        );
        shapes
    }

    fn explore(
        &self,
        cells: Vec<Position>,
        max_size: usize,
        seen: &mut HashSet<Shape>,
        out: &mut Vec<Shape>,
    ) {
        let shape = Shape::canonical(&cells);
        if seen.contains(&shape) {
            return;
        }
        seen.insert(shape.clone());
        out.push(shape.clone());

        if shape.len() >= max_size {
            return;
        }

        for candidate in self.candidates(&shape) {
            let mut grown = Vec::with_capacity(shape.len() + 1);
            grown.extend_from_slice(shape.cells());
            grown.push(candidate);
            self.explore(grown, max_size, seen, out);
        }
    }

    /// Cells adjacent to `shape` that it does not occupy yet
    fn candidates(&self, shape: &Shape) -> Vec<Position> {
        let mut neighbours: ArrayVec<(i32, i32), 8> = EDGE_NEIGHBOURS.into_iter().collect();
        if self.corner_allowed {
            neighbours.extend(CORNER_NEIGHBOURS);
        }

        let mut out: Vec<Position> = Vec::new();
        for p in shape.cells() {
            for &(dx, dy) in &neighbours {
                let q = p.offset(dx, dy);
                if !shape.contains(q) && !out.contains(&q) {
                    out.push(q);
                }
            }
        }
        out
    }
}
