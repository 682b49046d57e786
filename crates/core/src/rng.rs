//! RNG module - seeded shape selection
//!
//! Spawned shapes are drawn uniformly from the generated universe with no
//! anti-repetition. A small LCG keeps games reproducible: the same seed and
//! the same command stream always yield the same sequence of pieces.

use crate::types::ShapeId;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits of the state; the low bits of an LCG with a
    /// power-of-two modulus cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Pick a shape id uniformly from `0..shape_count`
    ///
    /// Returns `None` when there are no shapes to pick from.
    pub fn pick_shape(&mut self, shape_count: usize) -> Option<ShapeId> {
        if shape_count == 0 {
            return None;
        }
        let bound = u32::try_from(shape_count).unwrap_or(u32::MAX);
        Some(ShapeId(self.next_range(bound)))
    }
}
