//! Board configuration
//!
//! A [`BoardConfig`] is fixed for the lifetime of a board. It is plain data
//! with serde support so front-ends can load it from JSON.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{DEFAULT_BLOCK_SIZES, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Construction parameters of a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Columns of the play area
    pub width: usize,
    /// Visible rows of the play area (headroom is added on top)
    pub height: usize,
    /// Cell counts of the pieces to generate
    pub block_sizes: Vec<usize>,
    /// Whether diagonal neighbours count as connected when generating shapes
    pub corner_allowed: bool,
    /// Whether the left and right edges wrap around
    pub loop_x: bool,
    /// Seed for piece selection
    pub seed: u32,
}

impl BoardConfig {
    pub fn new(width: usize, height: usize, block_sizes: impl Into<Vec<usize>>) -> Self {
        Self {
            width,
            height,
            block_sizes: block_sizes.into(),
            ..Self::default()
        }
    }

    pub fn with_corner_allowed(mut self, corner_allowed: bool) -> Self {
        self.corner_allowed = corner_allowed;
        self
    }

    pub fn with_loop_x(mut self, loop_x: bool) -> Self {
        self.loop_x = loop_x;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Largest requested piece size (0 when the list is empty)
    pub fn max_block_size(&self) -> usize {
        self.block_sizes.iter().copied().max().unwrap_or(0)
    }

    /// Rows above the visible area reserved for spawning and rotating
    pub fn headroom(&self) -> usize {
        self.max_block_size().div_ceil(2)
    }

    /// Visible height plus headroom
    pub fn extended_height(&self) -> usize {
        self.height + self.headroom()
    }

    /// Check the construction preconditions
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.block_sizes.is_empty() {
            return Err(ConfigError::EmptyBlockSizes);
        }
        let capacity = self.width.saturating_mul(self.height);
        for &size in &self.block_sizes {
            if size == 0 {
                return Err(ConfigError::ZeroBlockSize);
            }
            if size > capacity {
                return Err(ConfigError::BlockSizeTooLarge { size, capacity });
            }
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            block_sizes: DEFAULT_BLOCK_SIZES.to_vec(),
            corner_allowed: false,
            loop_x: false,
            seed: 1,
        }
    }
}
