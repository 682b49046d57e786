//! Configuration errors reported when a board is constructed.

use thiserror::Error;

/// Reasons a [`BoardConfig`](crate::BoardConfig) is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("board dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: usize, height: usize },
    /// No piece sizes were requested.
    #[error("block size list is empty")]
    EmptyBlockSizes,
    /// A requested piece size is zero.
    #[error("block sizes must be at least 1")]
    ZeroBlockSize,
    /// A piece of this size can never fit on the visible board.
    #[error("block size {size} exceeds board capacity {capacity}")]
    BlockSizeTooLarge { size: usize, capacity: usize },
}
