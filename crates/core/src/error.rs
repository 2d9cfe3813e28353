//! Error types for session construction
//!
//! Gameplay itself never fails: illegal moves are rejected by returning
//! `false` and leaving state untouched. The only errors are configuration
//! mistakes caught before a grid is allocated.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid width must be positive")]
    ZeroWidth,
    #[error("grid height must be positive")]
    ZeroHeight,
    #[error("grid dimension {value} exceeds the maximum of {max}")]
    TooLarge { value: usize, max: usize },
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
}
