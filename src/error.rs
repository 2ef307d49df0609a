//! Error types for board construction and swap requests.

use thiserror::Error;

use crate::constants::{MAX_GEM_TYPES, MIN_GEM_TYPES};
use crate::gem::Pos;

/// Errors reported by the engine's public entry points.
///
/// None of these leave the board modified: a rejected call returns before
/// any cell is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Position outside `[0, width) x [0, height)`
    #[error("position ({col}, {row}) is outside the board")]
    OutOfBounds { col: usize, row: usize },

    /// Swap between cells that are not orthogonal neighbors
    #[error("cells {a:?} and {b:?} are not adjacent")]
    NotAdjacent { a: Pos, b: Pos },

    /// Swap involving a cell that holds no gem
    #[error("no gem at ({col}, {row})")]
    EmptyCellSwap { col: usize, row: usize },

    /// Board with a zero dimension
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Too few gem types for cascades to settle
    #[error("at least {} gem types are required (got {count})", MIN_GEM_TYPES)]
    TooFewGemTypes { count: usize },

    /// More gem types than the engine defines
    #[error("at most {} gem types are supported (got {count})", MAX_GEM_TYPES)]
    TooManyGemTypes { count: usize },

    /// Malformed text layout
    #[error("invalid layout: {reason}")]
    InvalidLayout { reason: String },

    /// Layout already contains a run of three or more
    #[error("layout contains a match")]
    NotQuiescent,
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;
