//! Board error types.

use thiserror::Error;

/// Errors surfaced by board construction and the game step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// No empty cell was left for a spawn. Fatal: the caller should end the run.
    #[error("there is no space to add a new tile")]
    BoardFull,

    /// Board side length outside the supported range.
    #[error("board size {size} is outside {min}..={max}")]
    InvalidSize { size: usize, min: usize, max: usize },

    /// A layout placed a tile outside the board.
    #[error("tile at ({x}, {y}) is outside a {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },

    /// A layout tile value that is not a power of two of at least 2.
    #[error("tile at ({x}, {y}) has invalid value {value}")]
    InvalidValue { x: usize, y: usize, value: u32 },

    /// A layout placed two tiles on one cell.
    #[error("cell ({x}, {y}) is occupied twice")]
    CellOccupied { x: usize, y: usize },
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
