use thiserror::Error;

use crate::{CellCount, Coord};

/// Why a `BoardConfig` was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board must have at least one row and one column, got {rows}x{cols}")]
    EmptyDimensions { rows: Coord, cols: Coord },
    #[error("Cannot place {bombs} bombs on a board with only {cells} cells")]
    TooManyBombs { bombs: CellCount, cells: CellCount },
    #[error("Board of {rows}x{cols} exceeds the supported size")]
    Oversized { rows: usize, cols: usize },
    #[error("Layout declares {declared} bombs but its mask holds {actual}")]
    BombCountMismatch { declared: CellCount, actual: CellCount },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("No cell at row {row}, column {col}")]
    InvalidGestureTarget { row: Coord, col: Coord },
}

pub type Result<T> = core::result::Result<T, BoardError>;
