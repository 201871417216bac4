use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs from one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub row: Coord,
    pub col: Coord,
    pub status: CellStatus,
    pub has_bomb: bool,
    pub adjacent_bombs: u8,
    pub chord_previewed: bool,
}

/// Read-only copy of the observable board state, for renderers on the other side of
/// a serialization boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: Coord,
    pub cols: Coord,
    pub status: BoardStatus,
    pub bombs_total: CellCount,
    pub bombs_remaining: isize,
    pub elapsed_millis: u64,
    /// Row-major.
    pub cells: Vec<CellView>,
}

impl BoardSnapshot {
    pub fn cell(&self, (row, col): Coord2) -> Option<&CellView> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot {
        let cells = self
            .cells()
            .map(|cell| {
                let coords = cell.coords();
                CellView {
                    row: cell.row(),
                    col: cell.col(),
                    status: cell.status(),
                    has_bomb: cell.has_bomb(),
                    adjacent_bombs: self.adjacent_bombs(coords).unwrap_or_default(),
                    chord_previewed: self.is_chord_previewed(coords).unwrap_or_default(),
                }
            })
            .collect();

        BoardSnapshot {
            rows: self.rows(),
            cols: self.cols(),
            status: self.status(),
            bombs_total: self.bombs_total(),
            bombs_remaining: self.bombs_remaining(),
            elapsed_millis: self.elapsed().as_millis().try_into().unwrap_or(u64::MAX),
            cells,
        }
    }
}
