use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2};

/// Per-cell state as seen by both the player and the board logic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    #[default]
    Hidden,
    /// Hidden cell under a held button, every gesture treats it like `Hidden`.
    Pressed,
    Flagged,
    Revealed,
    Exploded,
    WronglyFlagged,
}

impl CellStatus {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden | Self::Pressed)
    }

    /// Whether a reveal may still open this cell.
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Pressed | Self::Flagged)
    }
}

/// What happened when the board asked a cell to open itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum CellOpen {
    Skipped,
    Exploded,
    Revealed { was_flagged: bool },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    has_bomb: bool,
    status: CellStatus,
    revealing_adjacent: bool,
}

impl Cell {
    pub(crate) const fn new((row, col): Coord2, has_bomb: bool) -> Self {
        Self {
            row,
            col,
            has_bomb,
            status: CellStatus::Hidden,
            revealing_adjacent: false,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn has_bomb(&self) -> bool {
        self.has_bomb
    }

    pub const fn status(&self) -> CellStatus {
        self.status
    }

    /// Set while a chord gesture is held over this cell.
    pub const fn revealing_adjacent(&self) -> bool {
        self.revealing_adjacent
    }

    pub(crate) fn set_has_bomb(&mut self, has_bomb: bool) {
        self.has_bomb = has_bomb;
    }

    /// Flips between `Flagged` and `Hidden`, returns whether anything changed.
    pub(crate) fn toggle_flag(&mut self) -> bool {
        use CellStatus::*;
        match self.status {
            Hidden | Pressed => self.status = Flagged,
            Flagged => self.status = Hidden,
            Revealed | Exploded | WronglyFlagged => return false,
        }
        true
    }

    pub(crate) fn set_pressed(&mut self, pressed: bool) -> bool {
        use CellStatus::*;
        match (self.status, pressed) {
            (Hidden, true) => self.status = Pressed,
            (Pressed, false) => self.status = Hidden,
            _ => return false,
        }
        true
    }

    pub(crate) fn set_revealing_adjacent(&mut self, active: bool) {
        self.revealing_adjacent = active && self.status == CellStatus::Revealed;
    }

    /// Opens this single cell, the cascade to neighbors is driven by the board.
    pub(crate) fn open(&mut self) -> CellOpen {
        if !self.status.is_unrevealed() {
            return CellOpen::Skipped;
        }

        let was_flagged = self.status == CellStatus::Flagged;
        if self.has_bomb {
            self.status = CellStatus::Exploded;
            CellOpen::Exploded
        } else {
            self.status = CellStatus::Revealed;
            CellOpen::Revealed { was_flagged }
        }
    }

    /// End-of-game sweep after an explosion.
    pub(crate) fn reveal_on_loss(&mut self) {
        use CellStatus::*;
        self.revealing_adjacent = false;
        self.status = match self.status {
            Flagged if self.has_bomb => Flagged,
            Flagged | WronglyFlagged => WronglyFlagged,
            Exploded => Exploded,
            Hidden | Pressed | Revealed => Revealed,
        };
    }
}
