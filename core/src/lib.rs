use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use error::*;
pub use generator::*;
pub use readout::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod error;
mod generator;
mod readout;
mod session;
mod snapshot;
mod types;

/// Validated `(rows, cols, bombs)` triple, the only way to describe a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoardConfig")]
pub struct BoardConfig {
    rows: Coord,
    cols: Coord,
    bombs: CellCount,
}

#[derive(Deserialize)]
struct RawBoardConfig {
    rows: Coord,
    cols: Coord,
    bombs: CellCount,
}

impl TryFrom<RawBoardConfig> for BoardConfig {
    type Error = ConfigError;

    fn try_from(raw: RawBoardConfig) -> core::result::Result<Self, Self::Error> {
        Self::validate(raw.rows, raw.cols, raw.bombs)
    }
}

impl BoardConfig {
    pub fn new(rows: Coord, cols: Coord, bombs: CellCount) -> Result<Self> {
        Ok(Self::validate(rows, cols, bombs)?)
    }

    fn validate(
        rows: Coord,
        cols: Coord,
        bombs: CellCount,
    ) -> core::result::Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyDimensions { rows, cols });
        }
        let cells = mult(rows, cols);
        if bombs > cells {
            return Err(ConfigError::TooManyBombs { bombs, cells });
        }
        Ok(Self { rows, cols, bombs })
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn bombs(&self) -> CellCount {
        self.bombs
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

/// Fixed bomb positions for a board, either generated or given explicitly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBombLayout")]
pub struct BombLayout {
    bomb_mask: Array2<bool>,
    bomb_count: CellCount,
}

#[derive(Deserialize)]
struct RawBombLayout {
    bomb_mask: Array2<bool>,
    bomb_count: CellCount,
}

impl TryFrom<RawBombLayout> for BombLayout {
    type Error = ConfigError;

    fn try_from(raw: RawBombLayout) -> core::result::Result<Self, Self::Error> {
        let layout = Self::validated(raw.bomb_mask)?;
        if layout.bomb_count != raw.bomb_count {
            return Err(ConfigError::BombCountMismatch {
                declared: raw.bomb_count,
                actual: layout.bomb_count,
            });
        }
        Ok(layout)
    }
}

impl BombLayout {
    /// Recounts the bombs and checks the mask fits a playable board.
    pub(crate) fn validated(bomb_mask: Array2<bool>) -> core::result::Result<Self, ConfigError> {
        let (rows, cols) = bomb_mask.dim();
        let (Ok(row_count), Ok(col_count)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(ConfigError::Oversized { rows, cols });
        };
        let layout = Self::from_bomb_mask(bomb_mask);
        BoardConfig::validate(row_count, col_count, layout.bomb_count)?;
        Ok(layout)
    }

    /// Callers must keep both dimensions within `1..=Coord::MAX`.
    pub(crate) fn from_bomb_mask(bomb_mask: Array2<bool>) -> Self {
        let bomb_count = bomb_mask.iter().filter(|&&has_bomb| has_bomb).count() as CellCount;
        Self {
            bomb_mask,
            bomb_count,
        }
    }

    pub fn from_bomb_coords(size: Coord2, bomb_coords: &[Coord2]) -> Result<Self> {
        BoardConfig::new(size.0, size.1, 0)?;
        let mut bomb_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &(row, col) in bomb_coords {
            if row >= size.0 || col >= size.1 {
                return Err(BoardError::InvalidGestureTarget { row, col });
            }
            bomb_mask[(row, col).to_nd_index()] = true;
        }

        Ok(Self::from_bomb_mask(bomb_mask))
    }

    pub fn config(&self) -> BoardConfig {
        let (rows, cols) = self.size();
        BoardConfig {
            rows,
            cols,
            bombs: self.bomb_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.bomb_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn contains_bomb(&self, coords: Coord2) -> bool {
        self[coords]
    }
}

impl Index<Coord2> for BombLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.bomb_mask[coords.to_nd_index()]
    }
}

/// The three abstract actions an input adapter can issue on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    /// Reveal
    Primary,
    /// Flag toggle
    Secondary,
    /// Reveal all unflagged neighbors of a satisfied number
    Chord,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitBomb,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitBomb => true,
            Won => true,
        }
    }
}

/// Used to merge outcomes when several cells are revealed by one gesture
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitBomb, _) => HitBomb,
            (_, HitBomb) => HitBomb,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    Reveal(RevealOutcome),
    Mark(MarkOutcome),
}

impl GestureOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Mark(outcome) => outcome.has_update(),
        }
    }
}
