use core::ops::BitOr;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use web_time::Duration;

use crate::*;

/// Valid transitions:
/// - NotStarted -> Started
/// - Started -> Won
/// - Started -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardStatus {
    #[default]
    NotStarted,
    Started,
    Won,
    Lost,
}

impl BoardStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Board-level notifications, queued until the host drains them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    Started,
    Lost,
    Won,
}

type NeighborList = SmallVec<[Coord2; 8]>;

/// One game from the first reveal to a win or a loss.
#[derive(Clone, Debug)]
pub struct Board {
    config: BoardConfig,
    cells: Array2<Cell>,
    bombs_remaining: isize,
    status: BoardStatus,
    stopwatch: Stopwatch,
    rng: SmallRng,
    events: Vec<BoardEvent>,
}

impl Board {
    /// Random board seeded from the operating system.
    pub fn new(config: BoardConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: BoardConfig, rng: SmallRng) -> Self {
        Self::with_generator(config, &RandomLayoutGenerator, rng)
    }

    /// The same `rng` is kept for the first-click relocation.
    pub fn with_generator<G: LayoutGenerator>(
        config: BoardConfig,
        generator: &G,
        mut rng: SmallRng,
    ) -> Self {
        let layout = generator.generate(config, &mut rng);
        Self::build(layout, rng)
    }

    pub fn from_layout(layout: BombLayout, seed: u64) -> Result<Self> {
        let layout = BombLayout::validated(layout.bomb_mask)?;
        Ok(Self::build(layout, SmallRng::seed_from_u64(seed)))
    }

    fn build(layout: BombLayout, rng: SmallRng) -> Self {
        let config = layout.config();
        let cells = Array2::from_shape_fn(config.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell::new(coords, layout[coords])
        });

        Self {
            config,
            cells,
            bombs_remaining: config.bombs() as isize,
            status: BoardStatus::default(),
            stopwatch: Stopwatch::new(),
            rng,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows()
    }

    pub fn cols(&self) -> Coord {
        self.config.cols()
    }

    pub fn bombs_total(&self) -> CellCount {
        self.config.bombs()
    }

    /// Display counter, negative when the player placed more flags than bombs.
    pub fn bombs_remaining(&self) -> isize {
        self.bombs_remaining
    }

    pub fn status(&self) -> BoardStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (row, col) = coords;
        if row < self.rows() && col < self.cols() {
            Ok(coords)
        } else {
            Err(BoardError::InvalidGestureTarget { row, col })
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cell_at(coords))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn neighbors(&self, coords: Coord2) -> Result<NeighborIter> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells.iter_neighbors(coords))
    }

    pub fn adjacent_bombs(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_adjacent_bombs(coords))
    }

    /// Drains the notifications raised since the last call.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn apply_gesture(&mut self, coords: Coord2, gesture: Gesture) -> Result<GestureOutcome> {
        Ok(match gesture {
            Gesture::Primary => GestureOutcome::Reveal(self.primary_activate(coords)?),
            Gesture::Secondary => GestureOutcome::Mark(self.secondary_activate(coords)?),
            Gesture::Chord => GestureOutcome::Reveal(self.chord_activate(coords)?),
        })
    }

    /// Reveal a hidden cell, the first reveal of a game never lands on a bomb while a
    /// bomb-free cell exists.
    pub fn primary_activate(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.is_finished() || !self.cell_at(coords).status().is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.status.is_ready() {
            if self.cell_at(coords).has_bomb() {
                self.relocate_bomb(coords);
            }
            self.mark_started();
        }

        let outcome = self.reveal_cell(coords);
        Ok(outcome | self.check_win())
    }

    /// Toggle a flag on a hidden cell.
    pub fn secondary_activate(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;

        if self.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        let was_flagged = cell.status() == CellStatus::Flagged;
        if !cell.toggle_flag() {
            return Ok(MarkOutcome::NoChange);
        }

        if was_flagged {
            self.bombs_remaining += 1;
        } else {
            self.bombs_remaining -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Reveal every hidden neighbor of a revealed number once enough flags surround it.
    pub fn chord_activate(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        if !self.can_chord_at(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        let hidden: NeighborList = self
            .cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cell_at(pos).status().is_hidden())
            .collect();
        log::debug!("Chord at {:?} opens {:?}", coords, hidden);

        let outcome = hidden
            .into_iter()
            .map(|pos| self.reveal_cell(pos))
            .reduce(BitOr::bitor)
            .unwrap_or(RevealOutcome::NoChange);
        Ok(outcome | self.check_win())
    }

    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        if self.status != BoardStatus::Started {
            return false;
        }

        let Ok(cell) = self.cell(coords) else {
            return false;
        };
        if cell.status() != CellStatus::Revealed {
            return false;
        }

        let bombs = self.count_adjacent_bombs(coords);
        bombs > 0 && bombs == self.count_flagged_neighbors(coords)
    }

    /// Press preview driven by the input adapter, returns whether the status changed.
    pub fn set_pressed(&mut self, coords: Coord2, pressed: bool) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(false);
        }
        Ok(self.cells[coords.to_nd_index()].set_pressed(pressed))
    }

    /// Marks a revealed cell as the center of a held chord gesture.
    pub fn set_revealing_adjacent(&mut self, coords: Coord2, active: bool) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        let active = active && !self.is_finished();
        self.cells[coords.to_nd_index()].set_revealing_adjacent(active);
        Ok(())
    }

    /// Whether a hidden cell sits next to a held chord gesture.
    pub fn is_chord_previewed(&self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cell_at(coords).status().is_hidden()
            && self
                .cells
                .iter_neighbors(coords)
                .any(|pos| self.cell_at(pos).revealing_adjacent()))
    }

    fn cell_at(&self, coords: Coord2) -> &Cell {
        &self.cells[coords.to_nd_index()]
    }

    fn count_adjacent_bombs(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cell_at(pos).has_bomb())
            .count() as u8
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cell_at(pos).status() == CellStatus::Flagged)
            .count() as u8
    }

    /// Moves the bomb under `from` to a random bomb-free cell.
    fn relocate_bomb(&mut self, from: Coord2) {
        let target = self
            .cells
            .iter()
            .filter(|cell| !cell.has_bomb())
            .map(Cell::coords)
            .choose(&mut self.rng);

        match target {
            Some(to) => {
                self.cells[from.to_nd_index()].set_has_bomb(false);
                self.cells[to.to_nd_index()].set_has_bomb(true);
                log::debug!("Moved first-click bomb from {:?} to {:?}", from, to);
            }
            None => {
                log::warn!("Board is full of bombs, cannot make the first reveal safe");
            }
        }
    }

    /// Opens `coords` and spreads through zero cells. Termination relies on cells
    /// refusing to open twice.
    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        let mut outcome = RevealOutcome::NoChange;
        let mut to_visit = vec![coords];

        while let Some(visit_coords) = to_visit.pop() {
            match self.cells[visit_coords.to_nd_index()].open() {
                CellOpen::Skipped => continue,
                CellOpen::Exploded => {
                    log::debug!("Bomb exploded at {:?}", visit_coords);
                    self.mark_lost();
                    return RevealOutcome::HitBomb;
                }
                CellOpen::Revealed { was_flagged } => {
                    if was_flagged {
                        self.bombs_remaining += 1;
                    }
                    outcome = RevealOutcome::Revealed;

                    let adjacent_bombs = self.count_adjacent_bombs(visit_coords);
                    log::trace!(
                        "Revealed cell at {:?}, adjacent bombs: {}",
                        visit_coords,
                        adjacent_bombs
                    );

                    if adjacent_bombs == 0 {
                        to_visit.extend(
                            self.cells
                                .iter_neighbors(visit_coords)
                                .filter(|&pos| self.cell_at(pos).status().is_unrevealed()),
                        );
                    }
                }
            }
        }

        outcome
    }

    fn check_win(&mut self) -> RevealOutcome {
        if self.status != BoardStatus::Started {
            return RevealOutcome::NoChange;
        }

        let won = self
            .cells
            .iter()
            .all(|cell| cell.status() == CellStatus::Revealed || cell.has_bomb());
        if !won {
            return RevealOutcome::NoChange;
        }

        self.status = BoardStatus::Won;
        self.stopwatch.stop();
        self.events.push(BoardEvent::Won);
        log::debug!("Game won after {:?}", self.stopwatch.elapsed());
        RevealOutcome::Won
    }

    fn mark_started(&mut self) {
        if self.status.is_ready() {
            self.status = BoardStatus::Started;
            self.stopwatch.start();
            self.events.push(BoardEvent::Started);
            log::debug!("Game started");
        }
    }

    fn mark_lost(&mut self) {
        if self.status.is_finished() {
            return;
        }

        self.status = BoardStatus::Lost;
        self.stopwatch.stop();
        self.events.push(BoardEvent::Lost);
        for cell in self.cells.iter_mut() {
            cell.reveal_on_loss();
        }
        log::debug!("Game lost after {:?}", self.stopwatch.elapsed());
    }
}
