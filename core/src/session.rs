use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Anything holding on to the previous board must re-read it from the session.
    BoardReplaced { generation: u64, config: BoardConfig },
}

/// Owns the active board and replaces it on restart.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    generation: u64,
    base_seed: Option<u64>,
    events: Vec<SessionEvent>,
}

impl GameSession {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            board: Board::new(config),
            generation: 0,
            base_seed: None,
            events: Vec::new(),
        }
    }

    /// Every board of this session is reproducible from `seed` and its generation.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        Self {
            board: Board::with_seed(config, board_seed(seed, 0)),
            generation: 0,
            base_seed: Some(seed),
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Number of restarts so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn restart(&mut self, config: BoardConfig) -> &mut Board {
        self.generation += 1;
        self.board = match self.base_seed {
            Some(seed) => Board::with_seed(config, board_seed(seed, self.generation)),
            None => Board::new(config),
        };
        log::debug!(
            "Restarted as generation {} with {:?}",
            self.generation,
            config
        );
        self.events.push(SessionEvent::BoardReplaced {
            generation: self.generation,
            config,
        });
        &mut self.board
    }

    /// Validates the new settings first, the active board survives a rejected restart.
    pub fn restart_with(
        &mut self,
        rows: Coord,
        cols: Coord,
        bombs: CellCount,
    ) -> Result<&mut Board> {
        let config = BoardConfig::new(rows, cols, bombs)?;
        Ok(self.restart(config))
    }

    pub fn restart_same(&mut self) -> &mut Board {
        let config = self.board.config();
        self.restart(config)
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        core::mem::take(&mut self.events)
    }
}

fn board_seed(seed: u64, generation: u64) -> u64 {
    // splitmix64 increment
    seed.wrapping_add(generation.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bomb_coords(board: &Board) -> Vec<Coord2> {
        board
            .cells()
            .filter(|cell| cell.has_bomb())
            .map(Cell::coords)
            .collect()
    }

    #[test]
    fn restart_replaces_board_and_notifies() {
        let config = BoardConfig::new(4, 4, 3).unwrap();
        let mut session = GameSession::with_seed(config, 11);
        session.board_mut().primary_activate((0, 0)).unwrap();
        assert_eq!(session.board().status(), BoardStatus::Started);

        let board = session.restart_same();
        assert_eq!(board.status(), BoardStatus::NotStarted);
        assert_eq!(session.generation(), 1);
        assert_eq!(
            session.take_events(),
            vec![SessionEvent::BoardReplaced {
                generation: 1,
                config
            }]
        );
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn rejected_restart_keeps_active_board() {
        let mut session = GameSession::new(BoardConfig::new(3, 3, 1).unwrap());

        assert!(matches!(
            session.restart_with(2, 2, 9),
            Err(BoardError::InvalidConfiguration(ConfigError::TooManyBombs { .. }))
        ));
        assert_eq!(session.generation(), 0);
        assert_eq!(session.board().rows(), 3);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn restart_with_new_dimensions() {
        let mut session = GameSession::new(BoardConfig::new(3, 3, 1).unwrap());

        let board = session.restart_with(8, 10, 12).unwrap();

        assert_eq!((board.rows(), board.cols(), board.bombs_total()), (8, 10, 12));
        assert_eq!(board.bombs_remaining(), 12);
    }

    #[test]
    fn seeded_sessions_replay() {
        let config = BoardConfig::new(9, 9, 10).unwrap();
        let mut first = GameSession::with_seed(config, 42);
        let mut second = GameSession::with_seed(config, 42);
        assert_eq!(bomb_coords(first.board()), bomb_coords(second.board()));

        first.restart_same();
        second.restart_same();
        assert_eq!(bomb_coords(first.board()), bomb_coords(second.board()));
    }
}
