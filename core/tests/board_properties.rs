use std::collections::{BTreeSet, VecDeque};

use mineboard_core::{
    Board, BoardConfig, BoardError, BoardStatus, Cell, CellStatus, ConfigError, Coord, Coord2,
    Gesture, RevealOutcome,
};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = BoardConfig> {
    (1u16..=12, 1u16..=12).prop_flat_map(|(rows, cols)| {
        let cells = u32::from(rows) * u32::from(cols);
        (0..=cells).prop_map(move |bombs| BoardConfig::new(rows, cols, bombs).unwrap())
    })
}

fn config_with_safe_cell() -> impl Strategy<Value = BoardConfig> {
    config_strategy().prop_filter("needs at least one bomb-free cell", |config| {
        config.bombs() < config.total_cells()
    })
}

fn pick_coords(config: BoardConfig, pick: &prop::sample::Index) -> Coord2 {
    let index = pick.index(config.total_cells() as usize);
    let cols = usize::from(config.cols());
    ((index / cols) as Coord, (index % cols) as Coord)
}

fn neighbors((row, col): Coord2, (rows, cols): Coord2) -> Vec<Coord2> {
    let mut out = Vec::new();
    for d_row in -1i32..=1 {
        for d_col in -1i32..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            let next_row = i32::from(row) + d_row;
            let next_col = i32::from(col) + d_col;
            let in_rows = (0..i32::from(rows)).contains(&next_row);
            let in_cols = (0..i32::from(cols)).contains(&next_col);
            if in_rows && in_cols {
                out.push((next_row as Coord, next_col as Coord));
            }
        }
    }
    out
}

fn bomb_count(board: &Board) -> u32 {
    board.cells().filter(|cell| cell.has_bomb()).count() as u32
}

proptest! {
    #[test]
    fn construction_places_exact_bomb_count(config in config_strategy(), seed in any::<u64>()) {
        let board = Board::with_seed(config, seed);

        prop_assert_eq!(bomb_count(&board), config.bombs());
        prop_assert_eq!(board.bombs_remaining(), config.bombs() as isize);
        prop_assert_eq!(board.status(), BoardStatus::NotStarted);
    }

    #[test]
    fn too_many_bombs_never_builds(rows in 1u16..40, cols in 1u16..40, extra in 1u32..100) {
        let bombs = u32::from(rows) * u32::from(cols) + extra;

        let is_too_many = matches!(
            BoardConfig::new(rows, cols, bombs),
            Err(BoardError::InvalidConfiguration(ConfigError::TooManyBombs { .. }))
        );
        prop_assert!(is_too_many);
    }

    #[test]
    fn first_reveal_never_loses(
        config in config_with_safe_cell(),
        seed in any::<u64>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut board = Board::with_seed(config, seed);
        let coords = pick_coords(config, &pick);

        let outcome = board.primary_activate(coords).unwrap();

        prop_assert_ne!(outcome, RevealOutcome::HitBomb);
        prop_assert_ne!(board.status(), BoardStatus::Lost);
        prop_assert_eq!(board.cell(coords).unwrap().status(), CellStatus::Revealed);
        prop_assert_eq!(bomb_count(&board), config.bombs());
    }

    #[test]
    fn first_reveal_opens_exactly_the_zero_region(
        config in config_with_safe_cell(),
        seed in any::<u64>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut board = Board::with_seed(config, seed);
        let start = pick_coords(config, &pick);
        board.primary_activate(start).unwrap();

        let size = config.size();
        let has_bomb = |coords: Coord2| board.cell(coords).unwrap().has_bomb();
        let adjacent = |coords: Coord2| {
            neighbors(coords, size)
                .into_iter()
                .filter(|&pos| has_bomb(pos))
                .count()
        };

        let mut expected = BTreeSet::from([start]);
        let mut queue = VecDeque::new();
        if adjacent(start) == 0 {
            queue.push_back(start);
        }
        while let Some(coords) = queue.pop_front() {
            for pos in neighbors(coords, size) {
                if expected.insert(pos) && adjacent(pos) == 0 {
                    queue.push_back(pos);
                }
            }
        }

        let revealed: BTreeSet<Coord2> = board
            .cells()
            .filter(|cell| cell.status() == CellStatus::Revealed)
            .map(Cell::coords)
            .collect();
        prop_assert_eq!(revealed, expected);
    }

    #[test]
    fn flag_twice_is_identity(
        config in config_strategy(),
        seed in any::<u64>(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut board = Board::with_seed(config, seed);
        let coords = pick_coords(config, &pick);

        board.secondary_activate(coords).unwrap();
        prop_assert_eq!(board.bombs_remaining(), config.bombs() as isize - 1);
        board.secondary_activate(coords).unwrap();

        prop_assert_eq!(board.cell(coords).unwrap().status(), CellStatus::Hidden);
        prop_assert_eq!(board.bombs_remaining(), config.bombs() as isize);
    }

    #[test]
    fn finished_games_stay_finished(
        config in config_strategy(),
        seed in any::<u64>(),
        picks in prop::collection::vec((any::<prop::sample::Index>(), 0u8..3), 1..40),
    ) {
        let mut board = Board::with_seed(config, seed);
        let mut finished_as = None;

        for (pick, gesture) in &picks {
            let gesture = match gesture {
                0 => Gesture::Primary,
                1 => Gesture::Secondary,
                _ => Gesture::Chord,
            };
            board.apply_gesture(pick_coords(config, pick), gesture).unwrap();

            if let Some(status) = finished_as {
                prop_assert_eq!(board.status(), status);
            } else if board.is_finished() {
                finished_as = Some(board.status());
            }
            prop_assert_eq!(bomb_count(&board), config.bombs());
        }
    }
}
