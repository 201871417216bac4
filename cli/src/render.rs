use core::fmt::Write as _;
use mineboard_core::*;

fn face_text(face: Face) -> &'static str {
    match face {
        Face::Neutral => ":)",
        Face::Won => "B)",
        Face::Lost => "X(",
    }
}

fn cell_glyph(board: &Board, cell: &Cell) -> char {
    use CellStatus::*;
    let coords = cell.coords();
    match cell.status() {
        Hidden if board.is_chord_previewed(coords).unwrap_or(false) => '_',
        Hidden => '.',
        Pressed => '_',
        Flagged => 'F',
        WronglyFlagged => 'X',
        Exploded => '#',
        Revealed if cell.has_bomb() => '*',
        Revealed => match board.adjacent_bombs(coords).unwrap_or(0) {
            0 => ' ',
            count => char::from(b'0' + count),
        },
    }
}

/// Panel line followed by the grid, 1-based labels on both axes.
pub fn board_text(board: &Board) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "[{}]  {}  [{}]",
        bomb_counter_text(board.bombs_remaining()),
        face_text(Face::for_status(board.status())),
        timer_text(board.status(), board.elapsed()),
    );

    s.push_str("     ");
    for col in 0..board.cols() {
        let _ = write!(s, "{:>3}", col + 1);
    }
    s.push('\n');
    s.push_str("    ");
    s.push_str(&"-".repeat(usize::from(board.cols()) * 3 + 1));
    s.push('\n');

    for row in 0..board.rows() {
        let _ = write!(s, "{:>3} |", row + 1);
        for col in 0..board.cols() {
            if let Ok(cell) = board.cell((row, col)) {
                let _ = write!(s, "{:>3}", cell_glyph(board, cell));
            }
        }
        s.push('\n');
    }
    s
}
