use anyhow::{Context, Result, anyhow, bail};
use core::str::FromStr;
use mineboard_core::{CellCount, Coord, Coord2, Gesture};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    /// Coordinates are already converted to zero-based.
    Gesture(Gesture, Coord2),
    Restart(Option<(Coord, Coord, CellCount)>),
    Snapshot,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands (rows and columns are 1-based):
  r ROW COL          reveal a cell
  f ROW COL          toggle a flag
  c ROW COL          reveal around a satisfied number
  n [ROWS COLS BOMBS] new game, same settings when omitted
  s                  print the board state as JSON
  h                  show this help
  q                  quit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = parts.split_first() else {
            bail!("Empty command, type 'h' for help");
        };

        match name.to_lowercase().as_str() {
            "q" | "quit" | "exit" => Ok(Self::Quit),
            "h" | "help" => Ok(Self::Help),
            "s" | "state" => Ok(Self::Snapshot),
            "r" | "reveal" => Ok(Self::Gesture(Gesture::Primary, parse_coords(args)?)),
            "f" | "flag" => Ok(Self::Gesture(Gesture::Secondary, parse_coords(args)?)),
            "c" | "chord" => Ok(Self::Gesture(Gesture::Chord, parse_coords(args)?)),
            "n" | "new" => match args {
                [] => Ok(Self::Restart(None)),
                [rows, cols, bombs] => Ok(Self::Restart(Some((
                    parse_number(rows, "rows")?,
                    parse_number(cols, "cols")?,
                    parse_number(bombs, "bombs")?,
                )))),
                _ => bail!("Usage: n [ROWS COLS BOMBS]"),
            },
            other => Err(anyhow!("Unknown command '{other}', type 'h' for help")),
        }
    }
}

fn parse_coords(args: &[&str]) -> Result<Coord2> {
    let [row, col] = args else {
        bail!("Expected ROW COL");
    };
    let row: Coord = parse_number(row, "row")?;
    let col: Coord = parse_number(col, "col")?;
    if row == 0 || col == 0 {
        bail!("Use 1-based coordinates");
    }
    Ok((row - 1, col - 1))
}

fn parse_number<T: FromStr>(text: &str, what: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.parse().with_context(|| format!("Invalid {what} '{text}'"))
}
