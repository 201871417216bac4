use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use mineboard_core::{Board, BoardConfig, BoardEvent, CellCount, Coord, GameSession, timer_text};

use crate::command::{Command, HELP};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(name = "mineboard", version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board height
    #[arg(long, default_value_t = 9)]
    rows: Coord,

    /// Board width
    #[arg(long, default_value_t = 9)]
    cols: Coord,

    /// Number of bombs
    #[arg(long, default_value_t = 10)]
    bombs: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn announce(event: BoardEvent, board: &Board) {
    match event {
        BoardEvent::Started => log::info!("Game started"),
        BoardEvent::Won => println!(
            "You cleared the board! Time: {}",
            timer_text(board.status(), board.elapsed())
        ),
        BoardEvent::Lost => println!("Boom! You hit a bomb. Type 'n' for a new game."),
    }
}

fn run_command(session: &mut GameSession, command: Command) -> Result<()> {
    match command {
        Command::Quit | Command::Help => {}
        Command::Snapshot => {
            let snapshot = session.board().snapshot();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::Restart(None) => {
            session.restart_same();
        }
        Command::Restart(Some((rows, cols, bombs))) => {
            session.restart_with(rows, cols, bombs)?;
        }
        Command::Gesture(gesture, coords) => {
            let outcome = session.board_mut().apply_gesture(coords, gesture)?;
            log::debug!("{:?} at {:?}: {:?}", gesture, coords, outcome);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("seed: {:?}", args.seed);

    let config = BoardConfig::new(args.rows, args.cols, args.bombs)
        .context("Invalid board settings")?;
    let mut session = match args.seed {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    };

    println!("{HELP}");
    let mut stdin = io::stdin().lock();
    let mut line = String::new();
    loop {
        print!("\n{}> ", render::board_text(session.board()));
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err:#}");
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            _ => {}
        }
        if let Err(err) = run_command(&mut session, command) {
            println!("{err:#}");
        }

        for event in session.take_events() {
            log::info!("{:?}", event);
        }
        let events = session.board_mut().take_events();
        for event in events {
            announce(event, session.board());
        }
    }

    Ok(())
}
