//! Command-line front end: reads a FEN position, searches it to a
//! given depth, and prints the chosen move.

use std::process::exit;
use std::time::Instant;

use clap::Parser;
use log::debug;
use shakmaty::Color;
use thiserror::Error;

use tacet::position::GamePosition;
use tacet::search::choose_move;

/// Beyond this many plies the search becomes impractically slow for a
/// one-shot CLI invocation; depths above this are rejected up front
/// rather than left to run indefinitely.
const MAX_DEPTH: u32 = 8;

/// Search a chess position and print the best move found.
#[derive(Parser)]
#[command(name = "tacet", version, about)]
struct Cli {
    /// Position to search, in FEN. Defaults to the standard starting
    /// position.
    #[arg(long, default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")]
    fen: String,

    /// Plies to search before the quiescence extension takes over.
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Side to search for. Defaults to whichever side the FEN says is
    /// to move.
    #[arg(long)]
    side: Option<SideArg>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum SideArg {
    White,
    Black,
}

impl From<SideArg> for Color {
    fn from(side: SideArg) -> Color {
        match side {
            SideArg::White => Color::White,
            SideArg::Black => Color::Black,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("'{0}' is not a valid FEN: {1}")]
    InvalidFen(String, String),
    #[error("the position is already over, there is no move to choose")]
    AlreadyTerminal,
    #[error("requested side {requested:?} does not match the side to move ({actual:?})")]
    SideMismatch { requested: Color, actual: Color },
    #[error("depth {0} is out of range (must be between 1 and {MAX_DEPTH})")]
    DepthOutOfRange(u32),
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.depth == 0 || cli.depth > MAX_DEPTH {
        return Err(CliError::DepthOutOfRange(cli.depth));
    }

    let position = GamePosition::try_from_fen(&cli.fen)
        .map_err(|reason| CliError::InvalidFen(cli.fen.clone(), reason))?;

    if position.is_terminal() {
        return Err(CliError::AlreadyTerminal);
    }

    let to_move = position.side_to_move();
    let side: Color = cli.side.map(Into::into).unwrap_or(to_move);
    if side != to_move {
        return Err(CliError::SideMismatch {
            requested: side,
            actual: to_move,
        });
    }

    let started = Instant::now();
    let chosen = choose_move(&position, side, cli.depth);
    let elapsed = started.elapsed();

    match chosen {
        Some(m) => {
            // choose_move already logs the move, score, depth and node
            // count at INFO; this is just the CLI-level timing detail.
            debug!("searched depth {} in {:?}", cli.depth, elapsed);
            println!("{}", tacet::position::to_uci(&m));
            Ok(())
        }
        None => Err(CliError::AlreadyTerminal),
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        exit(1);
    }
}
