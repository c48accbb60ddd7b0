//! Sliding-tile puzzle CLI.
//!
//! Commands:
//! - solve: print a minimum-move solution for each puzzle file
//! - gen: print a random puzzle in the input format
//! - play: slide tiles interactively in the terminal

use std::mem;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::{Key, Term};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use slider_solver::scramble::{ScrambleConfig, Scrambler};
use slider_solver::{Board, Direction, Solver};

/// Rounds between two spinner updates.
const SPINNER_INTERVAL: usize = 1 << 12;

#[derive(Parser)]
#[command(name = "slider")]
#[command(version)]
#[command(about = "Optimal sliding-tile puzzle solver")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve puzzle files
    Solve {
        /// Puzzle files: `n` followed by `n * n` tiles, 0 being the blank
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the move count and blank moves instead of every board
        #[arg(long)]
        moves_only: bool,
    },

    /// Generate a random puzzle
    Gen {
        /// Board dimension
        #[arg(short = 'n', long, default_value = "3")]
        size: usize,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Scramble by a random walk of this many blank moves (always solvable)
        #[arg(long)]
        walk: Option<usize>,
    },

    /// Play a puzzle in the terminal
    Play {
        /// Puzzle file
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install the tracing subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Solve { files, moves_only } => solve(&files, moves_only),
        Commands::Gen { size, seed, walk } => {
            let board = Scrambler::new(ScrambleConfig { size, seed, walk })
                .generate()
                .context("Failed to generate a puzzle")?;
            print!("{}", board.to_input());
            Ok(())
        }
        Commands::Play { file } => play(&file),
    }
}

fn load_board(path: &Path) -> Result<Board> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    data.parse::<Board>()
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn solve(files: &[PathBuf], moves_only: bool) -> Result<()> {
    if let [path] = files {
        let board = load_board(path)?;
        let solver = solve_with_spinner(board)?;
        print!("{}", report(&solver, moves_only));
        return Ok(());
    }

    info!(count = files.len(), "Solving in parallel");
    let reports = files
        .par_iter()
        .map(|path| -> Result<String> {
            let solver = Solver::new(load_board(path)?);
            debug!(path = %path.display(), rounds = solver.rounds(), "Solved");
            Ok(format!("{}:\n{}", path.display(), report(&solver, moves_only)))
        })
        .collect::<Result<Vec<_>>>()?;
    println!("{}", reports.join("\n"));
    Ok(())
}

fn solve_with_spinner(board: Board) -> Result<Solver> {
    let spinner = if Term::stderr().is_term() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    spinner.set_style(ProgressStyle::with_template(
        "{spinner} [{elapsed_precise}] round {pos} {msg}",
    )?);

    let solver = Solver::with_progress(board, |round| {
        if round.index % SPINNER_INTERVAL == 0 {
            spinner.set_position(round.index as u64);
            spinner.set_message(format!("priority {}", round.primal_priority));
        }
    });
    spinner.finish_and_clear();
    Ok(solver)
}

fn report(solver: &Solver, moves_only: bool) -> String {
    let (Some(boards), Some(dirs)) = (solver.solution(), solver.directions()) else {
        return "No solution possible\n".to_owned();
    };

    let mut out = format!("Minimum number of moves = {}\n", boards.len() - 1);
    if moves_only {
        out.extend(dirs.iter().map(|dir| dir.letter()));
        out.push('\n');
    } else {
        for board in boards {
            out.push('\n');
            out.push_str(&board.to_string());
        }
    }
    out
}

enum Action {
    Exit,
    Slide(Direction),
    Undo,
    Reset,
    Hint,
}

impl TryFrom<Key> for Action {
    type Error = ();

    fn try_from(key: Key) -> Result<Self, Self::Error> {
        Ok(match key {
            Key::ArrowLeft | Key::Char('a') => Self::Slide(Direction::Left),
            Key::ArrowRight | Key::Char('d') => Self::Slide(Direction::Right),
            Key::ArrowUp | Key::Char('w') => Self::Slide(Direction::Up),
            Key::ArrowDown | Key::Char('s') => Self::Slide(Direction::Down),
            Key::Escape | Key::Char('q') => Self::Exit,
            Key::Char('z') => Self::Undo,
            Key::Char('r') => Self::Reset,
            Key::Char('h') => Self::Hint,
            _ => return Err(()),
        })
    }
}

fn play(path: &Path) -> Result<()> {
    let init_board = load_board(path)?;
    let mut board = init_board.clone();
    let mut history = Vec::new();

    let term = Term::stderr();
    eprintln!("Arrows/WASD move the blank, z: undo, r: reset, h: hint, q: quit");
    loop {
        eprintln!("{board}");
        if board.is_goal() {
            eprintln!("Solved after {} moves", history.len());
            break;
        }

        let action = loop {
            if let Ok(action) = Action::try_from(term.read_key()?) {
                break action;
            }
        };

        match action {
            Action::Exit => break,
            Action::Slide(dir) => {
                if let Some(next) = board.slide(dir) {
                    history.push(mem::replace(&mut board, next));
                }
            }
            Action::Undo => {
                if let Some(last_board) = history.pop() {
                    board = last_board;
                }
            }
            Action::Reset => {
                history.clear();
                board = init_board.clone();
            }
            Action::Hint => {
                let solver = Solver::new(board.clone());
                match solver.directions().and_then(|dirs| dirs.first().copied()) {
                    Some(dir) => eprintln!(
                        "Hint: {dir} ({} moves left)",
                        solver.moves().unwrap_or_default(),
                    ),
                    None => eprintln!("No solution possible"),
                }
            }
        }
    }

    Ok(())
}
