//! Gemfall: a match-3 board engine.
//!
//! ## Usage
//!
//! - `gemfall` - Play a short demo
//! - `gemfall shell` - Start the text command protocol on stdin/stdout
//! - `gemfall demo --moves 5` - Play the demo for a number of moves
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemfall::config::BoardConfig;
use gemfall::constants::{DEFAULT_GEM_TYPES, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use gemfall::game::Game;
use gemfall::gem::Pos;
use gemfall::shell::{Shell, format_rounds};
use gemfall::swap::SwapOutcome;

/// Gemfall: a match-3 board engine
#[derive(Parser)]
#[command(name = "gemfall")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    board: BoardArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct BoardArgs {
    /// Board width in columns
    #[arg(long, global = true, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Board height in rows
    #[arg(long, global = true, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Number of gem types in play (3 to 5)
    #[arg(long, global = true, default_value_t = DEFAULT_GEM_TYPES)]
    gem_types: usize,

    /// Random seed; drawn at random when omitted
    #[arg(long, global = true)]
    seed: Option<u64>,
}

impl BoardArgs {
    fn config(&self) -> BoardConfig {
        let seed = self.seed.unwrap_or_else(|| fastrand::u64(..));
        BoardConfig::new(self.width, self.height, self.gem_types, seed)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin and answer on stdout
    Shell,
    /// Play the first matching swap repeatedly and print each cascade
    Demo {
        /// Number of swaps to play
        #[arg(long, default_value_t = 3)]
        moves: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.board.config();

    match cli.command {
        Some(Commands::Shell) => {
            let mut shell = Shell::new(config).context("failed to create board")?;
            shell.run().context("shell I/O failed")?;
        }
        Some(Commands::Demo { moves }) => run_demo(&config, moves)?,
        None => run_demo(&config, 3)?,
    }
    Ok(())
}

fn run_demo(config: &BoardConfig, moves: usize) -> Result<()> {
    let mut game = Game::new(config).context("failed to create board")?;
    println!("Gemfall: {}x{} board, seed {}\n", config.width, config.height, config.seed);
    println!("{}", game.board());

    for n in 1..=moves {
        let Some((a, b, report)) = play_first_swap(&mut game)? else {
            println!("No swap makes a match; board is stuck.");
            break;
        };
        println!("Move {n}: swap {a:?} <-> {b:?}");
        println!("{report}\n");
        println!("{}", game.board());
    }
    Ok(())
}

/// Try every right and up neighbor pair in raster order and keep the first
/// swap that commits. Rejected attempts leave the board unchanged.
fn play_first_swap(game: &mut Game) -> Result<Option<(Pos, Pos, String)>> {
    let (w, h) = (game.width(), game.height());
    for row in 0..h {
        for col in 0..w {
            let a = (col, row);
            for b in [(col + 1, row), (col, row + 1)] {
                if b.0 >= w || b.1 >= h {
                    continue;
                }
                if let SwapOutcome::Committed { rounds } = game.attempt_swap(a, b)? {
                    info!(?a, ?b, rounds = rounds.len(), "demo move");
                    return Ok(Some((a, b, format_rounds(&rounds))));
                }
            }
        }
    }
    Ok(None)
}
