//! Tic-Tac-Toe solver CLI
//!
//! Thin host over the library:
//! - `solve`: optimal move and game value for a position
//! - `selfplay`: perfect play for both sides to the end of the game
//! - `evaluate`: the solver against a random opponent

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Perfect-play Tic-Tac-Toe solver", long_about = None)]
struct Cli {
    /// Log search details (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the optimal move for a board
    Solve(tictactoe_solver::cli::commands::solve::SolveArgs),

    /// Play optimal moves for both sides
    Selfplay(tictactoe_solver::cli::commands::selfplay::SelfplayArgs),

    /// Evaluate the solver against a random opponent
    Evaluate(tictactoe_solver::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve(args) => tictactoe_solver::cli::commands::solve::execute(args),
        Commands::Selfplay(args) => tictactoe_solver::cli::commands::selfplay::execute(args),
        Commands::Evaluate(args) => tictactoe_solver::cli::commands::evaluate::execute(args),
    }
}
