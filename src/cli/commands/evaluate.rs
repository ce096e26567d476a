//! Evaluate command - Play the solver against a random opponent

use std::{
    collections::HashMap,
    fmt,
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use clap::Parser;
use indicatif::ProgressBar;
use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};
use serde::Serialize;
use tracing::info;

use crate::{
    cli::{
        commands::parse_player_token,
        config::EvaluationConfig,
        output::{create_game_progress, write_kv, write_section},
    },
    minimax::Minimax,
    tictactoe::{Board, Game, GameOutcome, Move},
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate the solver against a random opponent")]
pub struct EvaluateArgs {
    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Which mark the solver plays (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub solver: String,

    /// Export results to a JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Tallies from the solver's point of view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl EvaluationResult {
    fn record(&mut self, outcome: GameOutcome, config: &EvaluationConfig) {
        self.total_games += 1;
        match outcome {
            GameOutcome::Win(player) if player == config.solver => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let mut config = EvaluationConfig::default()
        .with_games(args.games)
        .with_solver(parse_player_token(&args.solver, "--solver")?);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    print!("{}", render_config(&config)?);

    let progress = create_game_progress(config.games as u64)?;
    let result = run(&config, Some(&progress))?;
    progress.finish_with_message("done");

    print!("{}", render_results(&result)?);

    if let Some(path) = &args.export {
        export_results(&config, &result, path)?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}

fn render_config(config: &EvaluationConfig) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_section(&mut out, "Evaluation Configuration")?;
    write_kv(&mut out, "Solver plays", config.solver)?;
    write_kv(&mut out, "Opponent", "random")?;
    write_kv(&mut out, "Games", config.games)?;
    if let Some(seed) = config.seed {
        write_kv(&mut out, "Seed", seed)?;
    }
    Ok(out)
}

fn render_results(result: &EvaluationResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_section(&mut out, "Results")?;
    for (label, count) in [
        ("Wins", result.wins),
        ("Draws", result.draws),
        ("Losses", result.losses),
    ] {
        let percent = result.rate(count) * 100.0;
        write_kv(&mut out, label, format!("{count} ({percent:.1}%)"))?;
    }
    Ok(out)
}

/// Play `config.games` games of the solver against a uniformly random opponent
pub fn run(config: &EvaluationConfig, progress: Option<&ProgressBar>) -> Result<EvaluationResult> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // Positions repeat across games; search each one once.
    let mut cache: HashMap<Board, Move> = HashMap::new();
    let mut search = Minimax::new();
    let mut result = EvaluationResult::default();

    for _ in 0..config.games {
        let mut game = Game::new();

        while !game.is_over() {
            let board = game.current_state()?;
            let mv = if board.next_player() == config.solver {
                match cache.get(&board) {
                    Some(&mv) => mv,
                    None => {
                        let mv = search
                            .optimal_move(&board)
                            .ok_or_else(|| anyhow!("no move on non-terminal board\n{board}"))?;
                        cache.insert(board, mv);
                        mv
                    }
                }
            } else {
                let moves = board.legal_moves();
                *moves
                    .choose(&mut rng)
                    .ok_or_else(|| anyhow!("no legal move on non-terminal board\n{board}"))?
            };
            game.play(mv)?;
        }

        if let Some(outcome) = game.outcome {
            result.record(outcome, config);
        }
        if let Some(pb) = progress {
            pb.inc(1);
            pb.set_message(format!("W{} D{} L{}", result.wins, result.draws, result.losses));
        }
    }

    info!(
        games = result.total_games,
        wins = result.wins,
        draws = result.draws,
        losses = result.losses,
        nodes = search.nodes_visited(),
        "evaluation finished"
    );

    Ok(result)
}

fn export_results(config: &EvaluationConfig, result: &EvaluationResult, path: &Path) -> Result<()> {
    #[derive(Serialize)]
    struct EvaluationExport<'a> {
        config: &'a EvaluationConfig,
        opponent: &'static str,
        #[serde(flatten)]
        result: &'a EvaluationResult,
        win_rate: f64,
        draw_rate: f64,
        loss_rate: f64,
    }

    let export = EvaluationExport {
        config,
        opponent: "random",
        result,
        win_rate: result.rate(result.wins),
        draw_rate: result.rate(result.draws),
        loss_rate: result.rate(result.losses),
    };

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &export)?;
    Ok(())
}
