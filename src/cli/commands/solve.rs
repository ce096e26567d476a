//! Solve command - Show the optimal move for a position

use std::fmt::{self, Write};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output::{
        describe_outcome, describe_value, format_number, indent, write_kv, write_section,
        write_subsection,
    },
    minimax::{Analysis, Minimax},
    tictactoe::{Board, GameOutcome, Utility},
};

#[derive(Parser, Debug)]
#[command(about = "Compute the optimal move for a board")]
pub struct SolveArgs {
    /// Board as 9 cells, row-major (e.g. "XX.OO....", "XO.|.X.|..O")
    #[arg(long, short = 'b', default_value = ".........")]
    pub board: String,

    /// List the value of every legal move
    #[arg(long)]
    pub all: bool,

    /// Print the analysis as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// What `solve` reports for a board; the JSON form is tagged by `status`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolveReport {
    Terminal {
        board: String,
        outcome: Option<GameOutcome>,
        utility: Utility,
    },
    Searched {
        board: String,
        analysis: Analysis,
    },
}

impl SolveReport {
    pub fn new(board: &Board) -> Self {
        match Minimax::new().analyze(board) {
            Some(analysis) => Self::Searched {
                board: board.encode(),
                analysis,
            },
            None => Self::Terminal {
                board: board.encode(),
                outcome: GameOutcome::of(board),
                utility: board.utility(),
            },
        }
    }
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let board = Board::from_string(&args.board)?;
    let report = SolveReport::new(&board);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render(&board, &report, args.all)?);
    }

    Ok(())
}

/// Text form of a report; `all` adds the per-move value table
pub fn render(board: &Board, report: &SolveReport, all: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_section(&mut out, "Position")?;
    writeln!(out, "{}\n", indent(&board.to_string(), 2))?;

    let analysis = match report {
        SolveReport::Terminal {
            outcome, utility, ..
        } => {
            write_kv(&mut out, "Status", "terminal")?;
            write_kv(&mut out, "Outcome", describe_outcome(*outcome))?;
            write_kv(&mut out, "Utility", utility)?;
            return Ok(out);
        }
        SolveReport::Searched { analysis, .. } => analysis,
    };

    write_kv(&mut out, "To move", analysis.player)?;
    write_kv(&mut out, "Value", describe_value(analysis.value))?;
    write_kv(&mut out, "Optimal move", analysis.best_move)?;
    write_kv(&mut out, "Nodes searched", format_number(analysis.nodes))?;

    if all {
        write_subsection(&mut out, "Move values")?;
        for scored in &analysis.moves {
            let marker = if scored.mv == analysis.best_move { "*" } else { " " };
            writeln!(
                out,
                "  {marker} {}  {:>2}  {}",
                scored.mv,
                scored.value,
                describe_value(scored.value)
            )?;
        }
    }

    Ok(out)
}
