//! Output formatting and progress bars for CLI

use std::fmt::{self, Display, Write};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::tictactoe::{GameOutcome, Utility};

/// Create a progress bar for a batch of games
pub fn create_game_progress(total_games: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

const RULE_WIDTH: usize = 60;

/// Write a section title framed by `=` rules
pub fn write_section(out: &mut impl Write, title: &str) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}\n{title}\n{rule}")
}

/// Write a subsection title underlined with `-`
pub fn write_subsection(out: &mut impl Write, title: &str) -> fmt::Result {
    writeln!(out, "\n{title}\n{}", "-".repeat(RULE_WIDTH / 2))
}

/// Write an aligned `key: value` line
pub fn write_kv(out: &mut impl Write, key: &str, value: impl Display) -> fmt::Result {
    writeln!(out, "  {:<20} {value}", format!("{key}:"))
}

/// Group digits in threes: `549946` becomes `549,946`
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let lead = digits.len() % 3;
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Human-readable meaning of a utility value
pub fn describe_value(value: Utility) -> &'static str {
    match value {
        v if v > 0 => "X wins",
        v if v < 0 => "O wins",
        _ => "draw",
    }
}

/// Human-readable game outcome
pub fn describe_outcome(outcome: Option<GameOutcome>) -> String {
    match outcome {
        Some(GameOutcome::Win(player)) => format!("{player} wins"),
        Some(GameOutcome::Draw) => "draw".to_string(),
        None => "in progress".to_string(),
    }
}

/// Indent every line of a multi-line block
pub fn indent(block: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    block
        .lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
