//! Selfplay command - Play perfect moves for both sides

use std::fmt::Write;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{describe_outcome, indent, write_kv, write_section},
    minimax::play_out,
    tictactoe::{Board, Game},
};

#[derive(Parser, Debug)]
#[command(about = "Play optimal moves for both sides until the game ends")]
pub struct SelfplayArgs {
    /// Starting board as 9 cells, row-major
    #[arg(long, short = 'b', default_value = ".........")]
    pub board: String,
}

pub fn execute(args: SelfplayArgs) -> Result<()> {
    let board = Board::from_string(&args.board)?;
    let game = play_out(board)?;
    print!("{}", render(&game)?);
    Ok(())
}

/// Board after every move, then the move count and outcome
pub fn render(game: &Game) -> Result<String> {
    let states = game.state_sequence()?;
    let mut out = String::new();

    write_section(&mut out, "Self-play")?;
    writeln!(out, "Start:\n{}", indent(&states[0].to_string(), 2))?;

    for (played, state) in game.moves.iter().zip(&states[1..]) {
        writeln!(out, "\n{} plays {}:", played.player, played.mv)?;
        writeln!(out, "{}", indent(&state.to_string(), 2))?;
    }

    writeln!(out)?;
    write_kv(&mut out, "Moves played", game.moves.len())?;
    write_kv(&mut out, "Outcome", describe_outcome(game.outcome))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shows_each_move() {
        let game = play_out(Board::from_string("XX.OO....").unwrap()).unwrap();
        let text = render(&game).unwrap();

        assert!(text.contains("Start:\n  XX.\n  OO.\n  ..."));
        assert!(text.contains("X plays (0, 2):\n  XXX\n  OO.\n  ..."));
        assert!(text.contains("Moves played:        1"));
        assert!(text.contains("Outcome:             X wins"));
    }

    #[test]
    fn test_render_terminal_start() {
        let game = play_out(Board::from_string("XOXXOOOXX").unwrap()).unwrap();
        let text = render(&game).unwrap();

        assert!(!text.contains(" plays "));
        assert!(text.contains("Moves played:        0"));
        assert!(text.contains("Outcome:             draw"));
    }
}
