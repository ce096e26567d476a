//! Tic-Tac-Toe board rules

pub mod board;
pub mod game;
pub mod lines;
pub mod validation;

pub use board::{Board, Cell, Move, PieceCount, Player, Utility};
pub use game::{Game, GameOutcome, PlayedMove};
pub use lines::{LineAnalyzer, WINNING_LINES};

/// The empty starting board
pub fn initial_state() -> Board {
    Board::new()
}
