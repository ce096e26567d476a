//! Perfect-play Tic-Tac-Toe
//!
//! This crate provides:
//! - The board rules: turn inference, legal moves, move application, win and
//!   terminal detection, utility scoring
//! - Exhaustive minimax search for the optimal move
//! - A game record type and board validation helpers
//! - A small command-line host (`tictactoe` binary)
//!
//! ```
//! use tictactoe_solver::{Move, initial_state, optimal_move};
//!
//! let board = initial_state();
//! let mv = optimal_move(&board).unwrap();
//! let next = board.apply_move(mv).unwrap();
//! assert_eq!(next.legal_moves().len(), 8);
//! assert_eq!(mv, Move::new(0, 0));
//! ```

pub mod cli;
pub mod error;
pub mod minimax;
pub mod tictactoe;

pub use error::{Error, Result};
pub use minimax::{
    Analysis, Minimax, ScoredMove, maximize, minimize, optimal_move, optimal_moves, play_out,
};
pub use tictactoe::{
    Board, Cell, Game, GameOutcome, Move, PlayedMove, Player, Utility, initial_state,
};
