//! Command-line host for the solver
//!
//! The commands only parse input, call the library and print results; all
//! game logic lives in [`crate::tictactoe`] and [`crate::minimax`].

pub mod commands;
pub mod config;
pub mod output;
