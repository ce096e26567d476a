//! Shared configuration types for CLI commands

use serde::{Deserialize, Serialize};

use crate::tictactoe::Player;

/// Evaluation configuration: the solver against a uniformly random opponent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Number of evaluation games
    pub games: usize,

    /// Random seed for the opponent; `None` seeds from the OS
    pub seed: Option<u64>,

    /// Which mark the solver plays
    pub solver: Player,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: None,
            solver: Player::X,
        }
    }
}

impl EvaluationConfig {
    /// Set the number of games.
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set which mark the solver plays.
    pub fn with_solver(mut self, solver: Player) -> Self {
        self.solver = solver;
        self
    }
}
