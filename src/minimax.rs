//! Exhaustive minimax search over the Tic-Tac-Toe game tree
//!
//! X maximizes utility and O minimizes it. The search walks every line of play
//! to the end: no pruning, no transposition table, no heuristic cut-off. The
//! tree has at most 549,946 nodes and depth 9, so brute force is cheap.
//!
//! Moves are scanned in row-major order and a move replaces the current best
//! only when strictly better, so among equally good moves the first in
//! row-major order wins.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::tictactoe::{Board, Game, Move, Player, Utility};

/// A root move and the value it leads to under perfect play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    #[serde(flatten)]
    pub mv: Move,
    pub value: Utility,
}

/// Full result of searching one non-terminal position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    /// Player to act
    pub player: Player,
    /// Game value under perfect play, from X's perspective
    pub value: Utility,
    /// Move chosen by the row-major tie-break
    pub best_move: Move,
    /// Every legal move with its value, row-major
    pub moves: Vec<ScoredMove>,
    /// Positions visited, root included
    pub nodes: u64,
}

impl Analysis {
    /// All moves achieving the game value, row-major
    pub fn optimal_moves(&self) -> Vec<Move> {
        self.moves
            .iter()
            .filter(|scored| scored.value == self.value)
            .map(|scored| scored.mv)
            .collect()
    }
}

/// Minimax searcher.
///
/// Holds only a node counter, so create one per search (or reuse it and read
/// the cumulative count). Searching never mutates the boards it is given.
#[derive(Debug, Default)]
pub struct Minimax {
    nodes: u64,
}

impl Minimax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions visited since this searcher was created
    pub fn nodes_visited(&self) -> u64 {
        self.nodes
    }

    /// Optimal move for the player to act, `None` on a terminal board
    pub fn optimal_move(&mut self, board: &Board) -> Option<Move> {
        self.analyze(board).map(|analysis| analysis.best_move)
    }

    /// Score every root move and pick the best one.
    ///
    /// Returns `None` on a terminal board.
    pub fn analyze(&mut self, board: &Board) -> Option<Analysis> {
        if board.is_terminal() {
            return None;
        }

        let start = self.nodes;
        self.nodes += 1;

        let player = board.next_player();
        let mut moves = Vec::new();
        let mut best: Option<ScoredMove> = None;

        for (mv, child) in board.successors() {
            let value = if player.is_maximizer() {
                self.minimize(&child)
            } else {
                self.maximize(&child)
            };
            trace!(%mv, value, "root move scored");

            let scored = ScoredMove { mv, value };
            let improves = match best {
                None => true,
                Some(current) if player.is_maximizer() => value > current.value,
                Some(current) => value < current.value,
            };
            if improves {
                best = Some(scored);
            }
            moves.push(scored);
        }

        let best = best?;
        let nodes = self.nodes - start;
        debug!(%player, best_move = %best.mv, value = best.value, nodes, "search complete");

        Some(Analysis {
            player,
            value: best.value,
            best_move: best.mv,
            moves,
            nodes,
        })
    }

    /// Best value X can force from here, assuming X acts on this board
    pub fn maximize(&mut self, board: &Board) -> Utility {
        self.nodes += 1;
        if board.is_terminal() {
            return board.utility();
        }

        let mut value = Utility::MIN;
        for (_, child) in board.successors() {
            value = value.max(self.minimize(&child));
        }
        value
    }

    /// Best value O can force from here, assuming O acts on this board
    pub fn minimize(&mut self, board: &Board) -> Utility {
        self.nodes += 1;
        if board.is_terminal() {
            return board.utility();
        }

        let mut value = Utility::MAX;
        for (_, child) in board.successors() {
            value = value.min(self.maximize(&child));
        }
        value
    }

    /// Game value with the player to act choosing first
    pub fn value(&mut self, board: &Board) -> Utility {
        match board.next_player() {
            Player::X => self.maximize(board),
            Player::O => self.minimize(board),
        }
    }
}

/// Optimal move for the player to act, `None` on a terminal board
pub fn optimal_move(board: &Board) -> Option<Move> {
    Minimax::new().optimal_move(board)
}

/// Every move achieving the game value, row-major; empty on a terminal board
pub fn optimal_moves(board: &Board) -> Vec<Move> {
    Minimax::new()
        .analyze(board)
        .map(|analysis| analysis.optimal_moves())
        .unwrap_or_default()
}

/// Best value X can force, with X acting on `board`
pub fn maximize(board: &Board) -> Utility {
    Minimax::new().maximize(board)
}

/// Best value O can force, with O acting on `board`
pub fn minimize(board: &Board) -> Utility {
    Minimax::new().minimize(board)
}

/// Play optimal moves for both sides from `board` until the game ends
pub fn play_out(board: Board) -> crate::Result<Game> {
    let mut game = Game::from_board(board);
    let mut search = Minimax::new();

    while let Some(mv) = search.optimal_move(&game.current_state()?) {
        game.play(mv)?;
    }

    Ok(game)
}
