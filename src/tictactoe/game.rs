//! Game record: a starting board plus the moves played from it

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::board::{Board, Move, Player};

/// A move together with the player who made it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayedMove {
    #[serde(flatten)]
    pub mv: Move,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// Outcome of a terminal board, `None` while play continues
    pub fn of(board: &Board) -> Option<Self> {
        if let Some(winner) = board.winner() {
            Some(GameOutcome::Win(winner))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: Board,
    pub moves: Vec<PlayedMove>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the empty board
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Create a game starting at an arbitrary board
    pub fn from_board(initial: Board) -> Self {
        Game {
            initial,
            moves: Vec::new(),
            outcome: GameOutcome::of(&initial),
        }
    }

    /// Play a move for whoever is to act
    pub fn play(&mut self, mv: Move) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let current = self.current_state()?;
        let player = current.next_player();
        let next = current.apply_move(mv)?;

        self.moves.push(PlayedMove { mv, player });
        debug!(%player, %mv, ply = self.moves.len(), "move played");

        self.outcome = GameOutcome::of(&next);
        if let Some(outcome) = self.outcome {
            debug!(?outcome, "game finished");
        }

        Ok(())
    }

    /// Replay moves up to a given index (exclusive)
    fn replay_moves_until(&self, end_index: usize) -> Result<Board, crate::Error> {
        let mut board = self.initial;
        for m in self.moves.iter().take(end_index) {
            board = board.apply_move(m.mv)?;
        }
        Ok(board)
    }

    /// Get the current board
    ///
    /// # Errors
    ///
    /// Returns error if a recorded move targets an occupied cell, which means
    /// the history was edited by hand.
    pub fn current_state(&self) -> Result<Board, crate::Error> {
        self.replay_moves_until(self.moves.len())
    }

    /// Every board from the initial one to the current one
    ///
    /// # Errors
    ///
    /// Same as [`Game::current_state`].
    pub fn state_sequence(&self) -> Result<Vec<Board>, crate::Error> {
        let mut states = Vec::with_capacity(self.moves.len() + 1);
        let mut board = self.initial;
        states.push(board);

        for m in &self.moves {
            board = board.apply_move(m.mv)?;
            states.push(board);
        }

        Ok(states)
    }

    /// Whether the game has finished
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn play_all(game: &mut Game, moves: &[(usize, usize)]) {
        for &mv in moves {
            game.play(mv.into()).unwrap();
        }
    }

    #[test]
    fn test_win_sets_outcome() {
        let mut game = Game::new();
        play_all(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::X)));
        assert_eq!(game.moves.len(), 5);
        assert_eq!(game.moves[1].player, Player::O);
    }

    #[test]
    fn test_play_after_game_over_fails() {
        let mut game = Game::new();
        play_all(&mut game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

        let err = game.play(Move::new(2, 2)).unwrap_err();
        assert_eq!(err, Error::GameOver);
        assert_eq!(game.moves.len(), 5);
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_recording() {
        let mut game = Game::new();
        game.play(Move::new(1, 1)).unwrap();

        let err = game.play(Move::new(1, 1)).unwrap_err();
        assert_eq!(err, Error::InvalidMove { row: 1, col: 1 });
        assert_eq!(game.moves.len(), 1);
    }

    #[test]
    fn test_draw_outcome() {
        let mut game = Game::new();
        play_all(
            &mut game,
            &[
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 1),
                (1, 0),
                (2, 0),
                (1, 2),
                (2, 2),
                (2, 1),
            ],
        );
        assert_eq!(game.outcome, Some(GameOutcome::Draw));
    }

    #[test]
    fn test_state_sequence() {
        let mut game = Game::new();
        play_all(&mut game, &[(1, 1), (0, 0)]);

        let states = game.state_sequence().unwrap();
        assert_eq!(states.len(), 3);
        assert_eq!(states[0], Board::new());
        assert_eq!(states[2], game.current_state().unwrap());
        assert_eq!(states[2].encode(), "O...X....");
    }

    #[test]
    fn test_from_terminal_board_is_over() {
        let board = Board::from_string("XXXOO....").unwrap();
        let game = Game::from_board(board);
        assert!(game.is_over());
        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::X)));
    }
}
