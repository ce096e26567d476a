//! Board state validation logic

use std::collections::HashSet;

use super::board::{Board, Player};

impl Board {
    /// Check if the board could arise from legal play starting at the empty board
    pub fn is_valid(&self) -> bool {
        let count = self.count_pieces();

        // X opens, so X equals O or leads by exactly one
        if !(count.x == count.o || count.x == count.o + 1) {
            return false;
        }

        let x_wins = self.has_won(Player::X);
        let o_wins = self.has_won(Player::O);

        if x_wins && o_wins {
            return false;
        }

        // The winner moved last
        if x_wins && count.x != count.o + 1 {
            return false;
        }
        if o_wins && count.x != count.o {
            return false;
        }

        true
    }

    /// Every board reachable from the empty board, terminal boards included.
    ///
    /// Play stops at terminal boards, so no board past a win is produced.
    pub fn reachable_boards() -> Vec<Board> {
        let mut boards = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![Board::new()];

        while let Some(board) = stack.pop() {
            if !seen.insert(board) {
                continue;
            }
            boards.push(board);

            if board.is_terminal() {
                continue;
            }
            stack.extend(board.successors().map(|(_, next)| next));
        }

        boards
    }
}
