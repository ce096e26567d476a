//! Winning line analysis for Tic-Tac-Toe

use super::board::{Cell, Move, Player};

/// The eight winning lines as `(row, col)` triples.
///
/// Order is fixed: rows top to bottom, columns left to right, then the main
/// diagonal and the anti-diagonal. Winner detection scans in this order.
pub const WINNING_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)], // rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)], // columns
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Owner of a line, if all three cells hold the same mark
    pub fn line_owner(cells: &[[Cell; 3]; 3], line: &[(usize, usize); 3]) -> Option<Player> {
        let [(r0, c0), (r1, c1), (r2, c2)] = *line;
        let first = cells[r0][c0];
        if first == cells[r1][c1] && first == cells[r2][c2] {
            first.to_player()
        } else {
            None
        }
    }

    /// Owner of the first completed line in [`WINNING_LINES`] order
    pub fn winner(cells: &[[Cell; 3]; 3]) -> Option<Player> {
        WINNING_LINES
            .iter()
            .find_map(|line| Self::line_owner(cells, line))
    }

    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[[Cell; 3]; 3], player: Player) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| Self::line_owner(cells, line) == Some(player))
    }

    /// All cells that would immediately complete a line for the player, row-major
    pub fn winning_moves(cells: &[[Cell; 3]; 3], player: Player) -> Vec<Move> {
        let mut moves: Vec<Move> = WINNING_LINES
            .iter()
            .filter_map(|line| Self::winning_move_in_line(cells, player, line))
            .collect();
        moves.sort_unstable_by_key(|mv| mv.index());
        moves.dedup();
        moves
    }

    /// Find the completing cell in a specific line, if the player holds the other two
    fn winning_move_in_line(
        cells: &[[Cell; 3]; 3],
        player: Player,
        line: &[(usize, usize); 3],
    ) -> Option<Move> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty = None;

        for &(row, col) in line {
            match cells[row][col] {
                Cell::Empty => {
                    if empty.is_some() {
                        return None;
                    }
                    empty = Some(Move::new(row, col));
                }
                c if c == target => count += 1,
                _ => return None,
            }
        }

        if count == 2 { empty } else { None }
    }
}
