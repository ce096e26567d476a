//! Board state representation and the rules of play

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::{Error, Result};

/// Terminal score from X's perspective: `1` X won, `-1` O won, `0` otherwise
pub type Utility = i32;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this mark, or `None` for an empty cell
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. X always moves first and maximizes utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    /// Whether this player maximizes utility during search
    pub fn is_maximizer(self) -> bool {
        self == Player::X
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A move, identified by the `(row, col)` of the cell it fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }

    /// Move for a row-major cell index (0-8)
    pub fn from_index(index: usize) -> Option<Self> {
        (index < 9).then(|| Move::new(index / 3, index % 3))
    }

    /// Row-major cell index of this move
    pub fn index(self) -> usize {
        self.row * 3 + self.col
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Move::new(row, col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Move {
    type Err = Error;

    /// Parse `"row,col"` or `"row col"`, each coordinate in 0-2.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCoordinate {
            input: s.to_string(),
        };

        let parts: Vec<&str> = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        let [row, col] = parts.as_slice() else {
            return Err(invalid());
        };

        let row: usize = row.parse().map_err(|_| invalid())?;
        let col: usize = col.parse().map_err(|_| invalid())?;
        if row > 2 || col > 2 {
            return Err(invalid());
        }

        Ok(Move::new(row, col))
    }
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceCount {
    pub x: usize,
    pub o: usize,
    pub empty: usize,
}

/// A 3x3 Tic-Tac-Toe board in row-major order.
///
/// `Board` is `Copy` (9 bytes). Applying a move returns a new board and never
/// touches the one it was derived from, so search can explore many futures
/// from a shared ancestor.
///
/// The player to act is not stored; it is inferred from the piece counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    pub cells: [[Cell; 3]; 3],
}

impl Board {
    /// Create the empty starting board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; 3]; 3],
        }
    }

    /// Wrap raw rows without checking the alternation invariant.
    ///
    /// Useful for analysing arbitrary positions; use [`Board::from_string`]
    /// when the input should be validated.
    pub fn from_rows(cells: [[Cell; 3]; 3]) -> Self {
        Board { cells }
    }

    /// Parse a board from its text form.
    ///
    /// The string must contain exactly 9 cell characters once whitespace and
    /// `|` separators are removed. `X`/`x` and `O`/`o`/`0` are marks; `.`,
    /// `_` and `-` are empty cells. So `"XO.|.X.|..O"` and `"XO. .X. ..O"`
    /// both parse.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The board does not have exactly 9 cell characters
    /// - Any character is not a valid cell representation
    /// - The piece counts break alternation (X must equal O or lead by one)
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_solver::{Board, Player};
    ///
    /// let board = Board::from_string("XX.OO....").unwrap();
    /// assert_eq!(board.next_player(), Player::X);
    /// assert!(Board::from_string("XX.......").is_err());
    /// ```
    pub fn from_string(s: &str) -> Result<Self> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();

        if chars.len() != 9 {
            return Err(Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [[Cell::Empty; 3]; 3];
        for (i, &c) in chars.iter().enumerate() {
            cells[i / 3][i % 3] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let board = Board { cells };
        let count = board.count_pieces();
        if count.x != count.o && count.x != count.o + 1 {
            return Err(Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }

        Ok(board)
    }

    /// Count pieces on the board.
    pub fn count_pieces(&self) -> PieceCount {
        let mut count = PieceCount {
            x: 0,
            o: 0,
            empty: 0,
        };
        for cell in self.cells.iter().flatten() {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => count.empty += 1,
            }
        }
        count
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = self.count_pieces();
        count.x + count.o
    }

    /// Get the cell a move targets
    pub fn get(&self, mv: Move) -> Cell {
        self.cells[mv.row][mv.col]
    }

    /// Check if the cell a move targets is empty
    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv) == Cell::Empty
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Cell::Empty)
    }

    /// Player who has the next turn.
    ///
    /// O moves when X has more pieces; otherwise it is X's turn, so X always
    /// opens. Never fails, even on terminal or malformed boards.
    pub fn next_player(&self) -> Player {
        let count = self.count_pieces();
        if count.x > count.o {
            Player::O
        } else {
            Player::X
        }
    }

    /// Every empty cell, in row-major order.
    ///
    /// Won boards still report their empty cells; check [`Board::is_terminal`]
    /// first when that matters. The order is what makes search tie-breaks
    /// reproducible.
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..3)
            .flat_map(|row| (0..3).map(move |col| Move::new(row, col)))
            .filter(|&mv| self.is_empty(mv))
            .collect()
    }

    /// Legal moves paired with the boards they produce, row-major.
    ///
    /// # Panics
    ///
    /// Panics if a generated move cannot be applied.
    pub fn successors(&self) -> impl Iterator<Item = (Move, Board)> {
        expand(*self, self.legal_moves())
    }

    /// Place the next player's mark and return the resulting board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMove`] if the target cell is occupied.
    ///
    /// # Panics
    ///
    /// Coordinates outside 0-2 are a caller bug and panic on indexing.
    #[must_use = "apply_move returns a new board; the original is unchanged"]
    pub fn apply_move(&self, mv: Move) -> Result<Board> {
        if !self.is_empty(mv) {
            return Err(Error::InvalidMove {
                row: mv.row,
                col: mv.col,
            });
        }

        let mut next = *self;
        next.cells[mv.row][mv.col] = self.next_player().to_cell();
        Ok(next)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Check if a player has a completed line
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Score from X's perspective.
    ///
    /// Returns `0` for any board without a winner, terminal or not.
    pub fn utility(&self) -> Utility {
        match self.winner() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }
    }

    /// Cells that would immediately complete a line for `player`
    pub fn winning_moves(&self, player: Player) -> Vec<Move> {
        LineAnalyzer::winning_moves(&self.cells, player)
    }

    /// Compact 9-character form, rows concatenated
    pub fn encode(&self) -> String {
        self.cells.iter().flatten().map(|&c| c.to_char()).collect()
    }
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::from_string(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Apply each move to `board`; an occupied cell is a move-generation bug.
fn expand(board: Board, moves: Vec<Move>) -> impl Iterator<Item = (Move, Board)> {
    moves.into_iter().map(move |mv| match board.apply_move(mv) {
        Ok(child) => (mv, child),
        Err(err) => panic!("legal move generation should not fail: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.next_player(), Player::X);
        assert!(board.cells.iter().flatten().all(|&c| c == Cell::Empty));
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_apply_move() {
        let board = Board::new();

        let next = board.apply_move(Move::new(1, 1)).unwrap();
        assert_eq!(next.cells[1][1], Cell::X);
        assert_eq!(next.next_player(), Player::O);

        // Original untouched
        assert_eq!(board, Board::new());

        let err = next.apply_move(Move::new(1, 1)).unwrap_err();
        assert_eq!(err, Error::InvalidMove { row: 1, col: 1 });
        assert!(err.to_string().contains("occupied"));
    }

    #[test]
    #[should_panic]
    fn test_apply_move_out_of_range_panics() {
        let _ = Board::new().apply_move(Move::new(3, 0));
    }

    #[test]
    fn test_legal_moves_row_major() {
        let board = Board::from_string("X...O....").unwrap();
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 7);
        assert_eq!(moves[0], Move::new(0, 1));
        assert_eq!(moves[6], Move::new(2, 2));
        let indices: Vec<usize> = moves.iter().map(|m| m.index()).collect();
        assert_eq!(indices, vec![1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_legal_moves_kept_on_won_board() {
        let board = Board::from_string("XXXOO....").unwrap();
        assert!(board.is_terminal());
        assert_eq!(board.legal_moves().len(), 4);
    }

    #[test]
    fn test_next_player_on_malformed_board() {
        let board = Board::from_rows([[Cell::O; 3], [Cell::Empty; 3], [Cell::Empty; 3]]);
        assert_eq!(board.next_player(), Player::X);

        let board = Board::from_rows([[Cell::X; 3], [Cell::X; 3], [Cell::Empty; 3]]);
        assert_eq!(board.next_player(), Player::O);
    }

    #[test]
    fn test_utility_is_permissive() {
        assert_eq!(Board::new().utility(), 0);
        assert_eq!(Board::from_string("XX.OO....").unwrap().utility(), 0);
        assert_eq!(Board::from_string("XXXOO....").unwrap().utility(), 1);
        assert_eq!(Board::from_string("OOOXX.X..").unwrap().utility(), -1);
    }

    #[test]
    fn test_draw_detection() {
        let board = Board::from_string("XOX XOO OXX").unwrap();
        assert!(board.is_terminal());
        assert!(board.is_draw());
        assert_eq!(board.winner(), None);
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_from_string_errors() {
        assert!(matches!(
            Board::from_string("XO"),
            Err(Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            Board::from_string("XOZ......"),
            Err(Error::InvalidCellCharacter {
                character: 'Z',
                position: 2,
                ..
            })
        ));
        assert!(matches!(
            Board::from_string("O........"),
            Err(Error::InvalidPieceCounts {
                x_count: 0,
                o_count: 1
            })
        ));
        assert!(matches!(
            Board::from_string("XXX......"),
            Err(Error::InvalidPieceCounts { .. })
        ));
    }

    #[test]
    fn test_from_string_separators() {
        let a = Board::from_string("XO.|.X.|..O").unwrap();
        let b = Board::from_string("xo_ -x- ..0").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.encode(), "XO..X...O");
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("XOX.O.X..").unwrap();
        assert_eq!(format!("{board}"), "XOX\n.O.\nX..");
    }

    #[test]
    fn test_move_parsing() {
        assert_eq!("0,2".parse::<Move>().unwrap(), Move::new(0, 2));
        assert_eq!(" 2 1 ".parse::<Move>().unwrap(), Move::new(2, 1));
        assert_eq!("1, 1".parse::<Move>().unwrap(), Move::new(1, 1));
        assert!("3,0".parse::<Move>().is_err());
        assert!("1".parse::<Move>().is_err());
        assert!("a,b".parse::<Move>().is_err());
        assert!("1,1,1".parse::<Move>().is_err());
    }

    #[test]
    fn test_move_index_roundtrip() {
        for index in 0..9 {
            let mv = Move::from_index(index).unwrap();
            assert_eq!(mv.index(), index);
        }
        assert_eq!(Move::from_index(9), None);
        assert_eq!(Move::from((2, 0)).to_string(), "(2, 0)");
    }

    #[test]
    fn test_player_alternation() {
        let mut board = Board::new();
        assert_eq!(board.next_player(), Player::X);

        board = board.apply_move(Move::new(0, 0)).unwrap();
        assert_eq!(board.next_player(), Player::O);

        board = board.apply_move(Move::new(0, 1)).unwrap();
        assert_eq!(board.next_player(), Player::X);
        assert_eq!(board.cells[0][1], Cell::O);
    }

    #[test]
    fn test_successors_follow_legal_moves() {
        let board = Board::from_string("X...O....").unwrap();
        let successors: Vec<_> = board.successors().collect();

        assert_eq!(successors.len(), 7);
        for ((mv, child), legal) in successors.iter().zip(board.legal_moves()) {
            assert_eq!(*mv, legal);
            assert_eq!(child.get(*mv), Cell::X);
            assert_eq!(child.occupied_count(), 3);
        }
    }

    #[test]
    #[should_panic(expected = "legal move generation should not fail")]
    fn test_expand_panics_on_occupied_cell() {
        let board = Board::from_string("X........").unwrap();
        let _ = expand(board, vec![Move::new(1, 1), Move::new(0, 0)]).count();
    }
}
