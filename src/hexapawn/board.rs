//! Board state representation and the rules of Hexapawn

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::moves::Move;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = 9;

/// Number of cells per row.
pub const ROW_LEN: usize = 3;

/// Content of a cell, doubling as the identity of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Empty,
    Black,
    White,
}

impl Side {
    /// Both playing sides, in turn order.
    pub const PLAYERS: [Side; 2] = [Side::White, Side::Black];

    /// Row direction this side's pawns travel in.
    ///
    /// White moves toward row 0 (decreasing indices), Black toward row 2.
    pub fn direction(self) -> isize {
        match self {
            Side::White => -1,
            Side::Black => 1,
            Side::Empty => 0,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
            Side::Empty => Side::Empty,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Side::Empty
    }

    pub fn to_char(self) -> char {
        match self {
            Side::Empty => '.',
            Side::Black => 'B',
            Side::White => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Side> {
        match c {
            '.' | '-' | '_' => Some(Side::Empty),
            'B' | 'b' => Some(Side::Black),
            'W' | 'w' => Some(Side::White),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Empty => "nobody",
            Side::Black => "Black",
            Side::White => "White",
        };
        f.write_str(name)
    }
}

/// Immutable 3x3 Hexapawn position.
///
/// Cells are indexed 0-8 row by row. Row 0 (cells 0-2) is White's goal and
/// Black's home row; row 2 (cells 6-8) is Black's goal and White's home row.
/// Equality and hashing are structural, so two boards built independently
/// from the same cells are interchangeable as map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Board {
    cells: [Side; BOARD_SIZE],
}

impl Board {
    /// Create a board from a fixed-size cell array.
    pub fn new(cells: [Side; BOARD_SIZE]) -> Self {
        Board { cells }
    }

    /// Starting position: Black on row 0, empty middle row, White on row 2.
    pub fn initial() -> Self {
        use Side::{Black as B, Empty as E, White as W};
        Board::new([B, B, B, E, E, E, W, W, W])
    }

    /// Create a board from a slice of cells.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoard`] unless exactly 9 cells are given.
    pub fn from_cells(cells: &[Side]) -> Result<Self, crate::Error> {
        let cells: [Side; BOARD_SIZE] = cells
            .try_into()
            .map_err(|_| crate::Error::InvalidBoard { got: cells.len() })?;
        Ok(Board::new(cells))
    }

    /// Parse a board from its text form, e.g. `"BBB/.../WWW"`.
    ///
    /// Whitespace and `/` separators are ignored; `W`, `B` and `.` name the
    /// cells in index order.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown characters or a cell count other than 9.
    pub fn parse(s: &str) -> Result<Self, crate::Error> {
        let mut cells = Vec::with_capacity(BOARD_SIZE);
        for (position, c) in s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .enumerate()
        {
            let side = Side::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position,
                context: s.to_string(),
            })?;
            cells.push(side);
        }
        Self::from_cells(&cells)
    }

    pub fn cells(&self) -> &[Side; BOARD_SIZE] {
        &self.cells
    }

    /// Get the content of a cell, or `None` if the index is off the board.
    pub fn get(&self, index: usize) -> Option<Side> {
        self.cells.get(index).copied()
    }

    /// Number of pieces belonging to `side`.
    pub fn count(&self, side: Side) -> usize {
        self.cells.iter().filter(|&&cell| cell == side).count()
    }

    /// Number of pieces of either colour.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Check whether `mv` may be played on this board.
    ///
    /// The moving piece must travel in its own forward direction. A straight
    /// push needs an empty destination; a diagonal step must capture a piece
    /// of the opposite colour.
    pub fn is_valid_move(&self, mv: Move) -> bool {
        if !mv.is_valid() {
            return false;
        }

        let origin = self.cells[mv.from];
        if origin.is_empty() || origin.direction() != mv.direction() {
            return false;
        }

        let target = self.cells[mv.to];
        if mv.is_straight() {
            target.is_empty()
        } else {
            target == origin.opposite()
        }
    }

    /// Play `mv`, producing the resulting board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalMove`] if [`Board::is_valid_move`] rejects the move.
    pub fn apply_move(&self, mv: Move) -> Result<Board, crate::Error> {
        if !self.is_valid_move(mv) {
            return Err(crate::Error::IllegalMove {
                from: mv.from,
                to: mv.to,
                board: self.encode(),
            });
        }

        let mut cells = self.cells;
        cells[mv.to] = cells[mv.from];
        cells[mv.from] = Side::Empty;
        Ok(Board::new(cells))
    }

    /// All moves `side` can play on this board.
    ///
    /// Each pawn is tried independently for its two diagonal captures and its
    /// straight push, so a single pawn contributes between zero and three moves.
    pub fn legal_moves(&self, side: Side) -> BTreeSet<Move> {
        let dir = side.direction();
        if dir == 0 {
            return BTreeSet::new();
        }

        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == side)
            .flat_map(|(index, _)| {
                [2, 3, 4].into_iter().filter_map(move |step| {
                    index
                        .checked_add_signed(step * dir)
                        .map(|to| Move::new(index, to))
                })
            })
            .filter(|&mv| self.is_valid_move(mv))
            .collect()
    }

    /// Decide whether the game is over after `last_mover` has moved.
    ///
    /// Checked in order, first match wins:
    /// 1. a White pawn on row 0 wins for White;
    /// 2. a Black pawn on row 2 wins for Black;
    /// 3. a lone remaining pawn wins for its side;
    /// 4. if the opponent of `last_mover` cannot move, `last_mover` wins.
    ///
    /// Returns [`Side::Empty`] while the game continues.
    pub fn winner_of(&self, last_mover: Side) -> Side {
        if self.cells[..ROW_LEN].contains(&Side::White) {
            return Side::White;
        }
        if self.cells[BOARD_SIZE - ROW_LEN..].contains(&Side::Black) {
            return Side::Black;
        }
        if self.piece_count() == 1
            && let Some(&survivor) = self.cells.iter().find(|cell| !cell.is_empty())
        {
            return survivor;
        }
        if !last_mover.is_empty() && self.legal_moves(last_mover.opposite()).is_empty() {
            return last_mover;
        }
        Side::Empty
    }

    /// Compact single-line encoding, e.g. `"BBB...WWW"`.
    pub fn encode(&self) -> String {
        self.cells.iter().map(|cell| cell.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl TryFrom<Vec<Side>> for Board {
    type Error = crate::Error;

    fn try_from(cells: Vec<Side>) -> Result<Self, Self::Error> {
        Self::from_cells(&cells)
    }
}

impl FromStr for Board {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(ROW_LEN) && i < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
