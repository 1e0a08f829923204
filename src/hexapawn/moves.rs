//! Pawn moves and their board-independent geometry

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BOARD_SIZE, ROW_LEN};

/// A pawn move from one cell to another.
///
/// A `Move` can be constructed from any pair of indices so that raw input
/// (e.g. typed by a human) can be represented and then rejected by
/// validation. Geometric validity is checked by [`Move::is_valid`]; whether
/// the move is playable on a given board is [`super::Board::is_valid_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        Move { from, to }
    }

    /// Check the move's shape without looking at any board.
    ///
    /// Both cells must be on the board, in adjacent rows, and either one
    /// row straight ahead (distance 3) or one diagonal step (distance 2 or 4).
    pub fn is_valid(&self) -> bool {
        if self.from >= BOARD_SIZE || self.to >= BOARD_SIZE {
            return false;
        }
        if (self.from / ROW_LEN).abs_diff(self.to / ROW_LEN) != 1 {
            return false;
        }
        self.is_straight() || self.is_diagonal()
    }

    /// Forward push into the cell directly ahead.
    pub fn is_straight(&self) -> bool {
        self.distance() == 3
    }

    /// Diagonal step, only legal as a capture.
    pub fn is_diagonal(&self) -> bool {
        matches!(self.distance(), 2 | 4)
    }

    /// Row direction of travel: `+1` toward higher indices, `-1` otherwise.
    pub fn direction(&self) -> isize {
        if self.to > self.from { 1 } else { -1 }
    }

    fn distance(&self) -> usize {
        self.from.abs_diff(self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
