//! Hexapawn game implementation

pub mod board;
pub mod moves;

pub use board::{BOARD_SIZE, Board, ROW_LEN, Side};
pub use moves::Move;
