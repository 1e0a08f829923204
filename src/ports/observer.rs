//! Observer port - abstraction for watching a training run
//!
//! Observers collect data or report progress without coupling the training
//! loop to a particular output format.

use crate::{
    Result,
    hexapawn::{Board, Move, Side},
    pipeline::GameRecord,
};

/// Observer trait for monitoring games
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each ply, after the move was validated
///    - `on_game_end(game_num, record)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use hexapawn::{pipeline::GameRecord, ports::Observer};
///
/// struct LongestGame {
///     plies: usize,
/// }
///
/// impl Observer for LongestGame {
///     fn on_game_end(&mut self, _game_num: usize, record: &GameRecord) -> hexapawn::Result<()> {
///         self.plies = self.plies.max(record.plies());
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts.
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each ply with the board the move was played on.
    fn on_move(
        &mut self,
        _game_num: usize,
        _ply: usize,
        _board: &Board,
        _side: Side,
        _mv: Move,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game ends.
    fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
