//! Agent port - abstraction over anything that can play a side
//!
//! This port defines the interface every player implements, allowing the
//! director to work with:
//! - The HER learning agent
//! - Uniform random baselines
//! - Humans at a console

use crate::{
    Result,
    hexapawn::{Board, Move, Side},
};

/// Agent trait - Unified interface for all players
///
/// # Event Sequence
///
/// For every game the director calls:
/// 1. `on_game_start(side)` - before any move of the game
/// 2. `get_move(board, side)` - once per turn of this agent
/// 3. `on_game_end(winner)` - once the board reports a winner
///
/// # Examples
///
/// ```no_run
/// use hexapawn::{
///     hexapawn::{Board, Move, Side},
///     ports::Agent,
/// };
///
/// struct FirstMove;
///
/// impl Agent for FirstMove {
///     fn get_move(&mut self, board: &Board, side: Side) -> hexapawn::Result<Move> {
///         board
///             .legal_moves(side)
///             .into_iter()
///             .next()
///             .ok_or(hexapawn::Error::NoLegalMoves { side })
///     }
///
///     fn name(&self) -> &str {
///         "first-move"
///     }
///
///     fn as_any(&self) -> &dyn std::any::Any {
///         self
///     }
/// }
/// ```
pub trait Agent: Send {
    /// Choose a move for `side` on `board`.
    ///
    /// The move must be legal for `side`; the director re-validates it and
    /// treats anything else as [`crate::Error::AgentContractViolation`].
    ///
    /// # Errors
    ///
    /// Returns an error if the agent cannot produce a move at all.
    fn get_move(&mut self, board: &Board, side: Side) -> Result<Move>;

    /// Called before the first move of a game with the side this agent plays.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_game_start(&mut self, _side: Side) -> Result<()> {
        Ok(())
    }

    /// Called once the game is decided.
    ///
    /// Adaptive agents update their policy here.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_game_end(&mut self, _winner: Side) -> Result<()> {
        Ok(())
    }

    /// Get the agent's name.
    ///
    /// Used in error messages and summaries.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, for agents without randomness.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }

    /// Enable downcasting to concrete types.
    ///
    /// The CLI uses this to reach the learned table of a
    /// [`crate::her::LearningAgent`] behind a `Box<dyn Agent>`.
    fn as_any(&self) -> &dyn std::any::Any;
}
