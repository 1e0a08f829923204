//! HER agent that learns Hexapawn by pruning moves that lost.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::preferences::{
    CascadeReport, History, PreferenceTable, SituationPreferences, TableStats,
};
use crate::{
    Error, Result,
    hexapawn::{Board, Move, Side},
    ports::Agent,
    utils::choose_uniform,
};

/// HER learning agent
///
/// One instance keeps its table for its whole lifetime and is meant to be
/// reused across every game of a training run, one instance per colour.
pub struct LearningAgent {
    name: String,
    table: PreferenceTable,
    history: History,
    playing_as: Side,
    rng: StdRng,
    games_played: usize,
    games_lost: usize,
    guesses: usize,
}

impl std::fmt::Debug for LearningAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LearningAgent")
            .field("name", &self.name)
            .field("playing_as", &self.playing_as)
            .field("situations", &self.table.len())
            .field("history", &self.history.len())
            .finish()
    }
}

impl LearningAgent {
    /// Create a learner with an empty table and a random seed.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, rand::random::<u64>())
    }

    /// Create a learner with a deterministic seed.
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            table: PreferenceTable::new(),
            history: History::new(),
            playing_as: Side::Empty,
            rng: StdRng::seed_from_u64(seed),
            games_played: 0,
            games_lost: 0,
            guesses: 0,
        }
    }

    /// Set or reset the agent's RNG seed
    pub fn reseed(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Side announced by the last `on_game_start`.
    pub fn playing_as(&self) -> Side {
        self.playing_as
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn table(&self) -> &PreferenceTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut PreferenceTable {
        &mut self.table
    }

    /// Trusted moves for a situation, if it has been seen.
    pub fn preferences(&self, side: Side, board: &Board) -> Option<&SituationPreferences> {
        self.table.get(side, board)
    }

    /// Overwrite the trusted moves for a situation.
    pub fn set_preferences<I>(&mut self, side: Side, board: Board, moves: I)
    where
        I: IntoIterator<Item = Move>,
    {
        self.table.set(side, board, moves);
    }

    /// Choose a move and record it in this game's history.
    ///
    /// A situation seen for the first time trusts every legal move. From an
    /// exhausted situation the agent guesses among the legal moves, unless it
    /// is the agent's first move of the game.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnwinnableFirstMove`] if the opening situation is
    /// exhausted, or [`Error::NoLegalMoves`] if a guess is needed but `side`
    /// cannot move.
    pub fn select_move(&mut self, board: &Board, side: Side) -> Result<Move> {
        let trusted = self.table.entry(side, *board).choose(&mut self.rng);

        let mv = match trusted {
            Some(mv) => mv,
            None if self.history.is_empty() => {
                return Err(Error::UnwinnableFirstMove {
                    side,
                    board: board.encode(),
                });
            }
            None => {
                let legal = board.legal_moves(side);
                let mv =
                    choose_uniform(&mut self.rng, &legal).ok_or(Error::NoLegalMoves { side })?;
                self.guesses += 1;
                debug!(
                    agent = %self.name,
                    %side,
                    board = %board.encode(),
                    mv = %mv,
                    "no trusted move left, guessing"
                );
                mv
            }
        };

        self.history.push(*board, mv);
        Ok(mv)
    }

    /// Learn from a finished game.
    ///
    /// Nothing happens when `winner` is the side this agent played. After a
    /// loss the moves of this game are pruned newest first, see
    /// [`PreferenceTable::cascade`].
    pub fn learn(&mut self, winner: Side) -> Option<CascadeReport> {
        self.games_played += 1;
        if winner == self.playing_as {
            return None;
        }

        self.games_lost += 1;
        let report = self.table.cascade(self.playing_as, self.history.entries());
        debug!(
            agent = %self.name,
            side = %self.playing_as,
            pruned = report.pruned,
            exhausted = report.exhausted,
            reached_start = report.reached_start,
            "punished lost game"
        );
        Some(report)
    }

    /// Get statistics about the agent
    pub fn stats(&self) -> LearnerStats {
        LearnerStats {
            games_played: self.games_played,
            games_lost: self.games_lost,
            guesses: self.guesses,
            table: self.table.stats(),
        }
    }

    /// Forget everything learned so far.
    pub fn reset(&mut self) {
        self.table.clear();
        self.history.clear();
        self.playing_as = Side::Empty;
        self.games_played = 0;
        self.games_lost = 0;
        self.guesses = 0;
    }
}

impl Agent for LearningAgent {
    fn get_move(&mut self, board: &Board, side: Side) -> Result<Move> {
        self.select_move(board, side)
    }

    fn on_game_start(&mut self, side: Side) -> Result<()> {
        self.playing_as = side;
        self.history.clear();
        Ok(())
    }

    fn on_game_end(&mut self, winner: Side) -> Result<()> {
        self.learn(winner);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.reseed(Some(seed));
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Statistics about a HER agent
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LearnerStats {
    pub games_played: usize,
    pub games_lost: usize,
    /// Moves picked at random from exhausted situations.
    pub guesses: usize,
    pub table: TableStats,
}
