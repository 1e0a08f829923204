//! Uniform random player.

use rand::{SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    hexapawn::{Board, Move, Side},
    ports::Agent,
    utils::choose_uniform,
};

/// Random agent (uniform over legal moves)
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_seed(name, random())
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn get_move(&mut self, board: &Board, side: Side) -> Result<Move> {
        let moves = board.legal_moves(side);
        choose_uniform(&mut self.rng, &moves).ok_or(Error::NoLegalMoves { side })
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
