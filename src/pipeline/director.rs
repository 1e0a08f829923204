//! Game director: referees a single game between two agents

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    hexapawn::{Board, Move, Side},
    ports::{Agent, Observer},
};

/// Record of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Side that won. Hexapawn has no draws.
    pub winner: Side,
    /// Every ply in play order, with the side that played it.
    pub moves: Vec<(Side, Move)>,
    /// Position the game ended on.
    pub final_board: Board,
}

impl GameRecord {
    /// Number of plies played.
    pub fn plies(&self) -> usize {
        self.moves.len()
    }

    pub fn loser(&self) -> Side {
        self.winner.opposite()
    }
}

/// Play one game from the initial position.
///
/// White moves first. Both agents are told their side before the first move
/// and the winner after the last one.
///
/// # Errors
///
/// Returns [`Error::AgentContractViolation`] if an agent proposes a move
/// that is illegal for its side, and propagates any error an agent returns.
pub fn play_game(white: &mut dyn Agent, black: &mut dyn Agent) -> Result<GameRecord> {
    play_observed_game(0, white, black, &mut [])
}

/// Play one game, reporting its progress to `observers`.
pub fn play_observed_game(
    game_num: usize,
    white: &mut dyn Agent,
    black: &mut dyn Agent,
    observers: &mut [Box<dyn Observer>],
) -> Result<GameRecord> {
    for observer in observers.iter_mut() {
        observer.on_game_start(game_num)?;
    }

    white.on_game_start(Side::White)?;
    black.on_game_start(Side::Black)?;

    let mut board = Board::initial();
    let mut side = Side::White;
    let mut moves = Vec::new();

    let winner = loop {
        let agent: &mut dyn Agent = match side {
            Side::White => &mut *white,
            _ => &mut *black,
        };

        let mv = agent.get_move(&board, side)?;
        check_contract(agent, &board, side, mv)?;

        for observer in observers.iter_mut() {
            observer.on_move(game_num, moves.len(), &board, side, mv)?;
        }

        board = board.apply_move(mv)?;
        moves.push((side, mv));

        let winner = board.winner_of(side);
        if !winner.is_empty() {
            break winner;
        }
        side = side.opposite();
    };

    white.on_game_end(winner)?;
    black.on_game_end(winner)?;

    let record = GameRecord {
        winner,
        moves,
        final_board: board,
    };
    debug!(
        game = game_num,
        %winner,
        plies = record.plies(),
        board = %record.final_board.encode(),
        "game finished"
    );

    for observer in observers.iter_mut() {
        observer.on_game_end(game_num, &record)?;
    }
    Ok(record)
}

/// An agent may only move its own pieces, forward, by the rules of the board.
fn check_contract(agent: &dyn Agent, board: &Board, side: Side, mv: Move) -> Result<()> {
    let reason = if !board.is_valid_move(mv) {
        "move is not legal on this board"
    } else if mv.direction() != side.direction() {
        "move belongs to the other side"
    } else {
        return Ok(());
    };

    Err(Error::AgentContractViolation {
        agent: agent.name().to_string(),
        side,
        from: mv.from,
        to: mv.to,
        reason: reason.to_string(),
    })
}
