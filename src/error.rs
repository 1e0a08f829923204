//! Error types for the Hexapawn crate

use thiserror::Error;

use crate::hexapawn::Side;

/// Main error type for the Hexapawn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board: expected 9 cells, got {got}")]
    InvalidBoard { got: usize },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("illegal move {from} -> {to} on board '{board}'")]
    IllegalMove {
        from: usize,
        to: usize,
        board: String,
    },

    #[error("agent '{agent}' playing {side} returned {from} -> {to}: {reason}")]
    AgentContractViolation {
        agent: String,
        side: Side,
        from: usize,
        to: usize,
        reason: String,
    },

    #[error(
        "there is no winning move for {side} from the opening position '{board}'; \
         every line I know of ends in defeat"
    )]
    UnwinnableFirstMove { side: Side, board: String },

    #[error("no legal moves available for {side}")]
    NoLegalMoves { side: Side },

    #[error("invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
