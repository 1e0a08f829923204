//! Console player reading moves as two cell indices.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::{
    Error, Result,
    hexapawn::{Board, Move, Side},
    ports::Agent,
};

/// Human agent driven by a line-oriented input stream.
///
/// Each move is read as two integers, `from` and `to`, separated by
/// whitespace or a comma. Unreadable lines are asked for again. A readable
/// move is passed on unchecked; an illegal one is rejected by the director
/// like any other agent's.
pub struct HumanAgent<R, W> {
    name: String,
    input: R,
    output: W,
    playing_as: Side,
}

impl HumanAgent<BufReader<Stdin>, Stdout> {
    /// Human playing at the process's terminal.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanAgent<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            playing_as: Side::Empty,
        }
    }

    /// Consume the agent, returning whatever was written to the player.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(|source| Error::Io {
            operation: "read move from console".to_string(),
            source,
        })?;
        if read == 0 {
            return Err(Error::InvalidInput {
                input: String::new(),
                reason: "input closed before a move was entered".to_string(),
            });
        }
        Ok(line)
    }
}

/// Parse a move typed as `"from to"` or `"from,to"`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] unless the line holds exactly two
/// non-negative integers. Range and legality are not checked here.
pub fn parse_move(line: &str) -> Result<Move> {
    let invalid = |reason: &str| Error::InvalidInput {
        input: line.trim().to_string(),
        reason: reason.to_string(),
    };

    let tokens: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .collect();
    let [from, to] = tokens.as_slice() else {
        return Err(invalid("expected two cell indices, e.g. '7 4'"));
    };

    let from = from
        .parse::<usize>()
        .map_err(|_| invalid("origin is not a cell index"))?;
    let to = to
        .parse::<usize>()
        .map_err(|_| invalid("destination is not a cell index"))?;
    Ok(Move::new(from, to))
}

impl<R, W> Agent for HumanAgent<R, W>
where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    fn get_move(&mut self, board: &Board, side: Side) -> Result<Move> {
        writeln!(self.output)?;
        writeln!(self.output, "{board}")?;

        loop {
            write!(self.output, "{side} to move (from to): ")?;
            self.output.flush()?;

            let line = self.read_line()?;
            match parse_move(&line) {
                Ok(mv) => return Ok(mv),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn on_game_start(&mut self, side: Side) -> Result<()> {
        self.playing_as = side;
        writeln!(self.output, "You are playing {side}. Cells are numbered:")?;
        writeln!(self.output, "012\n345\n678")?;
        Ok(())
    }

    fn on_game_end(&mut self, winner: Side) -> Result<()> {
        let verdict = if winner == self.playing_as {
            "You win!"
        } else {
            "You lose."
        };
        writeln!(self.output, "{winner} wins. {verdict}")?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn parses_two_indices() {
        assert_eq!(parse_move("7 4\n").unwrap(), Move::new(7, 4));
        assert_eq!(parse_move(" 8,4 ").unwrap(), Move::new(8, 4));
    }

    #[test]
    fn out_of_range_indices_are_passed_through() {
        // validation happens on the board, not here
        assert_eq!(parse_move("12 9").unwrap(), Move::new(12, 9));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(matches!(parse_move("7"), Err(Error::InvalidInput { .. })));
        assert!(matches!(parse_move("a b"), Err(Error::InvalidInput { .. })));
        assert!(matches!(parse_move("-1 4"), Err(Error::InvalidInput { .. })));
        assert!(matches!(parse_move("1 2 3"), Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn reads_move_and_prints_board() {
        let mut human = HumanAgent::new("human", Cursor::new(b"7 4\n".to_vec()), Vec::new());
        human.on_game_start(Side::White).unwrap();

        let mv = human.get_move(&Board::initial(), Side::White).unwrap();
        assert_eq!(mv, Move::new(7, 4));

        human.on_game_end(Side::White).unwrap();
        let printed = String::from_utf8(human.into_output()).unwrap();
        assert!(printed.contains("BBB\n...\nWWW"));
        assert!(printed.contains("White wins. You win!"));
    }

    #[test]
    fn asks_again_after_unreadable_input() {
        let input = Cursor::new(b"nonsense\n\n7 1\n".to_vec());
        let mut human = HumanAgent::new("human", input, Vec::new());

        // legality is left to the director
        let mv = human.get_move(&Board::initial(), Side::White).unwrap();
        assert_eq!(mv, Move::new(7, 1));

        let printed = String::from_utf8(human.into_output()).unwrap();
        assert_eq!(printed.matches("White to move").count(), 3);
        assert!(printed.contains("expected two cell indices"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut human = HumanAgent::new("human", Cursor::new(Vec::new()), Vec::new());
        let err = human.get_move(&Board::initial(), Side::White).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }
}
