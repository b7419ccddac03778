use std::fmt::{self, Display};
use std::str::FromStr;

use qirkat::Move;
use winnow::combinator::{alt, eof, terminated};
use winnow::token::take_while;
use winnow::Parser;
use winnow::Result as WinnowResult;

/// One line typed by a human player.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum GameCommand {
    Move(Move),
    Board,
    Legal,
    Quit,
}

impl Display for GameCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameCommand::Move(mve) => write!(f, "{}", mve),
            GameCommand::Board => write!(f, "board"),
            GameCommand::Legal => write!(f, "legal"),
            GameCommand::Quit => write!(f, "quit"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct GameCommandParseError(String);

impl Display for GameCommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl std::error::Error for GameCommandParseError {}

impl FromStr for GameCommand {
    type Err = GameCommandParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let line = input.trim();
        terminated(alt((parse_board, parse_legal, parse_quit, parse_move)), eof)
            .parse(line)
            .map_err(|_| GameCommandParseError(format!("cannot parse: [{}]", line)))
    }
}

fn parse_board(input: &mut &str) -> WinnowResult<GameCommand> {
    "board".value(GameCommand::Board).parse_next(input)
}

fn parse_legal(input: &mut &str) -> WinnowResult<GameCommand> {
    "legal".value(GameCommand::Legal).parse_next(input)
}

fn parse_quit(input: &mut &str) -> WinnowResult<GameCommand> {
    "quit".value(GameCommand::Quit).parse_next(input)
}

fn parse_move(input: &mut &str) -> WinnowResult<GameCommand> {
    take_while(1.., |ch: char| ch.is_ascii_alphanumeric() || ch == '-')
        .try_map(Move::from_str)
        .map(GameCommand::Move)
        .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;
    use testresult::TestResult;

    #[test_case("board", GameCommand::Board)]
    #[test_case("legal", GameCommand::Legal)]
    #[test_case("quit", GameCommand::Quit)]
    #[test_case("  quit\n", GameCommand::Quit ; "surrounding whitespace")]
    fn test_from_str(input: &str, want: GameCommand) -> TestResult {
        assert_eq!(GameCommand::from_str(input)?, want);
        Ok(())
    }

    #[test_case("d3-c3" ; "step")]
    #[test_case("a3-a5-c3" ; "chain")]
    fn test_from_str_move(input: &str) -> TestResult {
        let got = GameCommand::from_str(input)?;
        assert_eq!(got, GameCommand::Move(Move::from_str(input)?));
        assert_eq!(got.to_string(), input);
        Ok(())
    }

    #[test_case("" ; "empty")]
    #[test_case("boardx" ; "trailing text")]
    #[test_case("a3-f9" ; "bad square")]
    #[test_case("a1-a3-b3" ; "step inside chain")]
    #[test_case("quit now" ; "extra word")]
    fn test_from_str_err(input: &str) {
        assert!(GameCommand::from_str(input).is_err());
    }
}
