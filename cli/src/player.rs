use std::io::{self, BufRead, Write};
use std::str::FromStr;

use qirkat::{Board, Move, Player, Side};
use tracing::{debug, warn};

use crate::commands::GameCommand;

/// A source of input lines. `Ok(None)` at end of input.
pub trait ReadLine {
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<R: BufRead> ReadLine for R {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

/// Reads through the process-wide stdin buffer, so several players can share
/// the terminal without one swallowing the other's lines.
pub struct StdinReader;

impl ReadLine for StdinReader {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match io::stdin().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

/// A player driven by lines of text, normally a human at the terminal.
pub struct ManualPlayer<R: ReadLine, W: Write> {
    side: Side,
    input: R,
    output: W,
}

impl<R: ReadLine, W: Write> ManualPlayer<R, W> {
    pub fn new(side: Side, input: R, output: W) -> Self {
        Self {
            side,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.output, "{}: ", self.side.to_string().to_lowercase())?;
        self.output.flush()
    }

    /// Next command, or `None` once the input is exhausted or unreadable.
    fn read_command(&mut self) -> Option<GameCommand> {
        loop {
            if let Err(err) = self.prompt() {
                warn!("couldn't write prompt: {}", err);
            }

            let line = match self.input.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(err) => {
                    warn!("couldn't read input: {}", err);
                    return None;
                }
            };
            debug!("> {}", line.trim_end());

            if line.trim().is_empty() {
                continue;
            }
            match GameCommand::from_str(&line) {
                Ok(command) => return Some(command),
                Err(err) => {
                    warn!("{}", err);
                    self.write_line(&format!("unknown command {}", err));
                }
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.output, "{}", line) {
            warn!("couldn't write output: {}", err);
        }
    }
}

impl<R: ReadLine, W: Write> Player for ManualPlayer<R, W> {
    fn side(&self) -> Side {
        self.side
    }

    fn produce_move(&mut self, board: &Board) -> Option<Move> {
        loop {
            match self.read_command()? {
                GameCommand::Move(mve) => return Some(mve),
                GameCommand::Board => {
                    let rendered = board.render(true);
                    self.write_line(&rendered);
                }
                GameCommand::Legal => {
                    let moves = board
                        .legal_moves()
                        .iter()
                        .map(|mve| mve.to_string())
                        .collect::<Vec<_>>()
                        .join(" ");
                    self.write_line(&moves);
                }
                GameCommand::Quit => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;
    use testresult::TestResult;

    fn manual_player(side: Side, input: &str) -> ManualPlayer<Cursor<Vec<u8>>, Vec<u8>> {
        ManualPlayer::new(side, Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_produce_move() -> TestResult {
        let mut player = manual_player(Side::White, "d3-c3\n");
        let mve = player.produce_move(&Board::start());
        assert_eq!(mve, Some(Move::from_str("d3-c3")?));
        Ok(())
    }

    #[test]
    fn test_eof_is_quit() {
        let mut player = manual_player(Side::White, "");
        assert_eq!(player.produce_move(&Board::start()), None);
    }

    #[test]
    fn test_quit() {
        let mut player = manual_player(Side::Black, "quit\nd3-c3\n");
        assert_eq!(player.produce_move(&Board::start()), None);
    }

    #[test]
    fn test_legal_and_board_then_move() -> TestResult {
        let mut player = manual_player(Side::White, "legal\nboard\nnonsense\n\nb2-c3\n");
        let mve = player.produce_move(&Board::start());
        assert_eq!(mve, Some(Move::from_str("b2-c3")?));

        let output = String::from_utf8(player.into_output())?;
        assert!(output.contains("b2-c3 c2-c3 d2-c3 d3-c3"));
        assert!(output.contains("  a b c d e"));
        assert!(output.contains("unknown command"));
        assert!(output.starts_with("white: "));
        Ok(())
    }
}
