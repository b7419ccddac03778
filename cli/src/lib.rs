mod commands;
mod game;
mod player;

pub use commands::{GameCommand, GameCommandParseError};
pub use game::{board_from_arg, BoardPrinter, Game, Outcome};
pub use player::{ManualPlayer, ReadLine, StdinReader};
