use std::fmt::{self, Display};
use std::rc::Rc;

use qirkat::{
    Board, BoardObserver, BoardView, LayoutError, MutableBoard, ObservableBoard, Player, Side,
    START_LAYOUT,
};
use tracing::{debug, info, warn};

/// How a game came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The other side had no legal move.
    Won(Side),
    /// The side to move quit or ran out of input.
    Abandoned(Side),
    MoveLimit,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won(side) => write!(f, "{} wins.", side),
            Outcome::Abandoned(side) => write!(f, "{} abandoned the game.", side),
            Outcome::MoveLimit => write!(f, "Move limit reached."),
        }
    }
}

/// Board for a layout given on the command line, where `start` names the
/// opening position. `to_move` is honoured either way.
pub fn board_from_arg(layout: &str, to_move: Side) -> Result<Board, LayoutError> {
    let layout = if layout == "start" { START_LAYOUT } else { layout };
    Board::from_layout(layout, to_move)
}

/// Writes the board to the `board` log target whenever it changes.
pub struct BoardPrinter {
    view: Rc<BoardView>,
}

impl BoardPrinter {
    pub fn new(board: &Rc<ObservableBoard>) -> Rc<Self> {
        let printer = Rc::new(Self {
            view: BoardView::new(board),
        });
        printer.view.add_observer(&printer);
        printer
    }
}

impl BoardObserver for BoardPrinter {
    fn board_changed(&self) {
        let board = self.view.board();
        info!(target: "board", "{}\n{} to move", board.render(true), board.to_move());
    }
}

pub struct Game {
    board: Rc<ObservableBoard>,
    white: Box<dyn Player>,
    black: Box<dyn Player>,
    move_limit: Option<usize>,
    moves_played: usize,
    printer: Option<Rc<BoardPrinter>>,
}

impl Game {
    pub fn new(board: Board, white: Box<dyn Player>, black: Box<dyn Player>) -> Self {
        assert_eq!(white.side(), Side::White, "white player plays {}", white.side());
        assert_eq!(black.side(), Side::Black, "black player plays {}", black.side());
        Self {
            board: ObservableBoard::new(board),
            white,
            black,
            move_limit: None,
            moves_played: 0,
            printer: None,
        }
    }

    pub fn with_move_limit(mut self, move_limit: usize) -> Self {
        self.move_limit = Some(move_limit);
        self
    }

    pub fn with_printer(mut self) -> Self {
        self.printer = Some(BoardPrinter::new(&self.board));
        self
    }

    pub fn board(&self) -> &Rc<ObservableBoard> {
        &self.board
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Alternates between the two players until one side cannot move, a
    /// player leaves, or the move limit is hit. Illegal moves are refused and
    /// the same player is asked again.
    pub fn play(&mut self) -> Outcome {
        if let Some(printer) = &self.printer {
            printer.board_changed();
        }

        loop {
            // Players work on a snapshot so no borrow of the shared board is
            // alive while it is mutated.
            let snapshot = self.board.board().clone();
            let to_move = snapshot.to_move();

            if snapshot.game_over() {
                let winner = to_move.opposite_side();
                info!("{} has no moves, {} wins", to_move, winner);
                return Outcome::Won(winner);
            }
            if self.move_limit.is_some_and(|limit| self.moves_played >= limit) {
                info!("stopping after {} moves", self.moves_played);
                return Outcome::MoveLimit;
            }

            let player = match to_move {
                Side::White => &mut self.white,
                Side::Black => &mut self.black,
            };
            let Some(mve) = player.produce_move(&snapshot) else {
                info!("{} left the game", to_move);
                return Outcome::Abandoned(to_move);
            };

            if !snapshot.is_legal(&mve) {
                warn!("illegal move {} for {}", mve, to_move);
                debug!("legal moves: {:?}", snapshot.legal_moves());
                continue;
            }

            info!("{} plays {}", to_move, mve);
            self.board.make_move(&mve);
            self.moves_played += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use qirkat::{AiPlayer, Move, SearchParams};
    use std::collections::VecDeque;
    use testresult::TestResult;

    /// Plays a fixed list of moves, then leaves.
    struct ScriptedPlayer {
        side: Side,
        moves: VecDeque<Move>,
    }

    impl ScriptedPlayer {
        fn new(side: Side, moves: &[&str]) -> Result<Self, qirkat::MoveParseError> {
            Ok(Self {
                side,
                moves: moves
                    .iter()
                    .map(|mve| mve.parse::<Move>())
                    .collect::<Result<_, _>>()?,
            })
        }
    }

    impl Player for ScriptedPlayer {
        fn side(&self) -> Side {
            self.side
        }

        fn produce_move(&mut self, _board: &Board) -> Option<Move> {
            self.moves.pop_front()
        }
    }

    #[test]
    fn test_scripted_opening() -> TestResult {
        let white = ScriptedPlayer::new(Side::White, &["d3-c3", "e3-c3"])?;
        let black = ScriptedPlayer::new(Side::Black, &["b3-d3"])?;
        let mut game = Game::new(Board::start(), Box::new(white), Box::new(black));

        assert_eq!(game.play(), Outcome::Abandoned(Side::Black));
        assert_eq!(game.moves_played(), 3);
        assert_eq!(
            game.board().board().to_layout(),
            "wwwwwwwwwwb-w--bbbbbbbbbb"
        );
        Ok(())
    }

    #[test]
    fn test_illegal_move_is_refused() -> TestResult {
        let white = ScriptedPlayer::new(Side::White, &["a1-b1", "a1-a3"])?;
        let black = ScriptedPlayer::new(Side::Black, &[])?;
        let board = Board::from_layout("w---- b---- ----- ----- -----", Side::White)?;
        let mut game = Game::new(board, Box::new(white), Box::new(black));

        assert_eq!(game.play(), Outcome::Won(Side::White));
        assert_eq!(game.moves_played(), 1);
        Ok(())
    }

    #[test]
    fn test_board_from_arg() -> TestResult {
        let board = board_from_arg("start", Side::Black)?;
        assert_eq!(board.to_move(), Side::Black);
        assert_eq!(board.to_layout(), Board::start().to_layout());
        assert_eq!(board_from_arg("start", Side::White)?, Board::start());

        let board = board_from_arg("w---- b---- ----- ----- -----", Side::White)?;
        assert_eq!(board.legal_moves().len(), 1);
        assert_eq!(board_from_arg("begin", Side::White), Err(LayoutError::Length(5)));
        Ok(())
    }

    #[test]
    fn test_move_limit() {
        let white = AiPlayer::new(Side::White, SearchParams::with_depth(1));
        let black = AiPlayer::new(Side::Black, SearchParams::with_depth(1));
        let mut game = Game::new(Board::start(), Box::new(white), Box::new(black))
            .with_move_limit(2)
            .with_printer();

        assert_eq!(game.play(), Outcome::MoveLimit);
        assert_eq!(game.moves_played(), 2);
    }

    #[test]
    #[should_panic(expected = "white player plays Black")]
    fn test_sides_must_match() {
        let white = AiPlayer::new(Side::Black, SearchParams::default());
        let black = AiPlayer::new(Side::Black, SearchParams::default());
        Game::new(Board::start(), Box::new(white), Box::new(black));
    }
}
