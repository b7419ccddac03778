use std::fmt;

use strum_macros::Display;

use crate::bitboard::{BitBoard, Square};
use crate::move_gen::{GenerateMoves, MOVE_GEN};
use crate::moves::Move;

mod layout;

pub use layout::{LayoutError, START_LAYOUT};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const fn opposite_side(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub const fn mark(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Sides {
    white: BitBoard,
    black: BitBoard,
}

impl Sides {
    fn new() -> Self {
        Self {
            white: BitBoard::empty(),
            black: BitBoard::empty(),
        }
    }

    #[rustfmt::skip]
    fn start() -> Self {
        use crate::bitboard::Square::*;
        Self {
            white: BitBoard::from_squares(&[
                A1, B1, C1, D1, E1, A2, B2, C2, D2, E2, D3, E3,
            ]),
            black: BitBoard::from_squares(&[
                A3, B3, A4, B4, C4, D4, E4, A5, B5, C5, D5, E5,
            ]),
        }
    }

    pub(crate) fn get(&self, side: Side) -> BitBoard {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    pub(crate) fn get_mut(&mut self, side: Side) -> &mut BitBoard {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }

    pub(crate) fn occupied(&self) -> BitBoard {
        self.white | self.black
    }

    pub(crate) fn piece_at(&self, square: Square) -> Option<Side> {
        if self.white.is_square_set(square) {
            Some(Side::White)
        } else if self.black.is_square_set(square) {
            Some(Side::Black)
        } else {
            None
        }
    }

    /// Plays one hop for `side`: moves the piece and removes any jumped piece.
    pub(crate) fn apply_hop(
        &mut self,
        side: Side,
        src: Square,
        dest: Square,
        captured: Option<Square>,
    ) {
        self.get_mut(side).move_piece(src, dest);
        if let Some(captured) = captured {
            self.get_mut(side.opposite_side()).clear_square(captured);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct LastMoves {
    white: Option<Move>,
    black: Option<Move>,
}

impl LastMoves {
    fn get(&self, side: Side) -> Option<&Move> {
        match side {
            Side::White => self.white.as_ref(),
            Side::Black => self.black.as_ref(),
        }
    }

    fn set(&mut self, side: Side, mve: Move) {
        match side {
            Side::White => self.white = Some(mve),
            Side::Black => self.black = Some(mve),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub to_move: Side,
    pub game_over: bool,
}

#[derive(Clone, Eq)]
pub struct Board {
    pub state: State,
    pub(crate) sides: Sides,
    last_moves: LastMoves,
}

impl Board {
    pub fn start() -> Self {
        let mut board = Self {
            state: State {
                to_move: Side::White,
                game_over: false,
            },
            sides: Sides::new(),
            last_moves: LastMoves::default(),
        };
        board.clear();
        board
    }

    /// Resets to the initial position with White to move.
    pub fn clear(&mut self) {
        self.reset_to(Sides::start(), Side::White);
    }

    pub fn from_layout(layout: &str, to_move: Side) -> Result<Self, LayoutError> {
        let mut board = Self::start();
        board.set_pieces(layout, to_move)?;
        Ok(board)
    }

    /// Replaces the position with `layout`. On error the board is untouched.
    pub fn set_pieces(&mut self, layout: &str, to_move: Side) -> Result<(), LayoutError> {
        let sides = layout::parse_layout(layout)?;
        self.reset_to(sides, to_move);
        Ok(())
    }

    fn reset_to(&mut self, sides: Sides, to_move: Side) {
        self.sides = sides;
        self.state.to_move = to_move;
        self.last_moves = LastMoves::default();
        self.update_game_over();
    }

    fn update_game_over(&mut self) {
        self.state.game_over = false;
        self.state.game_over = MOVE_GEN.gen_moves(self).is_empty();
    }

    pub fn to_move(&self) -> Side {
        self.state.to_move
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over
    }

    pub fn piece_at(&self, square: Square) -> Option<Side> {
        self.sides.piece_at(square)
    }

    pub fn num_pieces(&self, side: Side) -> u8 {
        self.sides.get(side).num_squares_set()
    }

    pub fn last_move(&self, side: Side) -> Option<&Move> {
        self.last_moves.get(side)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        MOVE_GEN.gen_moves(self)
    }

    pub fn is_legal(&self, mve: &Move) -> bool {
        MOVE_GEN.is_legal(self, mve)
    }

    /// Whether the side to move has a capture anywhere on the board.
    pub fn capture_possible(&self) -> bool {
        let side = self.to_move();
        self.sides
            .get(side)
            .squares()
            .any(|sq| self.capture_possible_from(sq))
    }

    /// Whether the piece on `square` has a capture hop available. Empty
    /// squares have none.
    pub fn capture_possible_from(&self, square: Square) -> bool {
        match self.piece_at(square) {
            Some(side) => crate::move_gen::can_capture_from(&self.sides, side, square),
            None => false,
        }
    }

    /// Whether `mve` is a simple step undoing the side to move's own previous
    /// simple step.
    pub fn is_reversal(&self, mve: &Move) -> bool {
        match self.last_move(self.to_move()) {
            Some(last) => {
                !last.is_capture()
                    && !mve.is_capture()
                    && last.src() == mve.dest()
                    && last.dest() == mve.src()
            }
            None => false,
        }
    }

    /// Plays `mve` for the side to move. The move must be legal.
    pub fn make_move(&mut self, mve: &Move) {
        debug_assert!(
            self.is_legal(mve),
            "illegal move {} for {}:\n{}",
            mve,
            self.to_move(),
            self
        );

        let side = self.to_move();
        for hop in mve.hops() {
            self.sides.apply_hop(side, hop.src, hop.dest, hop.captured);
        }

        self.last_moves.set(side, mve.clone());
        self.state.to_move = side.opposite_side();
        self.update_game_over();
    }
}

// Last moves only matter for the reversal rule, two boards with the same
// pieces and side to move compare equal regardless.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.sides == other.sides
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_layout(), self.to_move().mark())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::Square::*;
    use test_case::test_case;
    use testresult::TestResult;

    #[test]
    fn test_start() {
        let board = Board::start();
        assert_eq!(board.to_move(), Side::White);
        assert!(!board.game_over());
        assert_eq!(board.num_pieces(Side::White), 12);
        assert_eq!(board.num_pieces(Side::Black), 12);
        assert_eq!(board.piece_at(C3), None);
        assert_eq!(board.piece_at(D3), Some(Side::White));
        assert_eq!(board.piece_at(B3), Some(Side::Black));
    }

    #[test]
    fn test_display() {
        let want = "  b b b b b\n  b b b b b\n  b b - w w\n  w w w w w\n  w w w w w";
        assert_eq!(Board::start().to_string(), want);
    }

    #[test]
    fn test_make_move_step() -> TestResult {
        let mut board = Board::start();
        let mve = "d3-c3".parse::<Move>()?;
        board.make_move(&mve);

        assert_eq!(board.piece_at(D3), None);
        assert_eq!(board.piece_at(C3), Some(Side::White));
        assert_eq!(board.to_move(), Side::Black);
        assert_eq!(board.last_move(Side::White), Some(&mve));
        assert_eq!(board.last_move(Side::Black), None);
        Ok(())
    }

    #[test]
    fn test_make_move_capture_chain() -> TestResult {
        let mut board = Board::from_layout("w---- b---- ----- b---- -----", Side::White)?;
        let mve = "a1-a3-a5".parse::<Move>()?;
        board.make_move(&mve);

        assert_eq!(board.num_pieces(Side::Black), 0);
        assert_eq!(board.piece_at(A5), Some(Side::White));
        assert!(board.game_over());
        Ok(())
    }

    #[test_case(Side::White, "a1-b1", "b1-a1", true ; "own step reversed")]
    #[test_case(Side::White, "a1-b1", "b1-c1", false ; "continues")]
    #[test_case(Side::Black, "a1-b1", "b1-a1", false ; "other side")]
    fn test_is_reversal(mover: Side, first: &str, second: &str, want: bool) -> TestResult {
        let mut board = Board::from_layout("w---- ----- ----- ----- ----b", Side::White)?;
        board.make_move(&first.parse()?);
        board.make_move(&"e5-d5".parse()?);
        board.state.to_move = mover;
        assert_eq!(board.is_reversal(&second.parse()?), want);
        Ok(())
    }

    #[test]
    fn test_eq_ignores_last_moves() -> TestResult {
        let mut board = Board::from_layout("w---- ----- ----- ----- ----b", Side::White)?;
        board.make_move(&"a1-b1".parse()?);
        let injected = Board::from_layout("-w--- ----- ----- ----- ----b", Side::Black)?;
        assert_eq!(board, injected);
        assert_ne!(board.last_move(Side::White), injected.last_move(Side::White));
        Ok(())
    }

    #[test]
    fn test_clone_is_independent() -> TestResult {
        let board = Board::start();
        let mut clone = board.clone();
        clone.make_move(&"d3-c3".parse()?);
        assert_eq!(board, Board::start());
        assert_ne!(board, clone);
        Ok(())
    }

    #[test]
    fn test_capture_possible_from() -> TestResult {
        let board = Board::from_layout("w---- b---- ----- ----- -----", Side::White)?;
        assert!(board.capture_possible());
        assert!(board.capture_possible_from(A1));
        assert!(!board.capture_possible_from(C3));
        Ok(())
    }
}
