use std::fmt;
use std::ops::Neg;

use crate::board::{Board, Side};

/// Score from White's point of view: positive favors White.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Eval(pub i32);

impl Eval {
    /// Window bounds, strictly outside every reachable score.
    pub const MIN: Eval = Eval(-i32::MAX);
    pub const MAX: Eval = Eval(i32::MAX);

    pub const WHITE_WIN: Eval = Eval(i32::MAX - 1);
    pub const BLACK_WIN: Eval = Eval(-(i32::MAX - 1));
    pub const EVEN: Eval = Eval(0);

    /// The win score for `side`.
    pub const fn win_for(side: Side) -> Eval {
        match side {
            Side::White => Eval::WHITE_WIN,
            Side::Black => Eval::BLACK_WIN,
        }
    }
}

impl Neg for Eval {
    type Output = Eval;

    fn neg(self) -> Self::Output {
        Eval(-self.0)
    }
}

impl fmt::Display for Eval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Eval::WHITE_WIN => write!(f, "white wins"),
            Eval::BLACK_WIN => write!(f, "black wins"),
            Eval(val) => write!(f, "{:+}", val),
        }
    }
}

pub trait EvaluatePosition {
    fn evaluate(&self, board: &Board) -> Eval;
}

/// Material count. A finished game scores as a win for the side that made
/// the last move.
#[derive(Clone, Copy)]
pub struct MaterialEvaluator;

impl EvaluatePosition for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> Eval {
        if board.game_over() {
            return Eval::win_for(board.to_move().opposite_side());
        }

        let white = i32::from(board.num_pieces(Side::White));
        let black = i32::from(board.num_pieces(Side::Black));
        Eval(white - black)
    }
}

pub static POSITION_EVALUATOR: MaterialEvaluator = MaterialEvaluator {};

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;
    use testresult::TestResult;

    #[test_case("wwwww wwwww bb-ww bbbbb bbbbb", Side::White, Eval::EVEN ; "start")]
    #[test_case("ww--- ----- ----- ----- ---b-", Side::White, Eval(1) ; "white ahead")]
    #[test_case("w---- ----- ----- ----b ---bb", Side::Black, Eval(-2) ; "black ahead")]
    #[test_case("----- ----- ----- ----- bb---", Side::White, Eval::BLACK_WIN ; "white has no pieces")]
    #[test_case("----b ----- ----- ----- --w--", Side::White, Eval::BLACK_WIN ; "white is stuck")]
    #[test_case("--w-- ----- ----- ----- -----", Side::Black, Eval::WHITE_WIN ; "black has no pieces")]
    fn test_evaluate(layout: &str, to_move: Side, want: Eval) -> TestResult {
        let board = Board::from_layout(layout, to_move)?;
        assert_eq!(POSITION_EVALUATOR.evaluate(&board), want);
        Ok(())
    }

    #[test]
    fn test_win_outranks_material() {
        assert!(Eval::WHITE_WIN > Eval(24));
        assert!(Eval::BLACK_WIN < Eval(-24));
        assert!(Eval::MAX > Eval::WHITE_WIN);
        assert!(Eval::MIN < Eval::BLACK_WIN);
        assert_eq!(-Eval::WHITE_WIN, Eval::BLACK_WIN);
    }

    #[test]
    fn test_display() {
        assert_eq!(Eval(3).to_string(), "+3");
        assert_eq!(Eval(-2).to_string(), "-2");
        assert_eq!(Eval::WHITE_WIN.to_string(), "white wins");
    }
}
