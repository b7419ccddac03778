use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use strum_macros::{Display, EnumString};

pub const SIDE_LEN: u8 = 5;
pub const NUM_SQUARES: usize = 25;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SquareError {
    #[error("square index: want 0 <= x < 25, got {0}")]
    OutOfRange(u8),

    #[error("square name: want [a-e][1-5], got {0}")]
    Name(String),
}

#[allow(dead_code)]
#[rustfmt::skip]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display, PartialOrd, Ord, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Square {
    A1, B1, C1, D1, E1,
    A2, B2, C2, D2, E2,
    A3, B3, C3, D3, E3,
    A4, B4, C4, D4, E4,
    A5, B5, C5, D5, E5,
}

#[rustfmt::skip]
const SQUARES: [Square; NUM_SQUARES] = {
    use Square::*;
    [
        A1, B1, C1, D1, E1,
        A2, B2, C2, D2, E2,
        A3, B3, C3, D3, E3,
        A4, B4, C4, D4, E4,
        A5, B5, C5, D5, E5,
    ]
};

impl Square {
    /// Panics if `idx` is not a square index. External input goes through
    /// `Square::try_from` instead.
    pub const fn from_index(idx: u8) -> Square {
        assert!((idx as usize) < NUM_SQUARES, "square out of bounds");
        SQUARES[idx as usize]
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn file(self) -> u8 {
        self as u8 % SIDE_LEN
    }

    pub const fn rank(self) -> u8 {
        self as u8 / SIDE_LEN
    }

    pub const fn from_file_rank(file: i8, rank: i8) -> Option<Square> {
        if file < 0 || rank < 0 || file >= SIDE_LEN as i8 || rank >= SIDE_LEN as i8 {
            return None;
        }
        Some(Square::from_index(rank as u8 * SIDE_LEN + file as u8))
    }

    /// Diagonal lines only run through squares with an even `file + rank`.
    pub const fn on_diagonal(self) -> bool {
        (self.file() + self.rank()) % 2 == 0
    }

    /// The square jumped over when moving from `self` to `other`, if the two
    /// lie exactly two apart on a row, column or diagonal.
    pub const fn hop_midpoint(self, other: Square) -> Option<Square> {
        let file_diff = other.file() as i8 - self.file() as i8;
        let rank_diff = other.rank() as i8 - self.rank() as i8;

        let straight = (file_diff == 0 && rank_diff.abs() == 2)
            || (rank_diff == 0 && file_diff.abs() == 2);
        let diagonal = file_diff.abs() == 2 && rank_diff.abs() == 2;

        if !straight && !diagonal {
            return None;
        }
        Square::from_file_rank(
            self.file() as i8 + file_diff / 2,
            self.rank() as i8 + rank_diff / 2,
        )
    }

    pub const fn all() -> [Square; NUM_SQUARES] {
        SQUARES
    }

    /// Squares in display order: row 5 first, files a to e.
    pub fn list_white_perspective() -> [Square; NUM_SQUARES] {
        let mut squares = SQUARES;
        for (idx, sq) in squares.iter_mut().enumerate() {
            let row = SIDE_LEN as usize - 1 - idx / SIDE_LEN as usize;
            *sq = SQUARES[row * SIDE_LEN as usize + idx % SIDE_LEN as usize];
        }
        squares
    }
}

impl TryFrom<u8> for Square {
    type Error = SquareError;

    fn try_from(idx: u8) -> Result<Self, Self::Error> {
        if (idx as usize) < NUM_SQUARES {
            Ok(Square::from_index(idx))
        } else {
            Err(SquareError::OutOfRange(idx))
        }
    }
}

const FULL_MASK: u32 = (1 << NUM_SQUARES) - 1;

#[derive(PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct BitBoard(u32);

impl BitBoard {
    pub(crate) const fn empty() -> Self {
        BitBoard(0)
    }

    pub(crate) const fn from_square(square: Square) -> Self {
        BitBoard(1 << (square as u8))
    }

    pub(crate) fn from_squares(squares: &[Square]) -> Self {
        BitBoard(squares.iter().fold(0, |board, sq| board | 1 << (*sq as u8)))
    }

    pub(crate) fn move_piece(&mut self, src: Square, dest: Square) {
        self.clear_square(src);
        self.set_square(dest);
    }

    pub(crate) fn set_square(&mut self, square: Square) {
        self.0 |= 1 << square as u32
    }

    pub(crate) fn clear_square(&mut self, square: Square) {
        self.0 &= !(1 << square as u32)
    }

    pub fn is_square_set(&self, square: Square) -> bool {
        self.0 & 1 << (square as u32) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn num_squares_set(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// The lowest set square. Only meaningful on a non-empty board.
    pub(crate) const fn get_lsb(self) -> Square {
        debug_assert!(self.0 != 0, "want != 0, got 0");
        Square::from_index(self.0.trailing_zeros() as u8)
    }

    pub(crate) fn pop_lsb(&mut self) -> Square {
        let lsb = self.get_lsb();
        self.0 &= self.0 - 1;
        lsb
    }

    /// Iterates set squares in ascending index order.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        let mut bb = self;
        std::iter::from_fn(move || {
            if bb.is_empty() {
                None
            } else {
                Some(bb.pop_lsb())
            }
        })
    }

    pub fn to_squares(self) -> Vec<Square> {
        self.squares().collect()
    }
}

impl BitOr for BitBoard {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        BitBoard(self.0 | rhs.0)
    }
}

impl BitOrAssign for BitBoard {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for BitBoard {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        BitBoard(self.0 & rhs.0)
    }
}

impl BitAndAssign for BitBoard {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Not for BitBoard {
    type Output = Self;

    fn not(self) -> Self::Output {
        BitBoard(!self.0 & FULL_MASK)
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(NUM_SQUARES + 4);
        for (idx, sq) in Square::list_white_perspective().into_iter().enumerate() {
            board_str.push(if self.is_square_set(sq) { 'X' } else { '.' });
            if (idx + 1) % SIDE_LEN as usize == 0 && idx != NUM_SQUARES - 1 {
                board_str.push('\n');
            }
        }
        write!(f, "{}", board_str)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Square::*;
    use super::*;
    use test_case::test_case;
    use testresult::TestResult;

    #[test_case(A1, 0, 0)]
    #[test_case(E1, 4, 0)]
    #[test_case(C3, 2, 2)]
    #[test_case(B4, 1, 3)]
    #[test_case(E5, 4, 4)]
    fn test_file_rank(square: Square, file: u8, rank: u8) {
        assert_eq!(square.file(), file);
        assert_eq!(square.rank(), rank);
        assert_eq!(Square::from_index(square.index()), square);
    }

    #[test_case("a1", A1)]
    #[test_case("c3", C3)]
    #[test_case("e5", E5)]
    fn test_from_str(inp: &str, want: Square) -> TestResult {
        assert_eq!(Square::from_str(inp)?, want);
        assert_eq!(want.to_string(), inp);
        Ok(())
    }

    #[test_case("f1")]
    #[test_case("a6")]
    #[test_case("")]
    fn test_from_str_invalid(inp: &str) {
        assert!(Square::from_str(inp).is_err());
    }

    #[test]
    fn test_try_from_out_of_range() {
        assert_eq!(Square::try_from(24), Ok(E5));
        assert_eq!(Square::try_from(25), Err(SquareError::OutOfRange(25)));
    }

    #[test]
    #[should_panic(expected = "square out of bounds")]
    fn test_from_index_out_of_range() {
        Square::from_index(25);
    }

    #[test_case(A1, A3, Some(A2) ; "vertical")]
    #[test_case(C3, A3, Some(B3) ; "horizontal")]
    #[test_case(A1, C3, Some(B2) ; "diagonal")]
    #[test_case(E5, C3, Some(D4) ; "anti diagonal")]
    #[test_case(A3, B2, None ; "single step")]
    #[test_case(A1, B3, None ; "knight shape")]
    #[test_case(C3, C3, None ; "same square")]
    fn test_hop_midpoint(src: Square, dest: Square, want: Option<Square>) {
        assert_eq!(src.hop_midpoint(dest), want);
    }

    #[test_case(A1, true)]
    #[test_case(B1, false)]
    #[test_case(C3, true)]
    #[test_case(D3, false)]
    fn test_on_diagonal(square: Square, want: bool) {
        assert_eq!(square.on_diagonal(), want);
    }

    #[test]
    fn test_squares_ascending() {
        let bb = BitBoard::from_squares(&[E5, A1, C3]);
        assert_eq!(bb.to_squares(), vec![A1, C3, E5]);
        assert_eq!(bb.num_squares_set(), 3);
    }

    #[test]
    fn test_not_stays_on_board() {
        assert_eq!((!BitBoard::empty()).num_squares_set(), NUM_SQUARES as u8);
        assert_eq!((!!BitBoard::empty()).num_squares_set(), 0);
        let others = !BitBoard::from_square(C3);
        assert!(!others.is_square_set(C3));
        assert_eq!(others.num_squares_set(), 24);
    }

    #[test]
    fn test_list_white_perspective() {
        let squares = Square::list_white_perspective();
        assert_eq!(squares[0], A5);
        assert_eq!(squares[4], E5);
        assert_eq!(squares[20], A1);
        assert_eq!(squares[24], E1);
    }
}
