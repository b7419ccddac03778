use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;

use crate::bitboard::Square;

/// Upper bound on hops in one chain: every hop removes an opponent piece.
pub const MAX_HOPS: usize = 24;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("move: want <square>-<square>[-<square>...], got {0}")]
    TooFewSquares(String),

    #[error("move: unknown square {0}")]
    Square(String),

    #[error("move: {0}-{1} is not a capture, only captures can be chained")]
    NonCaptureInChain(Square, Square),

    #[error("move: at most {max} hops, got {0}", max = MAX_HOPS)]
    TooManyHops(usize),
}

/// A single step or capture hop. `captured` is set for hops that jump two squares.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hop {
    pub src: Square,
    pub dest: Square,
    pub captured: Option<Square>,
}

impl Hop {
    fn new(src: Square, dest: Square) -> Self {
        Self {
            src,
            dest,
            captured: src.hop_midpoint(dest),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Move {
    hops: ArrayVec<Hop, MAX_HOPS>,
}

impl Move {
    /// A single-hop move. Squares two apart in a line form a capture hop
    /// over the midpoint; `Move::new(sq, sq)` is the empty seed move.
    pub fn new(src: Square, dest: Square) -> Move {
        let mut hops = ArrayVec::new();
        hops.push(Hop::new(src, dest));
        Self { hops }
    }

    /// Appends `next` to this move. Panics unless `next` starts where this
    /// move ends.
    pub fn concat(self, next: Move) -> Move {
        if self.is_degenerate() {
            return next;
        }
        if next.is_degenerate() {
            return self;
        }
        assert_eq!(
            self.dest(),
            next.src(),
            "concat: {} does not continue {}",
            next,
            self
        );

        let mut hops = self.hops;
        hops.extend(next.hops);
        Self { hops }
    }

    pub fn src(&self) -> Square {
        self.hops[0].src
    }

    pub fn dest(&self) -> Square {
        self.hops[self.hops.len() - 1].dest
    }

    pub fn is_capture(&self) -> bool {
        self.hops.iter().any(|hop| hop.captured.is_some())
    }

    pub fn is_degenerate(&self) -> bool {
        self.hops.len() == 1 && self.hops[0].src == self.hops[0].dest
    }

    /// Captured squares in the order they are jumped.
    pub fn captured(&self) -> impl Iterator<Item = Square> + '_ {
        self.hops.iter().filter_map(|hop| hop.captured)
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.src())?;
        for hop in &self.hops {
            write!(f, "-{}", hop.dest)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, hop) in self.hops.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} -> {}", hop.src, hop.dest)?;
            if let Some(captured) = hop.captured {
                write!(f, " (x{})", captured)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squares = s
            .trim()
            .split('-')
            .map(|part| {
                Square::from_str(&part.to_ascii_lowercase())
                    .map_err(|_| MoveParseError::Square(part.to_string()))
            })
            .collect::<Result<Vec<Square>, _>>()?;

        if squares.len() < 2 {
            return Err(MoveParseError::TooFewSquares(s.to_string()));
        }
        if squares.len() - 1 > MAX_HOPS {
            return Err(MoveParseError::TooManyHops(squares.len() - 1));
        }

        let mut hops = ArrayVec::new();
        for pair in squares.windows(2) {
            let hop = Hop::new(pair[0], pair[1]);
            if squares.len() > 2 && hop.captured.is_none() {
                return Err(MoveParseError::NonCaptureInChain(pair[0], pair[1]));
            }
            hops.push(hop);
        }
        Ok(Self { hops })
    }
}
