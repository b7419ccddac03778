use crate::bitboard::{Square, NUM_SQUARES};
use crate::board::Side;

/// One capture hop: jump over `captured` and land on `landing`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureHop {
    pub captured: Square,
    pub landing: Square,
}

macro_rules! hops {
    ($($captured:ident => $landing:ident),* $(,)?) => {
        &[$(CaptureHop { captured: $captured, landing: $landing }),*]
    };
}

// Per-square tables, indexed by `Square as usize`. The order within each
// entry is the order moves are generated in, and search breaks ties by it.

#[rustfmt::skip]
static WHITE_STEPS: [&[Square]; NUM_SQUARES] = {
    use Square::*;
    [
        &[A2, B1, B2], &[A1, B2, C1], &[B1, C2, D1, B2, D2], &[C1, D2, E1], &[D1, E2, D2],
        &[A3, B2], &[A2, B3, C2, A3, C3], &[B2, C3, D2], &[C2, D3, E2, C3, E3], &[D2, E3],
        &[A4, B3, B4], &[A3, B4, C3], &[B3, C4, D3, B4, D4], &[C3, D4, E3], &[D3, E4, D4],
        &[A5, B4], &[A4, B5, C4, A5, C5], &[B4, C5, D4], &[C4, D5, E4, C5, E5], &[D4, E5],
        &[], &[], &[], &[], &[],
    ]
};

#[rustfmt::skip]
static BLACK_STEPS: [&[Square]; NUM_SQUARES] = {
    use Square::*;
    [
        &[], &[], &[], &[], &[],
        &[A1, B2], &[A2, B1, C2, A1, C1], &[B2, C1, D2], &[C2, D1, E2, C1, E1], &[D2, E1],
        &[A2, B3, B2], &[A3, B2, C3], &[B3, C2, D3, B2, D2], &[C3, D2, E3], &[D3, E2, D2],
        &[A3, B4], &[A4, B3, C4, A3, C3], &[B4, C3, D4], &[C4, D3, E4, C3, E3], &[D4, E3],
        &[A4, B5, B4], &[A5, B4, C5], &[B5, C4, D5, B4, D4], &[C5, D4, E5], &[D5, E4, D4],
    ]
};

static HOPS: [&[CaptureHop]; NUM_SQUARES] = {
    use Square::*;
    [
        hops![A2 => A3, B2 => C3, B1 => C1],
        hops![B2 => B3, C1 => D1],
        hops![B1 => A1, B2 => A3, C2 => C3, D2 => E3, D1 => E1],
        hops![C1 => B1, D2 => D3],
        hops![E2 => E3, D2 => C3, D1 => C1],
        hops![A3 => A4, B2 => C2],
        hops![B3 => B4, C3 => D4, C2 => D2],
        hops![B2 => A2, C3 => C4, D2 => E2],
        hops![C2 => B2, C3 => B4, D3 => D4],
        hops![D2 => C2, E3 => E4],
        hops![A2 => A1, B2 => C1, B3 => C3, B4 => C5, A4 => A5],
        hops![B2 => B1, C3 => D3, B4 => B5],
        hops![
            B2 => A1, B3 => A3, B4 => A5, C4 => C5,
            D4 => E5, D3 => E3, D2 => E1, C2 => C1,
        ],
        hops![D2 => D1, C3 => B3, D4 => D5],
        hops![E2 => E1, D2 => C1, D3 => C3, D4 => C5, E4 => E5],
        hops![A3 => A2, B4 => C4],
        hops![B3 => B2, C3 => D2, C4 => D4],
        hops![B4 => A4, C3 => C2, D4 => E4],
        hops![C4 => B4, C3 => B2, D3 => D2],
        hops![D4 => C4, E3 => E2],
        hops![A4 => A3, B4 => C3, B5 => C5],
        hops![B4 => B3, C5 => D5],
        hops![B5 => A5, B4 => A3, C4 => C3, D4 => E3, D5 => E5],
        hops![C5 => B5, D4 => D3],
        hops![D5 => C5, D4 => C3, E4 => E3],
    ]
};

/// Static adjacency data: simple steps per side and capture hops per square.
pub struct MoveCatalog {
    white_steps: &'static [&'static [Square]; NUM_SQUARES],
    black_steps: &'static [&'static [Square]; NUM_SQUARES],
    hops: &'static [&'static [CaptureHop]; NUM_SQUARES],
}

pub static MOVE_CATALOG: MoveCatalog = MoveCatalog {
    white_steps: &WHITE_STEPS,
    black_steps: &BLACK_STEPS,
    hops: &HOPS,
};

impl MoveCatalog {
    /// Destinations a `side` piece on `square` may step to, ignoring occupancy.
    pub fn simple_moves(&self, square: Square, side: Side) -> &'static [Square] {
        match side {
            Side::White => self.white_steps[square as usize],
            Side::Black => self.black_steps[square as usize],
        }
    }

    pub fn capture_hops(&self, square: Square) -> &'static [CaptureHop] {
        self.hops[square as usize]
    }
}
