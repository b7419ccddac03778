use std::str::FromStr;

use crate::bitboard::{Square, NUM_SQUARES, SIDE_LEN};
use crate::board::{Board, Side, Sides};

/// The opening position, rows 1 to 5.
pub const START_LAYOUT: &str = "wwwww wwwww bb-ww bbbbb bbbbb";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout: want 25 marks, got {0}")]
    Length(usize),

    #[error("layout: want 'w'|'b'|'-', got {0:?} at mark {1}")]
    Mark(char, usize),

    #[error("side to move: want 'w'|'b'|'white'|'black', got {0:?}")]
    SideToMove(String),
}

impl FromStr for Side {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Side::White),
            "b" | "black" => Ok(Side::Black),
            _ => Err(LayoutError::SideToMove(s.to_string())),
        }
    }
}

impl TryFrom<char> for Side {
    type Error = LayoutError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'w' | 'W' => Ok(Side::White),
            'b' | 'B' => Ok(Side::Black),
            _ => Err(LayoutError::SideToMove(value.to_string())),
        }
    }
}

/// Parses 25 marks, row 1 first. Whitespace between marks is ignored.
pub(super) fn parse_layout(layout: &str) -> Result<Sides, LayoutError> {
    let marks = layout
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<Vec<char>>();

    if marks.len() != NUM_SQUARES {
        Err(LayoutError::Length(marks.len()))?
    }

    let mut sides = Sides::new();
    for (idx, mark) in marks.into_iter().enumerate() {
        let square = Square::from_index(idx as u8);
        match mark {
            '-' => {}
            _ => {
                let side = Side::try_from(mark).map_err(|_| LayoutError::Mark(mark, idx))?;
                sides.get_mut(side).set_square(square);
            }
        }
    }
    Ok(sides)
}

impl Board {
    /// The position as 25 marks, row 1 first.
    pub fn to_layout(&self) -> String {
        Square::all()
            .into_iter()
            .map(|sq| self.piece_at(sq).map_or('-', Side::mark))
            .collect()
    }

    /// Rows 5 to 1, top to bottom. With `legend`, rows are numbered and a
    /// file legend closes the board.
    pub fn render(&self, legend: bool) -> String {
        let mut out = String::with_capacity(80);
        for (idx, sq) in Square::list_white_perspective().into_iter().enumerate() {
            if sq.file() == 0 {
                if idx != 0 {
                    out.push('\n');
                }
                if legend {
                    out.push_str(&format!("{} ", sq.rank() + 1));
                } else {
                    out.push_str("  ");
                }
            } else {
                out.push(' ');
            }
            out.push(self.piece_at(sq).map_or('-', Side::mark));
        }
        if legend {
            out.push_str("\n  ");
            let files = (0..SIDE_LEN)
                .map(|file| ((b'a' + file) as char).to_string())
                .collect::<Vec<String>>();
            out.push_str(&files.join(" "));
        }
        out
    }
}
