pub mod catalog;
mod generate;
mod traits;

use crate::board::Board;
use crate::moves::Move;

use self::catalog::MOVE_CATALOG;
pub(crate) use self::generate::can_capture_from;
pub use self::traits::GenerateMoves;

/// Move generator backed by the static adjacency catalog.
#[derive(Clone, Copy)]
pub struct CatalogMoveGen;

impl GenerateMoves for CatalogMoveGen {
    fn gen_moves(&self, board: &Board) -> Vec<Move> {
        generate::gen_moves(board, &MOVE_CATALOG)
    }

    fn is_legal(&self, board: &Board, mve: &Move) -> bool {
        generate::is_legal(board, mve, &MOVE_CATALOG)
    }
}

pub static MOVE_GEN: CatalogMoveGen = CatalogMoveGen {};
