use crate::board::Board;
use crate::moves::Move;

pub trait GenerateMoves {
    /// Legal moves for the side to move: maximal capture chains when any
    /// capture exists, otherwise simple steps. Empty once the game is over.
    fn gen_moves(&self, board: &Board) -> Vec<Move>;

    /// Checks `mve` against the rules without enumerating every legal move.
    fn is_legal(&self, board: &Board, mve: &Move) -> bool;
}
