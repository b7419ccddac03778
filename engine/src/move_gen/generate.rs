use super::catalog::MoveCatalog;
use crate::bitboard::Square;
use crate::board::{Board, Side, Sides};
use crate::moves::Move;

fn hop_available(sides: &Sides, side: Side, captured: Square, landing: Square) -> bool {
    sides.get(side.opposite_side()).is_square_set(captured)
        && !sides.occupied().is_square_set(landing)
}

pub(crate) fn can_capture_from(sides: &Sides, side: Side, square: Square) -> bool {
    can_capture_with(sides, side, square, &super::catalog::MOVE_CATALOG)
}

fn can_capture_with(sides: &Sides, side: Side, square: Square, catalog: &MoveCatalog) -> bool {
    catalog
        .capture_hops(square)
        .iter()
        .any(|hop| hop_available(sides, side, hop.captured, hop.landing))
}

/// Depth-first walk over capture hops from `square`, where `prefix` is the
/// chain played so far on the scratch `sides`. Emits a move for every path
/// that ends on a square with no further hop.
fn gen_chains(
    sides: &Sides,
    side: Side,
    square: Square,
    prefix: Move,
    catalog: &MoveCatalog,
    moves: &mut Vec<Move>,
) {
    let mut extended = false;

    for hop in catalog.capture_hops(square) {
        if !hop_available(sides, side, hop.captured, hop.landing) {
            continue;
        }
        extended = true;

        let mut scratch = sides.clone();
        scratch.apply_hop(side, square, hop.landing, Some(hop.captured));
        let chain = prefix.clone().concat(Move::new(square, hop.landing));
        gen_chains(&scratch, side, hop.landing, chain, catalog, moves);
    }

    if !extended && !prefix.is_degenerate() {
        moves.push(prefix);
    }
}

fn gen_chains_from(board: &Board, square: Square, catalog: &MoveCatalog) -> Vec<Move> {
    let mut moves = Vec::new();
    gen_chains(
        &board.sides,
        board.to_move(),
        square,
        Move::new(square, square),
        catalog,
        &mut moves,
    );
    moves
}

pub(super) fn gen_moves(board: &Board, catalog: &MoveCatalog) -> Vec<Move> {
    if board.game_over() {
        return Vec::new();
    }

    let side = board.to_move();
    let own = board.sides.get(side);

    let mut moves = Vec::new();
    for src in own.squares() {
        moves.extend(gen_chains_from(board, src, catalog));
    }
    if !moves.is_empty() {
        return moves;
    }

    let occupied = board.sides.occupied();
    for src in own.squares() {
        for &dest in catalog.simple_moves(src, side) {
            if occupied.is_square_set(dest) {
                continue;
            }
            let mve = Move::new(src, dest);
            if !board.is_reversal(&mve) {
                moves.push(mve);
            }
        }
    }
    moves
}

pub(super) fn is_legal(board: &Board, mve: &Move, catalog: &MoveCatalog) -> bool {
    let side = board.to_move();
    if board.game_over() || mve.is_degenerate() || board.piece_at(mve.src()) != Some(side) {
        return false;
    }

    if mve.is_capture() {
        return gen_chains_from(board, mve.src(), catalog).contains(mve);
    }

    if mve.hops().len() != 1 {
        return false;
    }

    let capture_available = board
        .sides
        .get(side)
        .squares()
        .any(|sq| can_capture_with(&board.sides, side, sq, catalog));

    !capture_available
        && catalog.simple_moves(mve.src(), side).contains(&mve.dest())
        && board.piece_at(mve.dest()).is_none()
        && !board.is_reversal(mve)
}
