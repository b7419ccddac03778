use std::fmt::Display;
use std::time::{Duration, Instant};

use tracing::{debug, debug_span, info};

use crate::board::{Board, Side};
use crate::evaluation::{Eval, EvaluatePosition, POSITION_EVALUATOR};
use crate::move_gen::{GenerateMoves, MOVE_GEN};
use crate::moves::Move;

pub const DEFAULT_MAX_DEPTH: u8 = 5;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub max_depth: Option<u8>,
}

impl SearchParams {
    pub fn with_depth(max_depth: u8) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }

    pub fn depth(&self) -> u8 {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }
}

impl Display for SearchParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.max_depth {
            Some(max_depth) => write!(f, "SearchParams: max_depth: {}", max_depth),
            None => write!(f, "SearchParams: max_depth: {} (default)", DEFAULT_MAX_DEPTH),
        }
    }
}

#[derive(Debug)]
pub struct SearchResultInfo {
    pub eval: Eval,
    pub positions_processed: u64,
    pub time_elapsed: Duration,
}

/// Fixed-depth minimax with alpha-beta pruning for the side to move. White
/// maximizes and Black minimizes the shared score. Returns no move when the
/// game is over or the depth is zero.
pub fn search(
    board: &Board,
    params: &SearchParams,
    move_gen: impl GenerateMoves + std::marker::Copy,
    position_eval: impl EvaluatePosition + std::marker::Copy,
) -> (Option<Move>, SearchResultInfo) {
    let _span = debug_span!("search", board = ?board, params = %params).entered();
    let start = Instant::now();

    let mut best_move: Option<Move> = None;
    let mut positions_processed: u64 = 0;

    let eval = search_helper(
        board,
        params.depth(),
        Eval::MIN,
        Eval::MAX,
        Some(&mut best_move),
        &mut positions_processed,
        move_gen,
        position_eval,
    );

    let search_info = SearchResultInfo {
        eval,
        positions_processed,
        time_elapsed: start.elapsed(),
    };
    info!(
        "best move {} eval {} nodes {} time {:?}",
        best_move
            .as_ref()
            .map_or("none".to_string(), |mve| mve.to_string()),
        search_info.eval,
        search_info.positions_processed,
        search_info.time_elapsed,
    );

    (best_move, search_info)
}

/// The best move for `side` looking `max_depth` plies ahead. `side` must be
/// the side to move.
pub fn best_move(board: &Board, side: Side, max_depth: u8) -> Option<Move> {
    assert_eq!(
        side,
        board.to_move(),
        "best_move: {} asked to move, but it is {}'s turn",
        side,
        board.to_move()
    );
    let (best_move, _) = search(
        board,
        &SearchParams::with_depth(max_depth),
        MOVE_GEN,
        POSITION_EVALUATOR,
    );
    best_move
}

/// Returns the bounded value of `board`. A candidate replaces the recorded
/// best move whenever it ties or beats the running bound, so the later of two
/// equal moves wins. `best_move` is only passed at the root.
#[allow(clippy::too_many_arguments)]
fn search_helper(
    board: &Board,
    depth: u8,
    mut alpha: Eval,
    mut beta: Eval,
    mut best_move: Option<&mut Option<Move>>,
    positions_processed: &mut u64,
    move_gen: impl GenerateMoves + std::marker::Copy,
    position_eval: impl EvaluatePosition + std::marker::Copy,
) -> Eval {
    *positions_processed += 1;

    if depth == 0 || board.game_over() {
        return position_eval.evaluate(board);
    }

    let moves = move_gen.gen_moves(board);
    if moves.is_empty() {
        return position_eval.evaluate(board);
    }

    let side = board.to_move();
    for mve in moves {
        let mut move_board = board.clone();
        move_board.make_move(&mve);

        let val = search_helper(
            &move_board,
            depth - 1,
            alpha,
            beta,
            None,
            positions_processed,
            move_gen,
            position_eval,
        );
        if best_move.is_some() {
            debug!("{}: {}", mve, val);
        }

        match side {
            Side::White => {
                if val >= alpha {
                    alpha = val;
                    if let Some(best) = best_move.as_deref_mut() {
                        *best = Some(mve);
                    }
                }
                if val >= beta {
                    break;
                }
            }
            Side::Black => {
                if val <= beta {
                    beta = val;
                    if let Some(best) = best_move.as_deref_mut() {
                        *best = Some(mve);
                    }
                }
                if val <= alpha {
                    break;
                }
            }
        }
    }

    match side {
        Side::White => alpha,
        Side::Black => beta,
    }
}
