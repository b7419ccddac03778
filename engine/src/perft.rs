use std::collections::HashMap;
use std::fmt::Display;
use std::time::{Duration, Instant};

use tabled::{Table, Tabled};

use crate::board::Board;
use crate::move_gen::GenerateMoves;
use crate::moves::Move;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Tabled)]
pub struct PerftDepthResult {
    pub tot: u64,
    pub captures: u64,
    pub multi_captures: u64,
    pub pieces_captured: u64,
    pub terminal: u64,
}

impl PerftDepthResult {
    pub fn new(
        tot: u64,
        captures: u64,
        multi_captures: u64,
        pieces_captured: u64,
        terminal: u64,
    ) -> Self {
        PerftDepthResult {
            tot,
            captures,
            multi_captures,
            pieces_captured,
            terminal,
        }
    }
}

pub struct PerftResult {
    pub depth_results: Vec<PerftDepthResult>,
    pub tot_nodes: u64,
    pub time_elapsed: Duration,
    pub nodes_per_second: f64,
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "total nodes: {}", self.tot_nodes)?;
        writeln!(f, "time elapsed: {}", self.time_elapsed.as_secs_f32())?;
        writeln!(f, "nodes/s: {:.0}", self.nodes_per_second)?;
        writeln!(f, "{}", Table::new(&self.depth_results))?;
        Ok(())
    }
}

/// Counts leaf positions `depth` plies below `board`, split by root move.
pub fn perft(
    board: &Board,
    depth: usize,
    move_gen: impl GenerateMoves + std::marker::Copy,
) -> (HashMap<Move, usize>, usize) {
    if depth == 0 {
        return (HashMap::new(), 1);
    }

    let mut move_counts = HashMap::new();
    for mve in move_gen.gen_moves(board) {
        let mut move_board = board.clone();
        move_board.make_move(&mve);
        move_counts.insert(mve, perft_helper(&move_board, depth - 1, move_gen));
    }

    let tot = move_counts.values().sum();
    (move_counts, tot)
}

fn perft_helper(
    board: &Board,
    depth: usize,
    move_gen: impl GenerateMoves + std::marker::Copy,
) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = move_gen.gen_moves(board);
    if depth == 1 {
        return moves.len();
    }

    moves
        .into_iter()
        .map(|mve| {
            let mut move_board = board.clone();
            move_board.make_move(&mve);
            perft_helper(&move_board, depth - 1, move_gen)
        })
        .sum()
}

/// Per-depth move statistics for every line up to `depth` plies.
pub fn perft_full(
    board: &Board,
    depth: usize,
    move_gen: impl GenerateMoves + std::marker::Copy,
) -> PerftResult {
    let mut depth_results = vec![PerftDepthResult::default(); depth];

    let start = Instant::now();
    perft_full_helper(&mut depth_results, board, move_gen, 0);
    let time_elapsed = start.elapsed();

    let tot_nodes = depth_results.iter().fold(0, |tot, curr| tot + curr.tot);
    let nodes_per_second = tot_nodes as f64 / time_elapsed.as_secs_f64();

    PerftResult {
        depth_results,
        tot_nodes,
        time_elapsed,
        nodes_per_second,
    }
}

fn perft_full_helper(
    depth_results: &mut Vec<PerftDepthResult>,
    board: &Board,
    move_gen: impl GenerateMoves + std::marker::Copy,
    curr_depth: usize,
) {
    if curr_depth == depth_results.len() {
        return;
    }

    for mve in move_gen.gen_moves(board) {
        let mut move_board = board.clone();
        move_board.make_move(&mve);

        let curr_res = &mut depth_results[curr_depth];
        curr_res.tot += 1;
        let num_captured = mve.captured().count() as u64;
        if num_captured > 0 {
            curr_res.captures += 1;
            curr_res.pieces_captured += num_captured;
        }
        if num_captured > 1 {
            curr_res.multi_captures += 1;
        }
        if move_board.game_over() {
            curr_res.terminal += 1;
        }

        perft_full_helper(depth_results, &move_board, move_gen, curr_depth + 1);
    }
}
