use tracing::debug;

use crate::board::{Board, Side};
use crate::evaluation::POSITION_EVALUATOR;
use crate::move_gen::MOVE_GEN;
use crate::moves::Move;
use crate::search::{search, SearchParams};

/// A source of moves for one side of a game.
pub trait Player {
    fn side(&self) -> Side;

    /// The move to play on `board`, or `None` when the player has nothing to
    /// offer and is leaving the game.
    fn produce_move(&mut self, board: &Board) -> Option<Move>;
}

/// Plays whatever the search considers best.
#[derive(Clone, Debug)]
pub struct AiPlayer {
    side: Side,
    params: SearchParams,
}

impl AiPlayer {
    pub fn new(side: Side, params: SearchParams) -> Self {
        Self { side, params }
    }
}

impl Player for AiPlayer {
    fn side(&self) -> Side {
        self.side
    }

    fn produce_move(&mut self, board: &Board) -> Option<Move> {
        if board.to_move() != self.side {
            debug!("{} asked to move on {}'s turn", self.side, board.to_move());
            return None;
        }
        let (best_move, info) = search(board, &self.params, MOVE_GEN, POSITION_EVALUATOR);
        debug!(
            "{} searched {} positions in {:?}",
            self.side, info.positions_processed, info.time_elapsed
        );
        best_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testresult::TestResult;

    #[test]
    fn test_ai_player_takes_capture() -> TestResult {
        let board = Board::from_layout("w---w b---- ----- ----- -----", Side::White)?;
        let mut player = AiPlayer::new(Side::White, SearchParams::with_depth(2));
        let mve = player.produce_move(&board).map(|mve| mve.to_string());
        assert_eq!(mve.as_deref(), Some("a1-a3"));
        Ok(())
    }

    #[test]
    fn test_ai_player_no_move_when_game_over() -> TestResult {
        let board = Board::from_layout("----- ----- ----- ----- bb---", Side::White)?;
        let mut player = AiPlayer::new(Side::White, SearchParams::default());
        assert_eq!(player.produce_move(&board), None);
        Ok(())
    }

    #[test]
    fn test_ai_player_not_its_turn() {
        let mut player = AiPlayer::new(Side::Black, SearchParams::with_depth(1));
        assert_eq!(player.produce_move(&Board::start()), None);
    }
}
