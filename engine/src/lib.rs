pub mod bitboard;
pub mod board;
pub mod evaluation;
pub mod move_gen;
pub mod moves;
pub mod perft;
pub mod player;
pub mod search;
pub mod view;

pub use bitboard::{BitBoard, Square, SquareError};
pub use board::{Board, LayoutError, Side, State, START_LAYOUT};
pub use evaluation::{Eval, EvaluatePosition, MaterialEvaluator, POSITION_EVALUATOR};
pub use move_gen::catalog::{CaptureHop, MoveCatalog, MOVE_CATALOG};
pub use move_gen::{CatalogMoveGen, GenerateMoves, MOVE_GEN};
pub use moves::{Hop, Move, MoveParseError, MAX_HOPS};
pub use perft::{perft, perft_full, PerftDepthResult, PerftResult};
pub use player::{AiPlayer, Player};
pub use search::{best_move, search, SearchParams, SearchResultInfo, DEFAULT_MAX_DEPTH};
pub use view::{BoardObserver, BoardView, MutableBoard, ObservableBoard};

pub const NAME: &str = "qirkat";
