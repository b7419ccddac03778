use std::str::FromStr;

use qirkat::{best_move, Board, Move, Side};

use test_case::test_case;
use testresult::TestResult;

#[test_case(Board::start(), vec!["d3-c3", "b3-d3", "e3-c3"], "wwwww wwwww b-w-- bbbbb bbbbb", Side::Black ; "opening exchange")]
#[test_case(
    Board::from_layout("w---w b---b ----- b---- -----", Side::White).unwrap(),
    vec!["a1-a3-a5", "e2-d2", "e1-c3"],
    "----- ----- --w-- ----- w----",
    Side::Black ;
    "forced win"
)]
fn test_play_moves(
    mut board: Board,
    moves: Vec<&str>,
    layout: &str,
    to_move: Side,
) -> TestResult {
    for mve in moves {
        let mve = Move::from_str(mve)?;
        assert!(board.is_legal(&mve), "{} on {:?}", mve, board);
        board.make_move(&mve);
    }
    assert_eq!(board, Board::from_layout(layout, to_move)?);
    Ok(())
}

#[test]
fn test_capture_ends_game() -> TestResult {
    let mut board = Board::from_layout("w---- b---- ----- ----- -----", Side::White)?;
    board.make_move(&Move::from_str("a1-a3")?);

    assert!(board.game_over());
    assert_eq!(board.num_pieces(Side::Black), 0);
    assert!(board.legal_moves().is_empty());
    Ok(())
}

#[test]
fn test_self_play_keeps_rules() {
    let mut board = Board::start();
    let mut num_pieces = (board.num_pieces(Side::White), board.num_pieces(Side::Black));

    for _ in 0..100 {
        if board.game_over() {
            break;
        }
        let side = board.to_move();
        let mve = match best_move(&board, side, 2) {
            Some(mve) => mve,
            None => panic!("no move on {:?}", board),
        };
        assert!(board.is_legal(&mve), "{} on {:?}", mve, board);
        board.make_move(&mve);

        let now = (board.num_pieces(Side::White), board.num_pieces(Side::Black));
        assert!(now.0 <= num_pieces.0 && now.1 <= num_pieces.1);
        assert_eq!(
            now.0 + now.1 + mve.captured().count() as u8,
            num_pieces.0 + num_pieces.1
        );
        num_pieces = now;
    }
}

#[test]
fn test_reversal_rejected() -> TestResult {
    let mut board = Board::from_layout("----- -w--- ----- ----- ---bb", Side::White)?;
    board.make_move(&Move::from_str("b2-c2")?);
    board.make_move(&Move::from_str("d5-c5")?);

    let back = Move::from_str("c2-b2")?;
    assert!(board.is_reversal(&back));
    assert!(!board.is_legal(&back));
    assert!(!board.legal_moves().contains(&back));

    board.make_move(&Move::from_str("c2-c3")?);
    let back = Move::from_str("c5-d5")?;
    assert!(board.is_reversal(&back));
    assert!(!board.is_legal(&back));

    // A step away from the reversed square is still fine.
    assert!(board.is_legal(&Move::from_str("c5-c4")?));
    Ok(())
}
