//! Board tests - grid access, placement checks and the clear protocol

use blockfall::core::{Board, Piece};
use blockfall::types::{BoardState, PieceKind, Rotation, FIELD_COL, FIELD_ROW, FLASH_TICKS};

fn fill_row_except(board: &mut Board, row: i8, gap: Option<i8>) {
    for col in 0..FIELD_COL as i8 {
        if Some(col) != gap {
            board.set(col, row, Some(PieceKind::L));
        }
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.cells().len(), FIELD_COL as usize * FIELD_ROW as usize);
    assert_eq!(board.state(), BoardState::Live);

    for row in 0..FIELD_ROW as i8 {
        for col in 0..FIELD_COL as i8 {
            assert_eq!(board.get(col, row), Some(None));
            assert!(board.is_open(col, row));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(FIELD_COL as i8, 0), None);
    assert_eq!(board.get(0, FIELD_ROW as i8), None);
}

#[test]
fn test_open_cells_above_the_field() {
    let board = Board::new();
    // Rows above the top are open as long as the column is in range.
    assert!(board.is_open(4, -2));
    assert!(!board.is_open(-1, -2));
    assert!(!board.is_open(FIELD_COL as i8, -1));
    assert!(!board.is_open(4, FIELD_ROW as i8));
}

#[test]
fn test_set_and_occupancy() {
    let mut board = Board::new();
    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));
    assert!(!board.is_open(5, 10));
    assert!(!board.set(10, 10, Some(PieceKind::T)));

    assert!(board.set(5, 10, None));
    assert!(board.is_open(5, 10));
}

#[test]
fn test_merge_tags_cells_with_kind() {
    let mut board = Board::new();
    let piece = Piece::at(PieceKind::S, Rotation::North, 2, 18, 15);
    assert!(board.merge(&piece));
    for (col, row) in piece.cells() {
        assert_eq!(board.get(col, row), Some(Some(PieceKind::S)));
    }
    // The same cells are now taken, so a second merge fails the placement check.
    assert!(!board.merge(&piece));
}

#[test]
fn test_merge_skips_cells_above_the_top() {
    let mut board = Board::new();
    let piece = Piece::at(PieceKind::I, Rotation::East, 0, -2, 15);
    assert!(board.merge(&piece));
    let filled = board.cells().iter().filter(|c| c.is_some()).count();
    assert_eq!(filled, 2);
}

#[test]
fn test_single_row_clear_protocol() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, None);
    board.set(3, 18, Some(PieceKind::J));

    assert_eq!(board.begin_clear_check(), 1);
    assert_eq!(board.state(), BoardState::Flashing);
    assert_eq!(board.full_rows().as_slice(), &[19]);

    for _ in 1..FLASH_TICKS {
        assert!(!board.advance_flash());
    }
    assert!(board.advance_flash());
    assert_eq!(board.state(), BoardState::Clearing);

    assert_eq!(board.commit_clear(), 1);
    assert_eq!(board.state(), BoardState::Live);
    assert_eq!(board.get(3, 19), Some(Some(PieceKind::J)));
    assert!((0..FIELD_COL as i8).all(|col| board.get(col, 0) == Some(None)));
}

#[test]
fn test_clear_of_separated_rows() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, None);
    fill_row_except(&mut board, 18, Some(6));
    fill_row_except(&mut board, 17, None);
    board.set(0, 16, Some(PieceKind::Z));

    assert_eq!(board.begin_clear_check(), 2);
    assert_eq!(board.commit_clear(), 2);

    // The gapped row falls to the bottom with the marker right above it.
    assert!(!board.is_row_full(19));
    assert_eq!(board.get(6, 19), Some(None));
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::L)));
    assert_eq!(board.get(0, 18), Some(Some(PieceKind::Z)));
    let filled = board.cells().iter().filter(|c| c.is_some()).count();
    assert_eq!(filled, FIELD_COL as usize);
}

#[test]
fn test_no_full_rows_stays_live() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, Some(0));
    assert_eq!(board.begin_clear_check(), 0);
    assert_eq!(board.state(), BoardState::Live);
    assert_eq!(board.commit_clear(), 0);
}

#[test]
fn test_frozen_board_is_terminal() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, None);
    board.freeze();
    assert!(board.is_frozen());

    let piece = Piece::at(PieceKind::O, Rotation::North, 0, 5, 15);
    assert!(!board.merge(&piece));
    assert_eq!(board.begin_clear_check(), 0);
    assert_eq!(board.commit_clear(), 0);
    assert!(board.is_row_full(19));
    assert_eq!(board.state(), BoardState::Frozen);
}
