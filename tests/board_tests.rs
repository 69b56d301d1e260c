//! Board tests: bounds, row detection, compaction and merging

use blockfall::core::{Board, Piece};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({x}, {y}) should be empty");
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceKind::T)));
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
    assert!(board.is_occupied(5, 10));

    assert!(!board.set(-1, 0, Some(PieceKind::T)));
    assert!(!board.set(0, 20, Some(PieceKind::T)));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_clear_nothing_when_no_row_full() {
    let mut board = Board::new();
    board.fill_row_except(19, &[4], Some(PieceKind::J));
    let before = board.clone();

    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_clear_returns_ascending_rows_and_keeps_order() {
    let mut board = Board::new();
    board.fill_row_except(19, &[], Some(PieceKind::I));
    board.fill_row_except(18, &[0], Some(PieceKind::S));
    board.fill_row_except(17, &[], Some(PieceKind::O));
    board.set(3, 16, Some(PieceKind::T));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[17, 19]);

    // Survivors slide down in their original order.
    assert_eq!(board.get(0, 19), Some(None));
    assert_eq!(board.get(1, 19), Some(Some(PieceKind::S)));
    assert_eq!(board.get(3, 18), Some(Some(PieceKind::T)));
    // Two fresh empty rows on top.
    assert!(board.row(0).unwrap().iter().all(Option::is_none));
    assert!(board.row(1).unwrap().iter().all(Option::is_none));
    assert_eq!(board.filled_count(), 9 + 1);
}

#[test]
fn test_clear_four_rows() {
    let mut board = Board::new();
    for y in 16..20 {
        board.fill_row_except(y, &[], Some(PieceKind::L));
    }
    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 4);
    assert_eq!(board.filled_count(), 0);
    assert_eq!(board.cells().len(), (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize));
}

#[test]
fn test_merge_writes_piece_kind_and_skips_hidden_rows() {
    let mut board = Board::new();
    let piece = Piece::new(PieceKind::O).at(0, 18);
    board.merge(&piece);
    for (x, y) in [(0, 18), (1, 18), (0, 19), (1, 19)] {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::O)));
    }

    // Half the piece above the field: only the visible row is stored.
    let mut board = Board::new();
    board.merge(&Piece::new(PieceKind::O).at(4, -1));
    assert_eq!(board.filled_count(), 2);
    assert!(board.is_occupied(4, 0));
    assert!(board.is_occupied(5, 0));
}

#[test]
fn test_write_u8_grid_uses_color_indices() {
    let mut board = Board::new();
    board.set(0, 19, Some(PieceKind::I));
    board.set(9, 0, Some(PieceKind::Z));

    let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    board.write_u8_grid(&mut grid);
    assert_eq!(grid[19][0], 1);
    assert_eq!(grid[0][9], 7);
    assert_eq!(grid[10][5], 0);
}
