//! Piece tests: catalog shapes, rotation, collision, kicks and drops

use blockfall::core::piece::spawn_x;
use blockfall::core::{catalog_shape, Board, Piece, PieceGenerator};
use blockfall::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_catalog_dimensions() {
    let dims: Vec<(u8, u8)> = PieceKind::ALL
        .iter()
        .map(|&k| (catalog_shape(k).width(), catalog_shape(k).height()))
        .collect();
    assert_eq!(
        dims,
        vec![(4, 1), (2, 2), (3, 2), (3, 2), (3, 2), (3, 2), (3, 2)]
    );
}

#[test]
fn test_spawn_position() {
    for kind in PieceKind::ALL {
        let piece = Piece::new(kind);
        assert_eq!(piece.y(), 0);
        assert_eq!(piece.x(), spawn_x(catalog_shape(kind).width()));
    }
    assert_eq!(Piece::new(PieceKind::I).x(), 3);
    assert_eq!(Piece::new(PieceKind::O).x(), 4);
    assert_eq!(Piece::new(PieceKind::T).x(), 4);
}

#[test]
fn test_try_move_never_leaves_colliding_position() {
    let board = Board::new();
    let mut piece = Piece::new(PieceKind::L);
    let mut moves = 0;
    while piece.try_move(-1, &board) {
        moves += 1;
        assert!(!piece.collides(&board));
    }
    assert_eq!(piece.x(), 0);
    assert_eq!(moves, 4);

    // Blocked move keeps the position.
    let before = piece;
    assert!(!piece.try_move(-1, &board));
    assert_eq!(piece, before);
}

#[test]
fn test_move_blocked_by_locked_cells() {
    let mut board = Board::new();
    board.set(7, 0, Some(PieceKind::Z));
    let mut piece = Piece::new(PieceKind::O); // x 4..=5
    assert!(piece.try_move(1, &board));
    assert!(!piece.try_move(1, &board));
    assert_eq!(piece.x(), 5);
}

#[test]
fn test_cells_above_field_do_not_collide() {
    let board = Board::new();
    let piece = Piece::new(PieceKind::I).at(3, -3);
    assert!(!piece.collides(&board));
    let below_floor = Piece::new(PieceKind::I).at(3, BOARD_HEIGHT as i8);
    assert!(below_floor.collides(&board));
}

#[test]
fn test_hard_drop_lands_where_try_drop_fails() {
    let mut board = Board::new();
    board.fill_row_except(19, &[0], Some(PieceKind::J));
    for kind in PieceKind::ALL {
        let mut piece = Piece::new(kind);
        let ghost = piece.ghost_y(&board);
        let distance = piece.hard_drop(&board);
        assert_eq!(piece.y(), ghost);
        assert_eq!(distance, ghost as u32);
        assert!(!piece.try_drop(&board));
    }
}

#[test]
fn test_rotation_kicks_far_off_right_wall() {
    let board = Board::new();
    // Vertical I one column from the right wall: +1, -2 and +3 fail, -4 lands at x=6.
    let vertical = catalog_shape(PieceKind::I).rotated_cw();
    let mut piece = Piece::with_shape(PieceKind::I, vertical).at(8, 5);
    assert!(piece.try_rotate(&board));
    assert_eq!(piece.shape().width(), 4);
    assert_eq!((piece.x(), piece.y()), (6, 5));
}

#[test]
fn test_failed_rotation_restores_piece() {
    let mut board = Board::new();
    // Wall of blocks around a vertical I in a one-wide well.
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            if x != 4 {
                board.set(x, y, Some(PieceKind::O));
            }
        }
    }
    let vertical = catalog_shape(PieceKind::I).rotated_cw();
    let mut piece = Piece::with_shape(PieceKind::I, vertical).at(4, 10);
    assert!(!piece.collides(&board));
    let before = piece;
    assert!(!piece.try_rotate(&board));
    assert_eq!(piece, before);
}

#[test]
fn test_generator_is_deterministic_and_covers_catalog() {
    let mut a = PieceGenerator::new(42);
    let mut b = PieceGenerator::new(42);
    let mut seen = [false; 7];
    for _ in 0..500 {
        let kind = a.next_kind();
        assert_eq!(kind, b.next_kind());
        seen[kind.catalog_index()] = true;
    }
    assert!(seen.iter().all(|&s| s));
}
