use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{catalog_shape, Board, GameSnapshot, GameState, Phase, Piece};
use blockfall::types::{GameAction, PieceKind, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.phase() != Phase::Running {
                state.start();
            }
            state.tick(black_box(TICK_MS));
            state.drain_events().for_each(drop);
        })
    });
}

fn bench_hard_drop_and_lock(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("hard_drop_lock", |b| {
        b.iter(|| {
            if state.phase() != Phase::Running {
                state.start();
            }
            state.apply_action(black_box(GameAction::HardDrop));
            state.tick(1);
            state.drain_events().for_each(drop);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                board.fill_row_except(y, &[], Some(PieceKind::I));
            }
            black_box(board.clear_full_rows());
        })
    });
}

fn bench_rotate_with_kick(c: &mut Criterion) {
    let board = Board::new();
    let vertical_shape = catalog_shape(PieceKind::I).rotated_cw();
    let vertical = Piece::with_shape(PieceKind::I, vertical_shape).at(8, 5);

    c.bench_function("try_rotate_kick", |b| {
        b.iter(|| {
            let mut piece = black_box(vertical);
            black_box(piece.try_rotate(&board));
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            state.snapshot_into(black_box(&mut snap));
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_hard_drop_and_lock,
    bench_line_clear,
    bench_rotate_with_kick,
    bench_snapshot
);
criterion_main!(benches);
