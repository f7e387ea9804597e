use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ndarray::Array2;
use std::hint::black_box;
use tairupoppa_core::{PlayEngine, TileCell, TileGrid};

fn full_board(size: u8) -> PlayEngine {
    let cells = Array2::from_elem((usize::from(size), usize::from(size)), TileCell::Tile(0));
    let grid = TileGrid::from_cells(cells, 6).unwrap();
    PlayEngine::from_grid(grid, 3, 42)
}

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("settle/full_board");
    for size in [8u8, 16, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || full_board(size),
                |mut engine| {
                    engine.pick(black_box((size / 2, size / 2))).unwrap();
                    engine.settle().unwrap()
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_settle);
criterion_main!(benches);
