//! Criterion benchmarks for whole robot games.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use startups_engine::{GameBuilder, GameConfig, NullObserver};

fn benchmark_single_round(c: &mut Criterion) {
    c.bench_function("four_robots_one_round", |b| {
        b.iter_batched(
            || {
                GameBuilder::new()
                    .config(GameConfig::default().with_players(4).with_seed(1977))
                    .build()
                    .unwrap()
            },
            |game| black_box(game.play(&mut NullObserver).unwrap()),
            BatchSize::SmallInput,
        )
    });
}

fn benchmark_long_game(c: &mut Criterion) {
    c.bench_function("eight_robots_ten_rounds", |b| {
        b.iter_batched(
            || {
                GameBuilder::new()
                    .config(GameConfig::default().with_players(8).with_rounds(10).with_seed(7))
                    .build()
                    .unwrap()
            },
            |game| black_box(game.play(&mut NullObserver).unwrap()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, benchmark_single_round, benchmark_long_game);
criterion_main!(benches);
