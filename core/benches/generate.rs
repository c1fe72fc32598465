use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sapper_core::*;
use std::hint::black_box;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let dense = GameConfig::new((16, 30), 400).unwrap();
    let cases = [
        ("expert", Difficulty::Expert.config()),
        ("dense", dense),
    ];

    for (name, config) in cases {
        for placement in [Placement::Rejection, Placement::Shuffle] {
            let mut rng = SmallRng::seed_from_u64(0);
            group.bench_function(format!("{name}/{placement:?}"), |b| {
                b.iter(|| {
                    let layout = RandomMineGenerator::new(&mut rng)
                        .with_placement(placement)
                        .generate(black_box(config))
                        .unwrap();
                    Board::new(layout)
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
