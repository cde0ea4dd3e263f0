use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use delve::world::generate_level;
use delve::GameConfig;

fn bench_generate(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut group = c.benchmark_group("generate_level");

    for depth in [1u32, 10, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| generate_level(black_box(&config), depth, None, &mut rng))
        });
    }

    group.finish();
}

fn bench_crowded_map(c: &mut Criterion) {
    // Small map where placement has to retry often
    let config = GameConfig {
        map_width: 9,
        map_height: 9,
        chest_count: 10,
        base_monster_count: 20,
        monster_cap: 25,
        ..GameConfig::default()
    };
    c.bench_function("generate_level_crowded", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| generate_level(black_box(&config), 5, None, &mut rng))
    });
}

criterion_group!(benches, bench_generate, bench_crowded_map);
criterion_main!(benches);
