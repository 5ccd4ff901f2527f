//! Selection algebra benchmark
//!
//! Measures the Boolean combinators across representations:
//! - bitmap with bitmap at several densities
//! - range with bitmap (materializes the range)
//! - range with range

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabula_core::Selection;

const UNIVERSE: u32 = 1_000_000;

fn random_selection(rng: &mut StdRng, density: f64) -> Selection {
    (0..UNIVERSE).filter(|_| rng.gen_bool(density)).collect()
}

fn benchmark_bitmap_algebra(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut group = c.benchmark_group("bitmap_algebra");
    group.sample_size(20);

    for density in [0.001, 0.1, 0.5] {
        let a = random_selection(&mut rng, density);
        let b = random_selection(&mut rng, density);

        group.bench_with_input(BenchmarkId::new("and", density), &density, |bench, _| {
            bench.iter(|| black_box(a.and(&b)));
        });
        group.bench_with_input(BenchmarkId::new("or", density), &density, |bench, _| {
            bench.iter(|| black_box(a.or(&b)));
        });
        group.bench_with_input(BenchmarkId::new("and_not", density), &density, |bench, _| {
            bench.iter(|| black_box(a.and_not(&b)));
        });
    }
    group.finish();
}

fn benchmark_mixed_algebra(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let bitmap = random_selection(&mut rng, 0.1);
    let all = Selection::all(UNIVERSE);
    let half = Selection::with_range(UNIVERSE / 4, UNIVERSE * 3 / 4);

    let mut group = c.benchmark_group("mixed_algebra");
    group.bench_function("range_and_bitmap", |bench| {
        bench.iter(|| black_box(half.and(&bitmap)));
    });
    group.bench_function("all_minus_bitmap", |bench| {
        bench.iter(|| black_box(all.and_not(&bitmap)));
    });
    group.bench_function("range_and_range", |bench| {
        bench.iter(|| black_box(all.and(&half)));
    });
    group.finish();
}

criterion_group!(benches, benchmark_bitmap_algebra, benchmark_mixed_algebra);
criterion_main!(benches);
