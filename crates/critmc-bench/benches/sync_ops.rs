//! Criterion micro-benchmarks for the per-generation synchronization
//! stage: ordered merge and both resample branches.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;

use critmc_bench::filled_bank;
use critmc_core::{ChaCha8Rng, ParticleBank};
use critmc_engine::sync::{merge_fission_banks, resample_source};

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    // 4 worker banks of 2 500 sites each into a 10K global bank.
    group.bench_function("4x2500", |b| {
        let worker_template: Vec<ParticleBank> =
            (0..4).map(|_| filled_bank(4_000, 2_500)).collect();
        let mut global = filled_bank(16_000, 0);
        b.iter(|| {
            let mut workers = worker_template.clone();
            global.clear();
            merge_fission_banks(black_box(&mut global), black_box(&mut workers)).unwrap();
            black_box(global.len())
        });
    });

    group.finish();
}

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");

    // Supercritical generation: reservoir branch, pool larger than source.
    group.bench_function("reservoir_12k_into_10k", |b| {
        let pool_template = filled_bank(16_000, 12_000);
        let mut source = filled_bank(10_000, 10_000);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| {
            let mut pool = pool_template.clone();
            resample_source(black_box(&mut pool), black_box(&mut source), &mut rng).unwrap();
            black_box(source.len())
        });
    });

    // Subcritical generation: shortfall branch, pool smaller than source.
    group.bench_function("shortfall_8k_into_10k", |b| {
        let pool_template = filled_bank(16_000, 8_000);
        let mut source = filled_bank(10_000, 10_000);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        b.iter(|| {
            let mut pool = pool_template.clone();
            resample_source(black_box(&mut pool), black_box(&mut source), &mut rng).unwrap();
            black_box(source.len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_merge, bench_resample);
criterion_main!(benches);
