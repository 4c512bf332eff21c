//! Reproducibility integration tests.
//!
//! Each test: build a config around the rng-sensitive [`SplittingKernel`]
//! (whose progeny depend entirely on the per-particle stream), run to
//! completion, and compare the resulting keff series bit for bit.

use std::sync::Arc;

use critmc_engine::{EigenvalueRunner, RunConfig};
use critmc_test_utils::{NullTally, SplittingKernel, UniformCubeSource};

fn config(seed: u64, n_workers: usize) -> RunConfig {
    RunConfig {
        n_batches: 6,
        n_active: 4,
        n_generations: 4,
        n_particles: 200,
        n_workers,
        seed,
        tally: false,
        bank_headroom: 2,
        kernel: Arc::new(SplittingKernel::new(1.1)),
        tally_handle: Arc::new(NullTally::new()),
        source: Box::new(UniformCubeSource::new(0.5)),
    }
}

fn run_series(seed: u64, n_workers: usize) -> (Vec<f64>, Vec<u8>) {
    let runner = EigenvalueRunner::new(config(seed, n_workers)).unwrap();
    let mut progress = Vec::new();
    let summary = runner.run(&mut progress).unwrap();
    (summary.keff, progress)
}

#[test]
fn fixed_seed_runs_are_identical() {
    let (series_a, progress_a) = run_series(42, 2);
    let (series_b, progress_b) = run_series(42, 2);
    assert_eq!(series_a, series_b, "keff series diverged for a fixed seed");
    assert_eq!(progress_a, progress_b, "progress output diverged");
}

#[test]
fn worker_count_does_not_change_the_answer() {
    let (serial, _) = run_series(42, 1);
    let (parallel, _) = run_series(42, 4);
    assert_eq!(
        serial, parallel,
        "keff series must be invariant under worker count"
    );
}

#[test]
fn worker_count_invariance_holds_for_uneven_partitions() {
    // 200 particles over 3 workers: chunks of 67, 67, 66.
    let (serial, _) = run_series(7, 1);
    let (uneven, _) = run_series(7, 3);
    assert_eq!(serial, uneven);
}

#[test]
fn different_seeds_give_different_series() {
    let (a, _) = run_series(1, 2);
    let (b, _) = run_series(2, 2);
    assert_ne!(a, b);
}
