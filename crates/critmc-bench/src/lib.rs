//! Benchmark profiles for the critmc eigenvalue engine.
//!
//! Provides pre-built [`RunConfig`] profiles shared by the benches:
//!
//! - [`reference_profile`]: 10K particles per generation, splitting kernel
//! - [`stress_profile`]: 100K particles per generation, same pipeline
//! - [`filled_bank`]: a fission bank populated with distinguishable sites

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use critmc_core::{Particle, ParticleBank};
use critmc_engine::RunConfig;
use critmc_test_utils::{NullTally, SplittingKernel, UniformCubeSource};

/// Build a reference benchmark profile: 10K particles, 3 generations per
/// batch, near-critical splitting kernel (nu = 1.02).
pub fn reference_profile(seed: u64, n_workers: usize) -> RunConfig {
    RunConfig {
        n_batches: 10,
        n_active: 5,
        n_generations: 3,
        n_particles: 10_000,
        n_workers,
        seed,
        tally: false,
        bank_headroom: 3,
        kernel: Arc::new(SplittingKernel::new(1.02)),
        tally_handle: Arc::new(NullTally::new()),
        source: Box::new(UniformCubeSource::new(1.0)),
    }
}

/// Build a stress benchmark profile: 100K particles per generation.
///
/// Same pipeline as [`reference_profile`] at 10x the population.
pub fn stress_profile(seed: u64, n_workers: usize) -> RunConfig {
    RunConfig {
        n_particles: 100_000,
        ..reference_profile(seed, n_workers)
    }
}

/// Build a fission bank of capacity `capacity` holding `count` sites with
/// distinguishable weights.
pub fn filled_bank(capacity: usize, count: usize) -> ParticleBank {
    let mut bank = ParticleBank::with_capacity(capacity).unwrap();
    for i in 0..count {
        let site = Particle {
            weight: i as f64,
            ..Particle::new([0.0; 3], [0.0, 0.0, 1.0])
        };
        bank.push(site).unwrap();
    }
    bank
}
