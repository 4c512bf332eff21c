//! critmc: a Monte Carlo criticality (k-effective) iteration engine.
//!
//! This is the top-level facade crate re-exporting the public API from
//! the critmc sub-crates. For most users, adding `critmc` as a single
//! dependency is sufficient.
//!
//! The engine drives the power iteration (batches of generations, each
//! transporting a fixed source population in parallel, harvesting
//! fission sites, and resampling the next population) while the physics
//! plugs in behind three traits: [`types::TransportKernel`],
//! [`types::Tally`], and [`types::SourceDistribution`].
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use critmc::prelude::*;
//!
//! // A toy kernel: every history deposits one fission site in place,
//! // so k-effective is exactly 1. Real kernels sample physics from the
//! // per-particle stream the engine hands them.
//! struct CloneKernel;
//! impl TransportKernel for CloneKernel {
//!     fn transport(
//!         &self,
//!         particle: Particle,
//!         _rng: &mut ChaCha8Rng,
//!         fission_bank: &mut ParticleBank,
//!     ) -> Result<(), BankError> {
//!         fission_bank.push(particle)
//!     }
//! }
//!
//! // A point source at the origin.
//! struct PointSource;
//! impl SourceDistribution for PointSource {
//!     fn sample_site(&self, _rng: &mut ChaCha8Rng) -> Particle {
//!         Particle::new([0.0; 3], [0.0, 0.0, 1.0])
//!     }
//! }
//!
//! // A tally that ignores everything.
//! struct NoTally(std::sync::atomic::AtomicBool);
//! impl Tally for NoTally {
//!     fn tallies_on(&self) -> bool {
//!         self.0.load(std::sync::atomic::Ordering::Relaxed)
//!     }
//!     fn set_tallies_on(&self, on: bool) {
//!         self.0.store(on, std::sync::atomic::Ordering::Relaxed);
//!     }
//!     fn reset(&self) {}
//!     fn write(&self, _sink: &mut dyn std::io::Write) -> std::io::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let config = RunConfig {
//!     n_batches: 4,
//!     n_active: 2,
//!     n_generations: 2,
//!     n_particles: 100,
//!     n_workers: 2,
//!     seed: 42,
//!     tally: false,
//!     bank_headroom: 2,
//!     kernel: Arc::new(CloneKernel),
//!     tally_handle: Arc::new(NoTally(Default::default())),
//!     source: Box::new(PointSource),
//! };
//! let runner = EigenvalueRunner::new(config).unwrap();
//! let mut progress = Vec::new();
//! let summary = runner.run(&mut progress).unwrap();
//! assert_eq!(summary.mean, Some(1.0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `critmc-core` | Particle and bank types, stream controller, collaborator traits |
//! | [`engine`] | `critmc-engine` | Run configuration, runner, synchronizer, statistics, writers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and collaborator contracts (`critmc-core`).
///
/// Particle and bank types, the seekable stream controller, and the
/// [`types::TransportKernel`] / [`types::Tally`] /
/// [`types::SourceDistribution`] traits.
pub use critmc_core as types;

/// The batch/generation iteration engine (`critmc-engine`).
///
/// [`engine::RunConfig`], [`engine::EigenvalueRunner`], the fission-bank
/// synchronizer, and the running statistics.
pub use critmc_engine as engine;

/// The most commonly used items, re-exported flat.
pub mod prelude {
    pub use critmc_core::{
        BankError, ChaCha8Rng, Particle, ParticleBank, RngController, SourceDistribution,
        Tally, TransportKernel,
    };
    pub use critmc_engine::{
        ConfigError, EigenvalueRunner, KeffStatistics, RunConfig, RunError, RunSummary,
    };
}
