//! Run configuration, validation, and error types.
//!
//! [`RunConfig`] is the already-validated-values surface the engine
//! consumes: loop extents, worker count, seed, capacity headroom, and the
//! external collaborator handles. [`validate()`](RunConfig::validate)
//! checks structural invariants at startup, before any batch executes;
//! the runner constructor calls it and sizes every bank from the
//! validated capacities.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use critmc_core::{SourceDistribution, Tally, TransportKernel};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`RunConfig::validate()`].
#[derive(Debug)]
pub enum ConfigError {
    /// Batch count is zero.
    ZeroBatches,
    /// Generations per batch is zero.
    ZeroGenerations,
    /// Particles per batch is zero.
    ZeroParticles,
    /// Worker count is zero.
    ZeroWorkers,
    /// Active batch count exceeds the total batch count.
    ActiveExceedsBatches {
        /// The configured active batch count.
        active: usize,
        /// The configured total batch count.
        batches: usize,
    },
    /// Bank headroom factor is zero; banks could never hold a full
    /// generation's sites.
    ZeroHeadroom,
    /// A bank capacity computation overflowed `usize`.
    CapacityOverflow {
        /// The factor that overflowed.
        headroom: usize,
        /// The particle count it was applied to.
        particles: usize,
    },
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBatches => write!(f, "n_batches must be at least 1"),
            Self::ZeroGenerations => write!(f, "n_generations must be at least 1"),
            Self::ZeroParticles => write!(f, "n_particles must be at least 1"),
            Self::ZeroWorkers => write!(f, "n_workers must be at least 1"),
            Self::ActiveExceedsBatches { active, batches } => {
                write!(f, "n_active ({active}) exceeds n_batches ({batches})")
            }
            Self::ZeroHeadroom => write!(f, "bank_headroom must be at least 1"),
            Self::CapacityOverflow {
                headroom,
                particles,
            } => {
                write!(
                    f,
                    "bank capacity overflow: headroom {headroom} x {particles} particles"
                )
            }
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── RunConfig ──────────────────────────────────────────────────────

/// Complete configuration for one eigenvalue run.
///
/// The parameter-parsing surface (files, CLI) lives outside the engine;
/// this struct receives already-validated raw values plus the three
/// collaborator handles, and `validate()` re-checks the structural
/// invariants the engine itself depends on.
pub struct RunConfig {
    /// Total number of batches.
    pub n_batches: usize,
    /// Number of trailing active batches contributing to statistics.
    pub n_active: usize,
    /// Generations per batch.
    pub n_generations: usize,
    /// Particles per generation (the conserved source population size).
    pub n_particles: usize,
    /// Transport worker threads.
    pub n_workers: usize,
    /// Master random seed.
    pub seed: u64,
    /// Whether tallying is enabled for the active window.
    pub tally: bool,
    /// Fission-bank capacity factor: the global bank holds
    /// `bank_headroom * n_particles` sites and each worker bank
    /// `bank_headroom * ceil(n_particles / n_workers)`. Runtime fission
    /// counts exceeding these capacities abort the run.
    pub bank_headroom: usize,
    /// The particle transport kernel.
    pub kernel: Arc<dyn TransportKernel>,
    /// The tally accumulator.
    pub tally_handle: Arc<dyn Tally>,
    /// The initial spatial source distribution.
    pub source: Box<dyn SourceDistribution>,
}

impl RunConfig {
    /// Validate all structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_batches == 0 {
            return Err(ConfigError::ZeroBatches);
        }
        if self.n_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.n_particles == 0 {
            return Err(ConfigError::ZeroParticles);
        }
        if self.n_workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.n_active > self.n_batches {
            return Err(ConfigError::ActiveExceedsBatches {
                active: self.n_active,
                batches: self.n_batches,
            });
        }
        if self.bank_headroom == 0 {
            return Err(ConfigError::ZeroHeadroom);
        }
        self.global_bank_capacity()?;
        self.worker_bank_capacity()?;
        Ok(())
    }

    /// Capacity of the global fission bank.
    pub fn global_bank_capacity(&self) -> Result<usize, ConfigError> {
        self.bank_headroom
            .checked_mul(self.n_particles)
            .ok_or(ConfigError::CapacityOverflow {
                headroom: self.bank_headroom,
                particles: self.n_particles,
            })
    }

    /// Capacity of each worker's fission bank.
    ///
    /// Sized for the largest contiguous partition a worker can receive.
    pub fn worker_bank_capacity(&self) -> Result<usize, ConfigError> {
        let chunk = self.n_particles.div_ceil(self.n_workers);
        self.bank_headroom
            .checked_mul(chunk)
            .ok_or(ConfigError::CapacityOverflow {
                headroom: self.bank_headroom,
                particles: chunk,
            })
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("n_batches", &self.n_batches)
            .field("n_active", &self.n_active)
            .field("n_generations", &self.n_generations)
            .field("n_particles", &self.n_particles)
            .field("n_workers", &self.n_workers)
            .field("seed", &self.seed)
            .field("tally", &self.tally)
            .field("bank_headroom", &self.bank_headroom)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use critmc_test_utils::{FixedYieldKernel, NullTally, UniformCubeSource};

    fn valid_config() -> RunConfig {
        RunConfig {
            n_batches: 10,
            n_active: 5,
            n_generations: 2,
            n_particles: 100,
            n_workers: 4,
            seed: 42,
            tally: false,
            bank_headroom: 2,
            kernel: Arc::new(FixedYieldKernel::new(1)),
            tally_handle: Arc::new(NullTally::new()),
            source: Box::new(UniformCubeSource::new(1.0)),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn zero_batches_fails() {
        let mut cfg = valid_config();
        cfg.n_batches = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroBatches)));
    }

    #[test]
    fn zero_generations_fails() {
        let mut cfg = valid_config();
        cfg.n_generations = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroGenerations)));
    }

    #[test]
    fn zero_particles_fails() {
        let mut cfg = valid_config();
        cfg.n_particles = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroParticles)));
    }

    #[test]
    fn zero_workers_fails() {
        let mut cfg = valid_config();
        cfg.n_workers = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroWorkers)));
    }

    #[test]
    fn active_exceeding_batches_fails() {
        let mut cfg = valid_config();
        cfg.n_active = 11;
        match cfg.validate() {
            Err(ConfigError::ActiveExceedsBatches { active, batches }) => {
                assert_eq!(active, 11);
                assert_eq!(batches, 10);
            }
            other => panic!("expected ActiveExceedsBatches, got {other:?}"),
        }
    }

    #[test]
    fn active_zero_is_allowed() {
        let mut cfg = valid_config();
        cfg.n_active = 0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_headroom_fails() {
        let mut cfg = valid_config();
        cfg.bank_headroom = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroHeadroom)));
    }

    #[test]
    fn capacity_overflow_fails() {
        let mut cfg = valid_config();
        cfg.bank_headroom = usize::MAX;
        cfg.n_particles = 2;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn capacities_follow_headroom_and_partition() {
        let cfg = valid_config();
        assert_eq!(cfg.global_bank_capacity().unwrap(), 200);
        // 100 particles over 4 workers: 25-particle chunks.
        assert_eq!(cfg.worker_bank_capacity().unwrap(), 50);
    }

    #[test]
    fn worker_capacity_covers_uneven_partition() {
        let mut cfg = valid_config();
        cfg.n_particles = 101;
        // ceil(101 / 4) = 26.
        assert_eq!(cfg.worker_bank_capacity().unwrap(), 52);
    }
}
