//! The batch/generation eigenvalue iteration state machine.
//!
//! [`EigenvalueRunner`] owns the whole simulation context: source bank,
//! global fission bank, the worker pool (with one fission bank per
//! worker), the stream controller, the tally handle, and the running
//! statistics. One runner drives one run to completion.
//!
//! Per generation: dispatch transport over the source population (Track
//! stream, per-particle addressing) → join barrier → read the protected
//! site accumulator → accumulate generation k-effective → position the
//! Other stream once → ordered merge → resample. Per batch: flip
//! tallying on at the active-window boundary (one-way), average the
//! generation values, feed the statistics, snapshot-and-reset the tally,
//! emit one progress row.

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use critmc_core::{ParticleBank, RngController, Tally};

use crate::config::{ConfigError, RunConfig};
use crate::error::RunError;
use crate::metrics::RunMetrics;
use crate::output::{write_keff_series, write_progress_header, write_progress_row};
use crate::pool::WorkerPool;
use crate::stats::KeffStatistics;
use crate::sync::{merge_fission_banks, resample_source};

// ── RunSummary ─────────────────────────────────────────────────────

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Per-active-batch k-effective values, in active-batch order.
    /// Empty when the run had no active batches.
    pub keff: Vec<f64>,
    /// Mean over the active batches, or `None` without any.
    pub mean: Option<f64>,
    /// Bessel-corrected standard deviation, or `None` below two active
    /// batches.
    pub std_dev: Option<f64>,
    /// Timing and progress counters.
    pub metrics: RunMetrics,
}

// ── EigenvalueRunner ───────────────────────────────────────────────

/// Drives batches → generations → transport → synchronization →
/// statistics for one criticality run.
pub struct EigenvalueRunner {
    n_batches: usize,
    n_active: usize,
    n_generations: usize,
    tally_enabled: bool,
    tally: Arc<dyn Tally>,
    rng: RngController,
    pool: WorkerPool,
    source_bank: ParticleBank,
    global_fission_bank: ParticleBank,
    worker_banks: Vec<ParticleBank>,
    tally_sink: Option<Box<dyn Write + Send>>,
    keff_sink: Option<Box<dyn Write + Send>>,
}

impl EigenvalueRunner {
    /// Build a runner from a validated configuration.
    ///
    /// Sizes and fills the initial source bank from the Init stream,
    /// allocates the global and per-worker fission banks, and spawns the
    /// worker pool. All allocation happens here, before any batch
    /// executes.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for invalid parameters, capacity
    /// arithmetic overflow, or a failed thread spawn.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = RngController::new(
            config.seed,
            config.n_generations as u64,
            config.n_particles as u64,
        );

        // ZeroCapacity is unreachable here: validate() rejected zero
        // particle counts and headroom.
        let mut source_bank = ParticleBank::with_capacity(config.n_particles)
            .map_err(|_| ConfigError::ZeroParticles)?;
        let global_fission_bank = ParticleBank::with_capacity(config.global_bank_capacity()?)
            .map_err(|_| ConfigError::ZeroParticles)?;
        let worker_capacity = config.worker_bank_capacity()?;
        let mut worker_banks = Vec::with_capacity(config.n_workers);
        for _ in 0..config.n_workers {
            worker_banks.push(
                ParticleBank::with_capacity(worker_capacity)
                    .map_err(|_| ConfigError::ZeroParticles)?,
            );
        }

        let mut init = rng.init();
        for _ in 0..config.n_particles {
            let site = config.source.sample_site(&mut init);
            // Cannot overflow: the bank was sized to n_particles.
            source_bank
                .push(site)
                .map_err(|_| ConfigError::ZeroParticles)?;
        }

        let pool = WorkerPool::spawn(config.n_workers, config.kernel, rng)?;

        Ok(Self {
            n_batches: config.n_batches,
            n_active: config.n_active,
            n_generations: config.n_generations,
            tally_enabled: config.tally,
            tally: config.tally_handle,
            rng,
            pool,
            source_bank,
            global_fission_bank,
            worker_banks,
            tally_sink: None,
            keff_sink: None,
        })
    }

    /// Write a tally snapshot to `sink` at every active batch boundary.
    pub fn with_tally_sink(mut self, sink: Box<dyn Write + Send>) -> Self {
        self.tally_sink = Some(sink);
        self
    }

    /// Write the final keff series to `sink`, one value per line.
    pub fn with_keff_sink(mut self, sink: Box<dyn Write + Send>) -> Self {
        self.keff_sink = Some(sink);
        self
    }

    /// Number of transport workers.
    pub fn n_workers(&self) -> usize {
        self.pool.n_workers()
    }

    /// Execute the run to completion, emitting one progress row per
    /// batch to `progress`.
    ///
    /// # Errors
    ///
    /// Aborts on the first bank capacity violation, empty fission bank,
    /// lost worker, or sink I/O failure.
    pub fn run(mut self, progress: &mut dyn Write) -> Result<RunSummary, RunError> {
        let run_start = Instant::now();
        let mut stats = KeffStatistics::new();
        let mut metrics = RunMetrics::default();
        let n_source = self.source_bank.len();
        let mut banks = std::mem::take(&mut self.worker_banks);
        let mut tallying = false;

        write_progress_header(progress)?;

        for i_b in 0..self.n_batches {
            // One-way transition into the active window.
            if !tallying && i_b >= self.n_batches - self.n_active {
                tallying = true;
                if self.tally_enabled {
                    self.tally.set_tallies_on(true);
                }
            }

            let mut keff_batch = 0.0;
            for i_g in 0..self.n_generations {
                let transport_start = Instant::now();
                banks = self
                    .pool
                    .dispatch(i_b as u64, i_g as u64, &self.source_bank, banks)?;
                metrics.transport_us += transport_start.elapsed().as_micros() as u64;

                let sites = self.pool.take_site_count();
                keff_batch += sites as f64 / n_source as f64;

                // Other stream: positioned exactly once per generation,
                // independent of how many numbers transport drew.
                let mut other = self.rng.other(i_b as u64, i_g as u64);
                let sync_start = Instant::now();
                merge_fission_banks(&mut self.global_fission_bank, &mut banks)?;
                resample_source(&mut self.global_fission_bank, &mut self.source_bank, &mut other)?;
                metrics.sync_us += sync_start.elapsed().as_micros() as u64;
                metrics.generations_run += 1;
            }
            keff_batch /= self.n_generations as f64;

            let active_index = if tallying {
                stats.push(keff_batch);
                Some(stats.len())
            } else {
                None
            };
            write_progress_row(progress, active_index, keff_batch, stats.mean())?;

            if self.tally.tallies_on() {
                if let Some(sink) = self.tally_sink.as_mut() {
                    self.tally.write(sink.as_mut())?;
                }
                self.tally.reset();
            }
            metrics.batches_run += 1;
        }

        if let Some(sink) = self.keff_sink.as_mut() {
            write_keff_series(sink.as_mut(), stats.samples())?;
        }

        metrics.total_us = run_start.elapsed().as_micros() as u64;
        Ok(RunSummary {
            mean: stats.mean(),
            std_dev: stats.std_dev(),
            keff: stats.into_series(),
            metrics,
        })
    }
}

impl std::fmt::Debug for EigenvalueRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EigenvalueRunner")
            .field("n_batches", &self.n_batches)
            .field("n_active", &self.n_active)
            .field("n_generations", &self.n_generations)
            .field("n_particles", &self.source_bank.len())
            .field("n_workers", &self.pool.n_workers())
            .field("seed", &self.rng.seed())
            .finish()
    }
}
