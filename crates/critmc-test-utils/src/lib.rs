//! Mock collaborators for testing the critmc engine.
//!
//! Deterministic stand-ins for the transport kernel, tally, and source
//! distribution. None of them model real physics; they produce known
//! particle counts and observable side effects so engine tests can pin
//! down population bookkeeping, reproducibility, and the tally lifecycle.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use rand::Rng;

use critmc_core::{
    BankError, ChaCha8Rng, Particle, ParticleBank, SourceDistribution, Tally, TransportKernel,
};

// ── Kernels ─────────────────────────────────────────────────────

/// A kernel that deposits exactly `sites_per_particle` copies of each
/// incoming particle into the fission bank. Draws nothing from the rng,
/// so populations are exactly predictable: yield 1 keeps k-effective
/// pinned at 1.0.
#[derive(Clone, Copy, Debug)]
pub struct FixedYieldKernel {
    /// Fission sites deposited per transported particle.
    pub sites_per_particle: usize,
}

impl FixedYieldKernel {
    /// A kernel with the given per-particle site yield.
    pub fn new(sites_per_particle: usize) -> Self {
        Self { sites_per_particle }
    }
}

impl TransportKernel for FixedYieldKernel {
    fn transport(
        &self,
        particle: Particle,
        _rng: &mut ChaCha8Rng,
        fission_bank: &mut ParticleBank,
    ) -> Result<(), BankError> {
        for _ in 0..self.sites_per_particle {
            fission_bank.push(particle)?;
        }
        Ok(())
    }
}

/// A kernel whose progeny count and positions depend on its random
/// stream: flight distance, a fresh isotropic direction, and a site
/// yield of `floor(nu)` or `floor(nu) + 1` are all drawn from `rng`.
///
/// Because the output is a pure function of the per-particle stream,
/// this kernel exposes any break in the engine's stream addressing:
/// runs that should be identical stop being identical.
#[derive(Clone, Copy, Debug)]
pub struct SplittingKernel {
    /// Mean fission sites per transported particle.
    pub nu: f64,
}

impl SplittingKernel {
    /// A kernel with mean site yield `nu`.
    pub fn new(nu: f64) -> Self {
        Self { nu }
    }
}

impl TransportKernel for SplittingKernel {
    fn transport(
        &self,
        mut particle: Particle,
        rng: &mut ChaCha8Rng,
        fission_bank: &mut ParticleBank,
    ) -> Result<(), BankError> {
        let distance: f64 = rng.random();
        for i in 0..3 {
            particle.position[i] += particle.direction[i] * distance;
        }
        let mu: f64 = 2.0 * rng.random::<f64>() - 1.0;
        let phi: f64 = 2.0 * std::f64::consts::PI * rng.random::<f64>();
        let s = (1.0 - mu * mu).sqrt();
        particle.direction = [s * phi.cos(), s * phi.sin(), mu];

        let base = self.nu.floor();
        let extra: f64 = rng.random();
        let mut sites = base as usize;
        if extra < self.nu - base {
            sites += 1;
        }
        for _ in 0..sites {
            fission_bank.push(particle)?;
        }
        Ok(())
    }
}

// ── Sources ─────────────────────────────────────────────────────

/// Uniform spatial source over a cube of the given half-width, with
/// isotropic directions.
#[derive(Clone, Copy, Debug)]
pub struct UniformCubeSource {
    /// Half the cube edge length.
    pub half_width: f64,
}

impl UniformCubeSource {
    /// A source filling the cube `[-half_width, half_width]^3`.
    pub fn new(half_width: f64) -> Self {
        Self { half_width }
    }
}

impl SourceDistribution for UniformCubeSource {
    fn sample_site(&self, rng: &mut ChaCha8Rng) -> Particle {
        let mut position = [0.0; 3];
        for slot in &mut position {
            *slot = self.half_width * (2.0 * rng.random::<f64>() - 1.0);
        }
        let mu: f64 = 2.0 * rng.random::<f64>() - 1.0;
        let phi: f64 = 2.0 * std::f64::consts::PI * rng.random::<f64>();
        let s = (1.0 - mu * mu).sqrt();
        Particle::new(position, [s * phi.cos(), s * phi.sin(), mu])
    }
}

// ── Tallies ─────────────────────────────────────────────────────

/// A tally that tracks only its enable flag and writes nothing.
#[derive(Debug, Default)]
pub struct NullTally {
    on: AtomicBool,
}

impl NullTally {
    /// A disabled null tally.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tally for NullTally {
    fn tallies_on(&self) -> bool {
        self.on.load(Ordering::Relaxed)
    }

    fn set_tallies_on(&self, on: bool) {
        self.on.store(on, Ordering::Relaxed);
    }

    fn reset(&self) {}

    fn write(&self, _sink: &mut dyn io::Write) -> io::Result<()> {
        Ok(())
    }
}

/// Lifecycle events observed by a [`RecordingTally`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TallyEvent {
    /// `set_tallies_on(true)` was called.
    Enabled,
    /// `set_tallies_on(false)` was called.
    Disabled,
    /// `reset()` was called.
    Reset,
    /// `write()` was called.
    Written,
}

/// A tally that records every lifecycle call, for asserting the
/// one-way active-window transition and the write-then-reset order.
#[derive(Debug, Default)]
pub struct RecordingTally {
    on: AtomicBool,
    events: Mutex<Vec<TallyEvent>>,
}

impl RecordingTally {
    /// A disabled recording tally with no events.
    pub fn new() -> Self {
        Self::default()
    }

    /// The events recorded so far, in call order.
    pub fn events(&self) -> Vec<TallyEvent> {
        self.events.lock().expect("tally event lock").clone()
    }
}

impl Tally for RecordingTally {
    fn tallies_on(&self) -> bool {
        self.on.load(Ordering::Relaxed)
    }

    fn set_tallies_on(&self, on: bool) {
        self.on.store(on, Ordering::Relaxed);
        let event = if on {
            TallyEvent::Enabled
        } else {
            TallyEvent::Disabled
        };
        self.events.lock().expect("tally event lock").push(event);
    }

    fn reset(&self) {
        self.events
            .lock()
            .expect("tally event lock")
            .push(TallyEvent::Reset);
    }

    fn write(&self, sink: &mut dyn io::Write) -> io::Result<()> {
        self.events
            .lock()
            .expect("tally event lock")
            .push(TallyEvent::Written);
        writeln!(sink, "tally snapshot")
    }
}
