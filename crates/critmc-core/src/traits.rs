//! Contracts between the engine and its external collaborators.
//!
//! The engine never models physics itself. Transport, tallying, and the
//! initial spatial distribution plug in behind these traits; the engine
//! supplies positioned random streams and capacity-checked banks and
//! consumes only particle counts.

use std::io;

use rand_chacha::ChaCha8Rng;

use crate::bank::ParticleBank;
use crate::error::BankError;
use crate::particle::Particle;

/// The particle transport kernel.
///
/// Advances one particle through collision, absorption, fission, and
/// leakage until its history ends. Fission progeny are appended to the
/// worker's fission bank; tally writes happen through whatever handle the
/// implementor captured. All random draws must come from the supplied
/// generator, which the engine positions per particle.
pub trait TransportKernel: Send + Sync {
    /// Transport `particle` to the end of its history.
    ///
    /// # Errors
    ///
    /// Returns [`BankError`] if appending progeny would overflow the
    /// fission bank. The engine treats this as fatal and never retries.
    fn transport(
        &self,
        particle: Particle,
        rng: &mut ChaCha8Rng,
        fission_bank: &mut ParticleBank,
    ) -> Result<(), BankError>;
}

/// The tally accumulator, as seen by the engine.
///
/// The engine only flips the enable flag at the active-window boundary,
/// snapshots contents at batch boundaries, and resets between batches.
/// Internal statistics and thread safety of concurrent scoring are the
/// implementor's concern; handles are shared as `Arc<dyn Tally>`.
pub trait Tally: Send + Sync {
    /// Whether scoring is currently enabled.
    fn tallies_on(&self) -> bool;
    /// Enable or disable scoring. The engine only ever turns it on.
    fn set_tallies_on(&self, on: bool);
    /// Discard accumulated contents. Called at every active batch boundary
    /// so nothing leaks across batches.
    fn reset(&self);
    /// Write a line-oriented snapshot of the accumulated contents.
    ///
    /// # Errors
    ///
    /// Propagates sink I/O failures.
    fn write(&self, sink: &mut dyn io::Write) -> io::Result<()>;
}

/// The initial spatial source distribution.
///
/// Sampled once at startup (from the Init stream) to fill the first
/// source bank.
pub trait SourceDistribution {
    /// Sample one source site.
    fn sample_site(&self, rng: &mut ChaCha8Rng) -> Particle;
}
