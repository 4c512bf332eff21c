//! Fission-bank synchronization: ordered merge and unbiased resample.
//!
//! Runs once per generation, after the transport barrier. The merge
//! concatenates worker banks into the global bank strictly in
//! worker-index order; the ordering runs on the controller thread after
//! every worker has finished, so it is deterministic by construction and
//! independent of which worker completed first. The resample then rebuilds
//! the source population, size-conserving, from the merged pool.

use std::error::Error;
use std::fmt;

use rand::Rng;

use critmc_core::{BankError, ChaCha8Rng, ParticleBank};

// ── SyncError ──────────────────────────────────────────────────────

/// Errors from the merge/resample stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncError {
    /// The merged fission bank is empty while the source population is
    /// not: there is nothing to resample from. Fatal; the population
    /// has died out, which is a configuration problem, not a recoverable
    /// state.
    EmptyFissionBank {
        /// The source population size that could not be refilled.
        source_size: usize,
    },
    /// A bank capacity was exceeded during the merge.
    Bank(BankError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFissionBank { source_size } => {
                write!(
                    f,
                    "fission bank is empty, cannot resample {source_size} source sites"
                )
            }
            Self::Bank(e) => write!(f, "merge: {e}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bank(e) => Some(e),
            Self::EmptyFissionBank { .. } => None,
        }
    }
}

impl From<BankError> for SyncError {
    fn from(e: BankError) -> Self {
        Self::Bank(e)
    }
}

// ── Merge ──────────────────────────────────────────────────────────

/// Concatenate every worker bank into `global`, in worker-index order,
/// then clear the worker banks.
///
/// Postcondition: `global.len()` grew by the sum of worker counts and
/// every worker bank is empty.
///
/// # Errors
///
/// Returns [`BankError::CapacityExceeded`] if the combined population
/// does not fit in `global`; worker banks are left uncleared in that
/// case (the run is aborting anyway).
pub fn merge_fission_banks(
    global: &mut ParticleBank,
    workers: &mut [ParticleBank],
) -> Result<(), BankError> {
    for bank in workers.iter() {
        global.append_from(bank)?;
    }
    for bank in workers.iter_mut() {
        bank.clear();
    }
    Ok(())
}

// ── Resample ───────────────────────────────────────────────────────

/// Rebuild the source population by unbiased selection of exactly
/// `source.len()` sites from the merged `pool`, then clear the pool.
///
/// Two branches, both size-conserving:
/// - `N_f >= N_s`: copy the first `N_s` pool sites, then reservoir-replace:
///   for each pool index `i` in `N_s..N_f`, draw `j` uniform on `[0, i]`
///   and overwrite slot `j` when `j < N_s`. After the last site, every
///   pool site occupies any given slot with probability `N_s / N_f`.
/// - `N_f < N_s`: fill the `N_s - N_f` shortfall slots by uniform draws
///   with replacement, then copy all `N_f` pool sites verbatim; every
///   surviving site is represented at least once.
///
/// # Errors
///
/// Returns [`SyncError::EmptyFissionBank`] when the pool is empty and
/// the source is not.
pub fn resample_source(
    pool: &mut ParticleBank,
    source: &mut ParticleBank,
    rng: &mut ChaCha8Rng,
) -> Result<(), SyncError> {
    let n_s = source.len();
    let n_f = pool.len();
    if n_f == 0 && n_s > 0 {
        return Err(SyncError::EmptyFissionBank { source_size: n_s });
    }

    let slots = source.as_mut_slice();
    let sites = pool.as_slice();

    if n_f >= n_s {
        slots.copy_from_slice(&sites[..n_s]);
        for i in n_s..n_f {
            let j = rng.random_range(0..=i as u64) as usize;
            if j < n_s {
                slots[j] = sites[i];
            }
        }
    } else {
        for slot in &mut slots[..n_s - n_f] {
            let j = rng.random_range(0..n_f as u64) as usize;
            *slot = sites[j];
        }
        slots[n_s - n_f..].copy_from_slice(sites);
    }

    pool.clear();
    Ok(())
}

/// Merge all worker banks and resample the source population, in order.
///
/// The per-generation synchronization entry point: after this returns,
/// the source bank holds the next generation's population, and the
/// global and worker fission banks are all empty.
///
/// # Errors
///
/// Propagates merge capacity violations and the empty-pool condition.
pub fn synchronize(
    global: &mut ParticleBank,
    workers: &mut [ParticleBank],
    source: &mut ParticleBank,
    rng: &mut ChaCha8Rng,
) -> Result<(), SyncError> {
    merge_fission_banks(global, workers)?;
    resample_source(global, source, rng)
}
