//! Error types for run execution.

use std::error::Error;
use std::fmt;
use std::io;

use critmc_core::BankError;

use crate::sync::SyncError;

/// Errors that abort an eigenvalue run.
///
/// A run either completes all batches or terminates with one of these,
/// identifying the violated invariant. There is no retry path.
#[derive(Debug)]
pub enum RunError {
    /// A fission bank overflowed its fixed capacity during transport or
    /// merge.
    Bank(BankError),
    /// The merge/resample step failed.
    Sync(SyncError),
    /// A transport worker disappeared mid-run (its channel disconnected,
    /// typically after a panic in the kernel).
    WorkerLost,
    /// Writing progress, tally, or keff output failed.
    Io(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bank(e) => write!(f, "bank: {e}"),
            Self::Sync(e) => write!(f, "synchronization: {e}"),
            Self::WorkerLost => write!(f, "transport worker disconnected"),
            Self::Io(e) => write!(f, "output: {e}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bank(e) => Some(e),
            Self::Sync(e) => Some(e),
            Self::WorkerLost => None,
            Self::Io(e) => Some(e),
        }
    }
}

impl From<BankError> for RunError {
    fn from(e: BankError) -> Self {
        Self::Bank(e)
    }
}

impl From<SyncError> for RunError {
    fn from(e: SyncError) -> Self {
        Self::Sync(e)
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
