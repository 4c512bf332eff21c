//! Error types for the core containers.

use std::error::Error;
use std::fmt;

/// Errors from [`ParticleBank`](crate::bank::ParticleBank) operations.
///
/// Bank capacities are fixed at construction; any write that would grow
/// the live count past capacity is rejected rather than truncated, and
/// the engine treats it as fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BankError {
    /// A bank was requested with zero capacity.
    ZeroCapacity,
    /// A push or append would exceed the bank's fixed capacity.
    CapacityExceeded {
        /// The bank's fixed capacity.
        capacity: usize,
        /// The live count the operation would have produced.
        requested: usize,
    },
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "bank capacity must be at least 1"),
            Self::CapacityExceeded {
                capacity,
                requested,
            } => {
                write!(
                    f,
                    "bank capacity exceeded: {requested} particles into capacity {capacity}"
                )
            }
        }
    }
}

impl Error for BankError {}
