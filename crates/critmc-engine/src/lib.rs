//! Batch/generation eigenvalue iteration engine for critmc.
//!
//! Drives the criticality power iteration: transport a source
//! population in parallel, harvest fission sites into per-worker banks,
//! merge them in deterministic worker order, resample the next source
//! population, and accumulate k-effective statistics over the active
//! batches. Transport physics, tallies, and the source distribution
//! plug in through the `critmc-core` traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod metrics;
pub mod output;
mod pool;
pub mod runner;
pub mod stats;
pub mod sync;

pub use config::{ConfigError, RunConfig};
pub use error::RunError;
pub use metrics::RunMetrics;
pub use runner::{EigenvalueRunner, RunSummary};
pub use stats::KeffStatistics;
pub use sync::{merge_fission_banks, resample_source, synchronize, SyncError};
