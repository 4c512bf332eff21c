//! Core types and contracts for the critmc criticality engine.
//!
//! Defines the particle record, the fixed-capacity particle bank, the
//! seekable random-stream controller, and the traits through which the
//! engine talks to its external collaborators (transport kernel, tally,
//! source distribution).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bank;
pub mod error;
pub mod particle;
pub mod rng;
pub mod traits;

pub use bank::ParticleBank;
pub use error::BankError;
pub use particle::Particle;
pub use rng::{RngController, Stream, PARTICLE_STRIDE};
pub use traits::{SourceDistribution, Tally, TransportKernel};

pub use rand_chacha::ChaCha8Rng;
