//! Minimal end-to-end run: a splitting mock kernel, four workers,
//! progress on stdout, and the summary printed at the end.
//!
//! Run with: `cargo run --example quickstart`

use std::sync::Arc;

use critmc_engine::{EigenvalueRunner, RunConfig};
use critmc_test_utils::{NullTally, SplittingKernel, UniformCubeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RunConfig {
        n_batches: 20,
        n_active: 10,
        n_generations: 5,
        n_particles: 5_000,
        n_workers: 4,
        seed: 42,
        tally: false,
        bank_headroom: 2,
        kernel: Arc::new(SplittingKernel::new(1.02)),
        tally_handle: Arc::new(NullTally::new()),
        source: Box::new(UniformCubeSource::new(0.5)),
    };

    let runner = EigenvalueRunner::new(config)?;
    let mut stdout = std::io::stdout();
    let summary = runner.run(&mut stdout)?;

    println!();
    if let (Some(mean), Some(std_dev)) = (summary.mean, summary.std_dev) {
        println!("keff = {mean:.6} +/- {std_dev:.6}");
    }
    println!(
        "{} batches, {} generations, {} ms total ({} ms transport)",
        summary.metrics.batches_run,
        summary.metrics.generations_run,
        summary.metrics.total_us / 1000,
        summary.metrics.transport_us / 1000,
    );
    Ok(())
}
