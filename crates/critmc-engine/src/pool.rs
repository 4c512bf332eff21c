//! Transport worker pool.
//!
//! `n_workers` threads spawned once at construction, each with its own
//! bounded task channel so the static partition assignment is fixed:
//! particle chunk `w` always lands on worker `w`. A per-dispatch reply
//! channel is the join barrier: [`WorkerPool::dispatch`] returns only
//! after every worker has answered, so the controller never observes a
//! generation in flight.
//!
//! Each worker's fission bank is created once by the controller and
//! round-trips through the task/reply channels: the worker mutates it
//! exclusively during transport, the controller reads it exclusively
//! during the ordered merge. The one datum workers share is the
//! fission-site accumulator, a mutex-protected integer add whose result
//! is independent of completion order.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use critmc_core::{BankError, Particle, ParticleBank, RngController, TransportKernel};

use crate::config::ConfigError;
use crate::error::RunError;

/// One generation's worth of work for a single worker.
struct TransportTask {
    batch: u64,
    generation: u64,
    /// Absolute index of the first particle in this chunk, for Track
    /// stream addressing.
    particle_offset: u64,
    particles: Vec<Particle>,
    bank: ParticleBank,
    reply: Sender<TransportReply>,
}

struct TransportReply {
    worker_index: usize,
    bank: ParticleBank,
    result: Result<(), BankError>,
}

/// Fixed-size pool of transport worker threads.
pub(crate) struct WorkerPool {
    task_senders: Vec<Sender<TransportTask>>,
    handles: Vec<JoinHandle<()>>,
    site_count: Arc<Mutex<u64>>,
}

impl WorkerPool {
    /// Spawn `n_workers` threads sharing the kernel and stream controller.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ThreadSpawnFailed`] if the OS refuses a
    /// thread.
    pub(crate) fn spawn(
        n_workers: usize,
        kernel: Arc<dyn TransportKernel>,
        rng: RngController,
    ) -> Result<Self, ConfigError> {
        let site_count = Arc::new(Mutex::new(0u64));
        let mut task_senders = Vec::with_capacity(n_workers);
        let mut handles = Vec::with_capacity(n_workers);
        for index in 0..n_workers {
            let (tx, rx) = crossbeam_channel::bounded::<TransportTask>(1);
            let kernel = Arc::clone(&kernel);
            let sites = Arc::clone(&site_count);
            let handle = thread::Builder::new()
                .name(format!("critmc-worker-{index}"))
                .spawn(move || worker_loop(rx, kernel, rng, sites, index))
                .map_err(|e| ConfigError::ThreadSpawnFailed {
                    reason: format!("worker {index}: {e}"),
                })?;
            task_senders.push(tx);
            handles.push(handle);
        }
        Ok(Self {
            task_senders,
            handles,
            site_count,
        })
    }

    /// Transport one generation: partition the source into contiguous
    /// chunks, dispatch them, and block until every worker replies.
    ///
    /// Consumes the worker banks and returns them, refilled, in
    /// worker-index order regardless of completion order.
    ///
    /// # Errors
    ///
    /// Returns the first transport [`BankError`] after the barrier, or
    /// [`RunError::WorkerLost`] if a worker's channel disconnected.
    pub(crate) fn dispatch(
        &self,
        batch: u64,
        generation: u64,
        source: &ParticleBank,
        banks: Vec<ParticleBank>,
    ) -> Result<Vec<ParticleBank>, RunError> {
        let n_workers = self.task_senders.len();
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(n_workers);

        // Static contiguous partition: the first `rem` workers take one
        // extra particle.
        let base = source.len() / n_workers;
        let rem = source.len() % n_workers;
        let mut offset = 0usize;
        for (index, bank) in banks.into_iter().enumerate() {
            let count = base + usize::from(index < rem);
            let task = TransportTask {
                batch,
                generation,
                particle_offset: offset as u64,
                particles: source.as_slice()[offset..offset + count].to_vec(),
                bank,
                reply: reply_tx.clone(),
            };
            self.task_senders[index]
                .send(task)
                .map_err(|_| RunError::WorkerLost)?;
            offset += count;
        }
        drop(reply_tx);

        // Join barrier: all workers must answer before the controller
        // proceeds to merge.
        let mut slots: Vec<Option<ParticleBank>> = (0..n_workers).map(|_| None).collect();
        let mut first_error: Option<BankError> = None;
        for _ in 0..n_workers {
            let reply = reply_rx.recv().map_err(|_| RunError::WorkerLost)?;
            if let (None, Err(e)) = (&first_error, &reply.result) {
                first_error = Some(*e);
            }
            slots[reply.worker_index] = Some(reply.bank);
        }
        if let Some(e) = first_error {
            return Err(RunError::Bank(e));
        }
        slots
            .into_iter()
            .map(|slot| slot.ok_or(RunError::WorkerLost))
            .collect()
    }

    /// Read and zero the shared fission-site accumulator.
    pub(crate) fn take_site_count(&self) -> u64 {
        let mut count = self
            .site_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *count)
    }

    /// Number of workers in the pool.
    pub(crate) fn n_workers(&self) -> usize {
        self.task_senders.len()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the channels ends the worker loops.
        self.task_senders.clear();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn worker_loop(
    task_rx: Receiver<TransportTask>,
    kernel: Arc<dyn TransportKernel>,
    rng: RngController,
    site_count: Arc<Mutex<u64>>,
    worker_index: usize,
) {
    while let Ok(mut task) = task_rx.recv() {
        let mut result = Ok(());
        for (i, particle) in task.particles.iter().enumerate() {
            let mut track =
                rng.track(task.batch, task.generation, task.particle_offset + i as u64);
            if let Err(e) = kernel.transport(*particle, &mut track, &mut task.bank) {
                result = Err(e);
                break;
            }
        }

        // The one multi-writer datum of a generation. Integer addition,
        // so the total is the same whatever order workers arrive in.
        {
            let mut sites = site_count.lock().unwrap_or_else(PoisonError::into_inner);
            *sites += task.bank.len() as u64;
        }

        let reply = TransportReply {
            worker_index,
            bank: task.bank,
            result,
        };
        if task.reply.send(reply).is_err() {
            // Controller is gone; nothing left to do.
            return;
        }
    }
    // Channel closed, pool is shutting down.
}

#[cfg(test)]
mod tests {
    use super::*;
    use critmc_test_utils::FixedYieldKernel;

    fn source_of(n: usize) -> ParticleBank {
        let mut bank = ParticleBank::with_capacity(n).unwrap();
        for i in 0..n {
            bank.push(Particle {
                weight: i as f64,
                ..Particle::new([0.0; 3], [0.0, 0.0, 1.0])
            })
            .unwrap();
        }
        bank
    }

    fn banks(n_workers: usize, capacity: usize) -> Vec<ParticleBank> {
        (0..n_workers)
            .map(|_| ParticleBank::with_capacity(capacity).unwrap())
            .collect()
    }

    #[test]
    fn dispatch_partitions_contiguously_and_counts_sites() {
        let pool = WorkerPool::spawn(
            3,
            Arc::new(FixedYieldKernel::new(1)),
            RngController::new(1, 1, 10),
        )
        .unwrap();
        let source = source_of(10);
        let refilled = pool.dispatch(0, 0, &source, banks(3, 8)).unwrap();

        // 10 particles over 3 workers: chunks of 4, 3, 3 in order.
        let chunk_weights: Vec<Vec<f64>> = refilled
            .iter()
            .map(|b| b.as_slice().iter().map(|p| p.weight).collect())
            .collect();
        assert_eq!(chunk_weights[0], vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(chunk_weights[1], vec![4.0, 5.0, 6.0]);
        assert_eq!(chunk_weights[2], vec![7.0, 8.0, 9.0]);

        assert_eq!(pool.take_site_count(), 10);
        // The accumulator was zeroed by the read.
        assert_eq!(pool.take_site_count(), 0);
    }

    #[test]
    fn dispatch_surfaces_capacity_violation_after_barrier() {
        let pool = WorkerPool::spawn(
            2,
            Arc::new(FixedYieldKernel::new(4)),
            RngController::new(1, 1, 8),
        )
        .unwrap();
        let source = source_of(8);
        // Worker banks sized for yield 1, kernel yields 4.
        let result = pool.dispatch(0, 0, &source, banks(2, 4));
        assert!(matches!(
            result,
            Err(RunError::Bank(BankError::CapacityExceeded { .. }))
        ));
    }

    #[test]
    fn more_workers_than_particles_is_fine() {
        let pool = WorkerPool::spawn(
            4,
            Arc::new(FixedYieldKernel::new(1)),
            RngController::new(1, 1, 2),
        )
        .unwrap();
        let source = source_of(2);
        let refilled = pool.dispatch(0, 0, &source, banks(4, 4)).unwrap();
        assert_eq!(refilled.len(), 4);
        assert_eq!(refilled[0].len(), 1);
        assert_eq!(refilled[1].len(), 1);
        assert!(refilled[2].is_empty());
        assert!(refilled[3].is_empty());
        assert_eq!(pool.n_workers(), 4);
    }
}
