//! Run-level timing metrics.
//!
//! [`RunMetrics`] captures coarse timing and progress counters for a
//! whole run; the runner populates them and returns them in the
//! [`RunSummary`](crate::runner::RunSummary) for telemetry or logging
//! by the caller.

/// Timing and progress counters for one eigenvalue run.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default)]
pub struct RunMetrics {
    /// Wall-clock time for the entire run, in microseconds.
    pub total_us: u64,
    /// Cumulative time inside transport dispatch (including the join
    /// barrier), in microseconds.
    pub transport_us: u64,
    /// Cumulative time inside merge and resample, in microseconds.
    pub sync_us: u64,
    /// Batches completed.
    pub batches_run: u64,
    /// Generations completed.
    pub generations_run: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.transport_us, 0);
        assert_eq!(m.sync_us, 0);
        assert_eq!(m.batches_run, 0);
        assert_eq!(m.generations_run, 0);
    }
}
