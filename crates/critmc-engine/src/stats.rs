//! Running k-effective statistics over active batches.

/// Append-only series of per-active-batch k-effective values with
/// running mean and Bessel-corrected standard deviation.
///
/// Both statistics are explicit about being undefined:
/// [`mean()`](KeffStatistics::mean) is `None` for an empty series and
/// [`std_dev()`](KeffStatistics::std_dev) is `None` below two samples,
/// where the `n - 1` divisor would be zero. Neither ever yields NaN.
#[derive(Clone, Debug, Default)]
pub struct KeffStatistics {
    samples: Vec<f64>,
}

impl KeffStatistics {
    /// An empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one active-batch k-effective value.
    pub fn push(&mut self, keff: f64) {
        self.samples.push(keff);
    }

    /// Number of active-batch samples so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no active batch has completed yet.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The samples, in active-batch order.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Arithmetic mean, or `None` for an empty series.
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    /// Bessel-corrected sample standard deviation, or `None` below two
    /// samples.
    pub fn std_dev(&self) -> Option<f64> {
        let n = self.samples.len();
        if n < 2 {
            return None;
        }
        let mean = self.samples.iter().sum::<f64>() / n as f64;
        let sum_sq: f64 = self.samples.iter().map(|x| (x - mean).powi(2)).sum();
        Some((sum_sq / (n - 1) as f64).sqrt())
    }

    /// Consume the estimator, yielding the series.
    pub fn into_series(self) -> Vec<f64> {
        self.samples
    }
}
