use crate::Error;

/// Latency summary over the full sample set of a run, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Percentiles {
    pub mean: f64,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
}

impl Percentiles {
    /// Mean plus nearest-rank P50/P90/P99 (no interpolation).
    ///
    /// The element at index `round(n * p) - 1` of the ascending samples is selected, so for seven
    /// samples P50 is the fourth smallest. Fails with [`Error::TimeNotRecorded`] when there are
    /// no samples.
    pub fn compute(samples: &[f64]) -> Result<Self, Error> {
        if samples.is_empty() {
            return Err(Error::TimeNotRecorded);
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

        Ok(Self {
            mean,
            p50: nearest_rank(&sorted, 0.50),
            p90: nearest_rank(&sorted, 0.90),
            p99: nearest_rank(&sorted, 0.99),
        })
    }
}

// `sorted` is non-empty. For any n >= 1 and p >= 0.5, round(n * p) is in 1..=n; the clamp only
// matters for smaller quantiles.
fn nearest_rank(sorted: &[f64], quantile: f64) -> f64 {
    let rank = (sorted.len() as f64 * quantile).round() as usize;
    let idx = rank.saturating_sub(1).min(sorted.len() - 1);
    sorted[idx]
}
