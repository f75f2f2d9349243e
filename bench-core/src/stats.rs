use crate::{Error, Percentiles, RequestCounts};
use std::fmt;

/// Aggregate results of one benchmark run.
///
/// Latencies are in milliseconds. `requests == successes + failures` for any record produced by
/// a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stats {
    pub url: String,
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
    pub mean: f64,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
}

impl Stats {
    /// Build the record for a finished run. Fails with [`Error::TimeNotRecorded`] when no
    /// latency sample was collected.
    pub fn from_run(url: &str, counts: RequestCounts, samples: &[f64]) -> Result<Self, Error> {
        let percentiles = Percentiles::compute(samples)?;
        Ok(Self {
            url: url.to_string(),
            requests: counts.requests,
            successes: counts.successes,
            failures: counts.failures,
            mean: percentiles.mean,
            p50: percentiles.p50,
            p90: percentiles.p90,
            p99: percentiles.p99,
        })
    }

    pub fn counts(&self) -> RequestCounts {
        RequestCounts {
            requests: self.requests,
            successes: self.successes,
            failures: self.failures,
        }
    }
}

/// Field-wise difference between two [`Stats`] records (second minus first).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatsDelta {
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    pub requests: i64,
    pub successes: i64,
    pub failures: i64,
}

pub fn compare_stats(first: &Stats, second: &Stats) -> StatsDelta {
    StatsDelta {
        p50: second.p50 - first.p50,
        p90: second.p90 - first.p90,
        p99: second.p99 - first.p99,
        requests: signed_diff(second.requests, first.requests),
        successes: signed_diff(second.successes, first.successes),
        failures: signed_diff(second.failures, first.failures),
    }
}

fn signed_diff(a: u64, b: u64) -> i64 {
    (a as i128 - b as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

impl fmt::Display for StatsDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Requests: {:+} Success: {:+} Failures: {:+}",
            self.requests, self.successes, self.failures
        )?;
        writeln!(
            f,
            "P50: {:+.3}ms P90: {:+.3}ms P99: {:+.3}ms",
            self.p50, self.p90, self.p99
        )
    }
}
