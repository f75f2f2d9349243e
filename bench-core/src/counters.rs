use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Attempt and outcome tallies for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestCounts {
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
}

/// Shared handle onto the [`RequestCounts`] of a run. Each increment is atomic with respect to
/// the others.
#[derive(Clone, Debug, Default)]
pub struct RequestCounters {
    counts: Arc<Mutex<RequestCounts>>,
}

impl RequestCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.lock().requests += 1;
    }

    pub fn record_success(&self) {
        self.lock().successes += 1;
    }

    pub fn record_failure(&self) {
        self.lock().failures += 1;
    }

    pub fn snapshot(&self) -> RequestCounts {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, RequestCounts> {
        self.counts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
