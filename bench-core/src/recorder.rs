use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Append-only, thread-safe store of latency samples in milliseconds.
///
/// Cloning yields another handle onto the same samples.
#[derive(Clone, Debug, Default)]
pub struct LatencyRecorder {
    samples: Arc<Mutex<Vec<f64>>>,
}

impl LatencyRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, latency_ms: f64) {
        self.lock().push(latency_ms);
    }

    /// Snapshot of every sample recorded so far, in arrival order.
    pub fn samples(&self) -> Vec<f64> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // NOTE: A push never leaves the Vec half-written, so a poisoned lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, Vec<f64>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
