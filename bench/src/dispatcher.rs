//! Request dispatch
//!
//! A single producer hands out one [`WorkToken`] per request over a one-slot channel to a fixed
//! pool of workers. Closing the channel after the last token tells idle workers to exit.
use crate::transaction::TransactionData;
use async_channel::{bounded, Receiver, Sender};
use tokio::task::JoinHandle;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn, Instrument};

// NOTE: async-channel does not allow a zero capacity; one slot is the closest to a handoff.
// At most one token waits unclaimed and it is counted as undispatched on early exit.
const QUEUE_CAPACITY: usize = 1;

/// Permission to perform exactly one request.
#[derive(Debug)]
pub(crate) struct WorkToken;

/// Perform `requests` requests spread over `concurrency` workers and wait for every worker to
/// exit.
pub(crate) async fn dispatch(data: TransactionData, requests: u64, concurrency: usize) {
    let (tx, rx) = bounded(QUEUE_CAPACITY);

    let producer = tokio::spawn(produce(tx, requests).in_current_span());
    let pool = WorkerPool::spawn(data, rx, concurrency);

    pool.join().await;

    if let Err(err) = producer.await {
        error!("Token producer failed: {err}");
    }
}

async fn produce(tx: Sender<WorkToken>, requests: u64) {
    for sent in 0..requests {
        if tx.send(WorkToken).await.is_err() {
            // Every worker has exited early. A token still parked in the slot was never taken.
            let undispatched = requests - sent + tx.len() as u64;
            warn!("All workers exited, {undispatched} of {requests} requests never dispatched");
            return;
        }
    }
    trace!("All {requests} tokens handed out");
}

struct WorkerPool {
    tasks: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Start `concurrency` workers draining `rx`. The caller's receiver is consumed so that the
    /// channel closes once every worker has gone.
    fn spawn(data: TransactionData, rx: Receiver<WorkToken>, concurrency: usize) -> Self {
        let tasks = (0..concurrency)
            .map(|id| tokio::spawn(worker(id, rx.clone(), data.clone()).in_current_span()))
            .collect();
        debug!("Spawned {concurrency} workers");
        Self { tasks }
    }

    async fn join(self) {
        for handle in self.tasks {
            if let Err(err) = handle.await {
                error!("Worker task failed: {err}");
            }
        }
    }
}

async fn worker(id: usize, rx: Receiver<WorkToken>, data: TransactionData) {
    let mut handled = 0u64;
    while let Ok(WorkToken) = rx.recv().await {
        handled += 1;
        if let Err(err) = data.perform().await {
            error!(worker = id, "{err}");
            // NOTE: A failed request ends this worker. Its remaining share of tokens goes to
            // whichever workers are still running.
            break;
        }
    }
    debug!(worker = id, handled, "Worker finished");
}
