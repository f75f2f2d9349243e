use bench_core::{LatencyRecorder, RequestCounters};
use reqwest::{
    header::{ACCEPT, USER_AGENT},
    Client, StatusCode,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use url::Url;

#[cfg(feature = "metrics")]
const REQUESTS_LABEL: &str = "bench_requests";
#[cfg(feature = "metrics")]
const SUCCESS_LABEL: &str = "bench_success";
#[cfg(feature = "metrics")]
const FAILURE_LABEL: &str = "bench_failure";
#[cfg(feature = "metrics")]
const LATENCY_LABEL: &str = "bench_latency_ms";

#[derive(Debug, Error)]
pub(crate) enum RequestError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status code {0}")]
    UnexpectedStatus(StatusCode),
}

/// Shared state handed to every worker: how to make a request and where to record the outcome.
#[derive(Clone)]
pub(crate) struct TransactionData {
    pub client: Client,
    pub target: Arc<Url>,
    pub user_agent: Arc<str>,
    pub counters: RequestCounters,
    pub recorder: LatencyRecorder,
}

impl TransactionData {
    /// Perform one `GET` against the target.
    ///
    /// The attempt is counted before the request goes out. Only a `200 OK` records a latency
    /// sample; anything else is counted as a failure and returned.
    pub async fn perform(&self) -> Result<(), RequestError> {
        self.counters.record_request();
        #[cfg(feature = "metrics")]
        metrics::counter!(REQUESTS_LABEL).increment(1);

        let request = self
            .client
            .get(self.target.as_str())
            .header(USER_AGENT, &*self.user_agent)
            .header(ACCEPT, "*/*");

        let start = Instant::now();
        let res = request.send().await;
        let elapsed = start.elapsed();

        let response = match res {
            Ok(response) => response,
            Err(err) => {
                self.record_failure();
                return Err(err.into());
            }
        };

        if response.status() != StatusCode::OK {
            self.record_failure();
            return Err(RequestError::UnexpectedStatus(response.status()));
        }

        let latency_ms = elapsed.as_nanos() as f64 / 1_000_000.;
        self.recorder.record(latency_ms);
        self.counters.record_success();

        #[cfg(feature = "metrics")]
        {
            metrics::describe_histogram!(LATENCY_LABEL, metrics::Unit::Milliseconds, "");
            metrics::histogram!(LATENCY_LABEL).record(latency_ms);
            metrics::counter!(SUCCESS_LABEL).increment(1);
        }

        Ok(())
    }

    fn record_failure(&self) {
        self.counters.record_failure();
        #[cfg(feature = "metrics")]
        metrics::counter!(FAILURE_LABEL).increment(1);
    }
}
