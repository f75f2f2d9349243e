//! Benchmark orchestration
use crate::dispatcher::dispatch;
use crate::error::BenchError;
use crate::graphs;
use crate::transaction::TransactionData;
use bench_core::{
    write_stats_file, LatencyRecorder, RequestCounters, RequestCounts, Stats, TesterConfig,
    BOXPLOT_FILE_NAME, HISTOGRAM_FILE_NAME, STATS_FILE_NAME,
};
use reqwest::Client;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
#[allow(unused)]
use tracing::{debug, error, info, instrument, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TesterState {
    Configured,
    Running,
    Completed,
    Failed,
}

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub stats: Stats,
    /// Wall-clock time from dispatching the first request until the last worker exited.
    pub elapsed: Duration,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elapsed = Duration::from_millis((self.elapsed.as_secs_f64() * 1_000.).round() as u64);
        writeln!(
            f,
            "The benchmark of {} site took {}",
            self.stats.url,
            humantime::format_duration(elapsed)
        )?;
        writeln!(
            f,
            "Requests: {} Success: {} Failures: {}",
            self.stats.requests, self.stats.successes, self.stats.failures
        )?;
        writeln!(
            f,
            "P50: {:.3}ms P90: {:.3}ms P99: {:.3}ms",
            self.stats.p50, self.stats.p90, self.stats.p99
        )
    }
}

/// Runs one benchmark described by a [`TesterConfig`].
///
/// A `Tester` is single use: it moves from [`TesterState::Configured`] through
/// [`TesterState::Running`] to either [`TesterState::Completed`] or [`TesterState::Failed`].
///
/// # Example
/// ```no_run
/// use bench::prelude::*;
///
/// # async fn example() -> Result<(), bench::BenchError> {
/// let config = TesterConfig::builder()
///     .url("http://localhost:3000/")
///     .requests(100)
///     .concurrency(10)
///     .build()?;
///
/// let mut tester = Tester::new(config)?;
/// let report = tester.run().await?;
/// assert_eq!(report.stats.requests, report.stats.successes + report.stats.failures);
/// # Ok(())
/// # }
/// ```
pub struct Tester {
    config: TesterConfig,
    client: Client,
    stdout: Box<dyn Write + Send>,
    state: TesterState,
    counters: RequestCounters,
    recorder: LatencyRecorder,
    report: Option<Report>,
}

impl Tester {
    /// Create a tester with an HTTP client bounded by the configured per-request timeout.
    pub fn new(config: TesterConfig) -> Result<Self, BenchError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a tester around a caller-provided client. The client's own timeout applies and the
    /// configured timeout is ignored.
    pub fn with_client(config: TesterConfig, client: Client) -> Self {
        Self {
            config,
            client,
            stdout: Box::new(io::stdout()),
            state: TesterState::Configured,
            counters: RequestCounters::new(),
            recorder: LatencyRecorder::new(),
            report: None,
        }
    }

    /// Where the final report is written (default: standard output).
    pub fn stdout(mut self, w: impl Write + Send + 'static) -> Self {
        self.stdout = Box::new(w);
        self
    }

    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn state(&self) -> TesterState {
        self.state
    }

    /// Request tallies so far. Available even when the run failed.
    pub fn counts(&self) -> RequestCounts {
        self.counters.snapshot()
    }

    /// Latency samples (ms) of every successful request, in completion order.
    pub fn samples(&self) -> Vec<f64> {
        self.recorder.samples()
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.report.as_ref().map(|r| &r.stats)
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.report.as_ref().map(|r| r.elapsed)
    }

    #[instrument(name = "bench", skip_all, fields(url = self.config.url()))]
    pub async fn run(&mut self) -> Result<Report, BenchError> {
        if self.state != TesterState::Configured {
            return Err(BenchError::AlreadyRun);
        }

        self.state = TesterState::Running;
        let res = self.execute().await;
        self.state = match &res {
            Ok(_) => TesterState::Completed,
            Err(err) => {
                error!("Benchmark failed: {err}");
                TesterState::Failed
            }
        };
        res
    }

    async fn execute(&mut self) -> Result<Report, BenchError> {
        info!(
            "Running {} requests with concurrency {}",
            self.config.requests(),
            self.config.concurrency()
        );

        let data = TransactionData {
            client: self.client.clone(),
            target: Arc::new(self.config.target().clone()),
            user_agent: Arc::from(self.config.user_agent()),
            counters: self.counters.clone(),
            recorder: self.recorder.clone(),
        };

        let start = Instant::now();
        dispatch(data, self.config.requests(), self.config.concurrency()).await;
        let elapsed = start.elapsed();

        let samples = self.recorder.samples();
        let stats = Stats::from_run(self.config.url(), self.counters.snapshot(), &samples)?;
        let report = Report { stats, elapsed };
        self.report = Some(report.clone());

        if self.config.graphs() {
            let output = self.config.output_path();
            graphs::boxplot(&samples, self.config.url(), output.join(BOXPLOT_FILE_NAME))?;
            graphs::histogram(&samples, output.join(HISTOGRAM_FILE_NAME))?;
        }

        if self.config.export_stats() {
            let path = self.config.output_path().join(STATS_FILE_NAME);
            let file = File::create(&path)?;
            write_stats_file(BufWriter::new(file), &report.stats)?;
            debug!("Stats written to {}", path.display());
        }

        write!(self.stdout, "{report}")?;
        self.stdout.flush()?;

        info!("Benchmark complete");
        Ok(report)
    }
}
