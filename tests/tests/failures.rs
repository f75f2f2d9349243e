use utils::*;

use bench::prelude::*;
use bench::{BenchError, CoreError, TesterState};
use std::time::Duration;

fn config(url: String, requests: u64, concurrency: usize) -> TesterConfig {
    TesterConfig::builder()
        .url(url)
        .requests(requests)
        .concurrency(concurrency)
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}

#[tracing_test::traced_test]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn non_ok_status_recorded_as_failure() {
    let base = serve().await;

    let mut tester = Tester::new(config(format!("{base}/status/500"), 1, 1))
        .unwrap()
        .stdout(SharedBuf::default());
    let res = tester.run().await;

    assert!(matches!(res, Err(BenchError::Core(CoreError::TimeNotRecorded))));
    assert_eq!(tester.state(), TesterState::Failed);
    assert!(tester.stats().is_none());

    let counts = tester.counts();
    assert_eq!(counts.requests, 1);
    assert_eq!(counts.successes, 0);
    assert_eq!(counts.failures, 1);
    assert!(logs_contain("unexpected status code 500"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_request_failing() {
    let base = serve().await;

    let mut tester = Tester::new(config(format!("{base}/status/503"), 50, 3))
        .unwrap()
        .stdout(SharedBuf::default());
    let res = tester.run().await;

    assert!(matches!(res, Err(BenchError::Core(CoreError::TimeNotRecorded))));

    // Each worker gives up after its first failure, so far fewer than 50 are attempted.
    let counts = tester.counts();
    assert_eq!(counts.successes, 0);
    assert_eq!(counts.requests, counts.successes + counts.failures);
    assert!(counts.requests >= 1 && counts.requests <= 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn worker_stops_after_first_failure() -> anyhow::Result<()> {
    let base = serve().await;

    let mut tester = Tester::new(config(format!("{base}/fail-after/5/single-worker"), 10, 1))?
        .stdout(SharedBuf::default());
    let stats = tester.run().await?.stats;

    // Requests 7 through 10 are never attempted.
    assert_eq!(stats.requests, 6);
    assert_eq!(stats.successes, 5);
    assert_eq!(stats.failures, 1);
    assert_eq!(tester.samples().len(), 5);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn partial_failure_still_reports() -> anyhow::Result<()> {
    let base = serve().await;

    let mut tester = Tester::new(config(format!("{base}/fail-after/5/two-workers"), 10, 2))?
        .stdout(SharedBuf::default());
    let stats = tester.run().await?.stats;

    assert_eq!(stats.successes, 5);
    assert_eq!(stats.requests, stats.successes + stats.failures);
    assert!(stats.failures >= 1 && stats.failures <= 2);
    assert!(stats.requests <= 10);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn wrong_user_agent_is_rejected_by_server() {
    let base = serve().await;

    let config = TesterConfig::builder()
        .url(format!("{base}/headers"))
        .user_agent("CustomUserAgent")
        .build()
        .unwrap();
    let mut tester = Tester::new(config).unwrap().stdout(SharedBuf::default());

    assert!(matches!(
        tester.run().await,
        Err(BenchError::Core(CoreError::TimeNotRecorded))
    ));
    assert_eq!(tester.counts().failures, 1);
}

#[tracing_test::traced_test]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn timeout_is_a_failure() {
    let base = serve().await;

    let config = TesterConfig::builder()
        .url(format!("{base}/delay/ms/1000"))
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let mut tester = Tester::new(config).unwrap().stdout(SharedBuf::default());

    assert!(matches!(
        tester.run().await,
        Err(BenchError::Core(CoreError::TimeNotRecorded))
    ));
    assert_eq!(tester.counts().failures, 1);
    assert!(logs_contain("request failed"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn nothing_printed_on_failure() {
    let base = serve().await;
    let stdout = SharedBuf::default();

    let mut tester =
        Tester::new(config(format!("{base}/status/404"), 1, 1)).unwrap().stdout(stdout.clone());
    assert!(tester.run().await.is_err());
    assert!(stdout.contents().is_empty());
}
