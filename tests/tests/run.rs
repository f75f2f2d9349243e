use utils::*;

use bench::prelude::*;
use bench::TesterState;
use std::time::Duration;

fn config(url: String, requests: u64, concurrency: usize) -> TesterConfig {
    TesterConfig::builder()
        .url(url)
        .requests(requests)
        .concurrency(concurrency)
        .build()
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn run_returns_valid_stats_and_time() -> anyhow::Result<()> {
    let base = serve().await;
    let stdout = SharedBuf::default();

    let mut tester = Tester::new(config(format!("{base}/"), 100, 10))?.stdout(stdout.clone());
    let report = tester.run().await?;
    let stats = &report.stats;

    assert_eq!(stats.requests, 100);
    assert_eq!(stats.successes, 100);
    assert_eq!(stats.failures, 0);
    assert_eq!(stats.requests, stats.successes + stats.failures);
    assert!(stats.mean > 0.);
    assert!(stats.p50 <= stats.p90 && stats.p90 <= stats.p99);
    assert!(report.elapsed > Duration::ZERO);

    assert_eq!(tester.state(), TesterState::Completed);
    assert_eq!(tester.stats(), Some(stats));
    assert_eq!(tester.elapsed(), Some(report.elapsed));
    assert_eq!(tester.samples().len(), 100);

    let out = stdout.contents();
    assert!(out.contains(&format!("The benchmark of {base}/ site took")));
    assert!(out.contains("Requests: 100 Success: 100 Failures: 0"));
    assert!(out.contains("P50: "));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn more_workers_than_requests() -> anyhow::Result<()> {
    let base = serve().await;

    let mut tester = Tester::new(config(format!("{base}/"), 3, 16))?
        .stdout(SharedBuf::default());
    let stats = tester.run().await?.stats;

    assert_eq!(stats.requests, 3);
    assert_eq!(stats.successes, 3);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn latency_reflects_server_delay() -> anyhow::Result<()> {
    let base = serve().await;

    let mut tester =
        Tester::new(config(format!("{base}/delay/ms/25"), 5, 1))?.stdout(SharedBuf::default());
    let stats = tester.run().await?.stats;

    assert_eq!(stats.successes, 5);
    assert!(stats.p50 >= 25., "p50 was {}", stats.p50);
    assert!(tester.samples().iter().all(|ms| *ms >= 25.));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn workers_run_in_parallel() -> anyhow::Result<()> {
    let base = serve().await;

    let mut tester = Tester::new(config(format!("{base}/delay/ms/200"), 10, 10))?
        .stdout(SharedBuf::default());
    let parallel = tester.run().await?;
    assert_eq!(parallel.stats.successes, 10);
    assert!(
        parallel.elapsed < Duration::from_secs(1),
        "10 workers took {:?}",
        parallel.elapsed
    );

    let mut tester = Tester::new(config(format!("{base}/delay/ms/200"), 10, 1))?
        .stdout(SharedBuf::default());
    let serial = tester.run().await?;
    assert_eq!(serial.stats.successes, 10);
    assert!(
        serial.elapsed >= Duration::from_secs(2),
        "1 worker took {:?}",
        serial.elapsed
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn sends_user_agent_and_accept_headers() -> anyhow::Result<()> {
    let base = serve().await;

    let mut tester = Tester::new(config(format!("{base}/headers"), 4, 2))?
        .stdout(SharedBuf::default());
    let stats = tester.run().await?.stats;

    assert_eq!(stats.successes, 4);
    assert_eq!(stats.failures, 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn custom_client() -> anyhow::Result<()> {
    let base = serve().await;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()?;

    let mut tester = Tester::with_client(config(format!("{base}/"), 2, 1), client)
        .stdout(SharedBuf::default());
    let stats = tester.run().await?.stats;

    assert_eq!(stats.successes, 2);
    Ok(())
}
