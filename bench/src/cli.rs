//! Command line interface
//!
//! ```text
//! $ bench run -u https://example.com -r 100 -c 10 -g -s
//! $ bench cmp before/statsfile.txt after/statsfile.txt
//! ```
use bench_core::{
    TesterConfig, DEFAULT_CONCURRENCY, DEFAULT_NUM_REQUESTS, DEFAULT_OUTPUT_PATH,
    DEFAULT_USER_AGENT,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "bench", version, about = "HTTP load tester")]
pub struct BenchCli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a benchmark against a URL
    Run(RunArgs),
    /// Compare two stats files (second relative to first)
    Cmp(CmpArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// url to run benchmark
    #[arg(short = 'u')]
    pub url: Option<String>,

    /// number of requests to be performed in the benchmark
    #[arg(short = 'r', default_value_t = DEFAULT_NUM_REQUESTS)]
    pub requests: u64,

    /// number of concurrent requests (users) to run benchmark
    #[arg(short = 'c', default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// generate graphs
    #[arg(short = 'g')]
    pub graphs: bool,

    /// generate stats file
    #[arg(short = 's')]
    pub export_stats: bool,

    /// directory for graphs and the stats file
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: PathBuf,

    #[arg(short = 'a', long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// per-request timeout, e.g. `500ms` or `5s`
    #[arg(short = 't', long, default_value = "5s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,
}

impl RunArgs {
    pub fn into_config(self) -> Result<TesterConfig, bench_core::Error> {
        let mut builder = TesterConfig::builder()
            .requests(self.requests)
            .concurrency(self.concurrency)
            .graphs(self.graphs)
            .export_stats(self.export_stats)
            .output_path(self.output_path)
            .user_agent(self.user_agent)
            .timeout(self.timeout);

        if let Some(url) = self.url {
            builder = builder.url(url);
        }

        builder.build()
    }
}

#[derive(Args, Debug)]
pub struct CmpArgs {
    pub first: PathBuf,
    pub second: PathBuf,
}
