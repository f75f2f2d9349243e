use bench::cli::{BenchCli, Command};
use bench::{compare_stats_files, BenchError, Tester};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_LOG_FILTER: &str = "bench=info,bench_core=info";

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = BenchCli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), BenchError> {
    match command {
        Command::Run(args) => {
            let config = args.into_config()?;
            Tester::new(config)?.run().await?;
        }
        Command::Cmp(args) => {
            let delta = compare_stats_files(&args.first, &args.second)?;
            print!("{delta}");
        }
    }
    Ok(())
}
