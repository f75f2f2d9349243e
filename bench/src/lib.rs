#![doc = include_str!("../README.md")]

pub mod cli;
pub mod graphs;

mod dispatcher;
mod error;
mod tester;
mod transaction;

pub use bench_core::{
    compare_stats, compare_stats_files, read_stats_file, write_stats_file, Error as CoreError,
    RequestCounts, Stats, StatsDelta, TesterConfig, TesterConfigBuilder,
};
pub use error::BenchError;
pub use tester::{Report, Tester, TesterState};

pub mod prelude {
    pub use crate::tester::{Report, Tester};
    pub use bench_core::{RequestCounts, Stats, StatsDelta, TesterConfig};
}
