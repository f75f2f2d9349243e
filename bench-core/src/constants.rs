use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 1;
pub const DEFAULT_NUM_REQUESTS: u64 = 1;
pub const DEFAULT_OUTPUT_PATH: &str = "./";
pub const DEFAULT_USER_AGENT: &str = "Bench 0.0.1 Alpha";

/// Per-request timeout applied to the default HTTP client
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const STATS_FILE_NAME: &str = "statsfile.txt";
pub const BOXPLOT_FILE_NAME: &str = "boxplot.svg";
pub const HISTOGRAM_FILE_NAME: &str = "histogram.svg";
