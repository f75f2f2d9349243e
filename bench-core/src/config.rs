use crate::{
    Error, DEFAULT_CONCURRENCY, DEFAULT_NUM_REQUESTS, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT,
};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Validated, immutable settings for a single benchmark run.
///
/// Only obtainable through [`TesterConfigBuilder::build`], so every instance has a parseable
/// target with a host and at least one request to perform.
#[derive(Clone, Debug)]
pub struct TesterConfig {
    url: String,
    target: Url,
    requests: u64,
    concurrency: usize,
    timeout: Duration,
    user_agent: String,
    output_path: PathBuf,
    graphs: bool,
    export_stats: bool,
}

impl TesterConfig {
    pub fn builder() -> TesterConfigBuilder {
        TesterConfigBuilder::default()
    }

    /// The URL exactly as it was supplied.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    pub fn requests(&self) -> u64 {
        self.requests
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn output_path(&self) -> &PathBuf {
        &self.output_path
    }

    pub fn graphs(&self) -> bool {
        self.graphs
    }

    pub fn export_stats(&self) -> bool {
        self.export_stats
    }
}

#[derive(Clone, Debug)]
pub struct TesterConfigBuilder {
    url: Option<String>,
    requests: u64,
    concurrency: usize,
    timeout: Duration,
    user_agent: String,
    output_path: PathBuf,
    graphs: bool,
    export_stats: bool,
}

impl Default for TesterConfigBuilder {
    fn default() -> Self {
        Self {
            url: None,
            requests: DEFAULT_NUM_REQUESTS,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            graphs: false,
            export_stats: false,
        }
    }
}

impl TesterConfigBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn requests(mut self, requests: u64) -> Self {
        self.requests = requests;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    pub fn graphs(mut self, graphs: bool) -> Self {
        self.graphs = graphs;
        self
    }

    pub fn export_stats(mut self, export_stats: bool) -> Self {
        self.export_stats = export_stats;
        self
    }

    /// Validate and freeze the configuration.
    ///
    /// Checks run in a fixed order: URL presence, URL parse, host, then request count.
    pub fn build(self) -> Result<TesterConfig, Error> {
        let url = match self.url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(Error::NoUrl),
        };

        let target = Url::parse(&url)?;
        if target.host_str().map_or(true, str::is_empty) {
            return Err(Error::MissingHost(url));
        }

        if self.requests < 1 {
            return Err(Error::InvalidRequests(self.requests));
        }

        Ok(TesterConfig {
            url,
            target,
            requests: self.requests,
            concurrency: self.concurrency,
            timeout: self.timeout,
            user_agent: self.user_agent,
            output_path: self.output_path,
            graphs: self.graphs,
            export_stats: self.export_stats,
        })
    }
}
