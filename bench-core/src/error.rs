use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no URL to test")]
    NoUrl,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid URL {0:?}: missing host")]
    MissingHost(String),

    #[error("{0} is invalid number of requests")]
    InvalidRequests(u64),

    #[error("no execution time recorded")]
    TimeNotRecorded,

    #[error("malformed stats record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("stats file contains no records")]
    EmptyStatsFile,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
