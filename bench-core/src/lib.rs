mod codec;
mod config;
mod constants;
mod counters;
mod error;
mod percentile;
mod recorder;
mod stats;

pub use codec::*;
pub use config::*;
pub use constants::*;
pub use counters::*;
pub use error::*;
pub use percentile::*;
pub use recorder::*;
pub use stats::*;
