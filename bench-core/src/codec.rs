//! Line-oriented stats file encoding
//!
//! Each record is one line of `url,requests,successes,failures,p50,p90,p99` with the
//! percentiles written to three decimal places. The mean is not persisted.
use crate::{compare_stats, Error, Stats, StatsDelta};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use tracing::debug;

const FIELD_COUNT: usize = 7;

/// Encode one record as a single line.
///
/// The encoding is lossy: `mean` is dropped and percentiles are rounded to three decimal
/// places. Decoding the result gives back `stats` exactly only when `mean` is `0` and every
/// percentile already has at most three decimals.
pub fn encode(stats: &Stats) -> String {
    format!(
        "{},{},{},{},{:.3},{:.3},{:.3}",
        stats.url, stats.requests, stats.successes, stats.failures, stats.p50, stats.p90, stats.p99,
    )
}

/// Decode every line of `text` into a [`Stats`] record. `mean` always decodes as `0`.
pub fn decode(text: &str) -> Result<Vec<Stats>, Error> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| decode_line(idx + 1, line))
        .collect()
}

pub fn write_stats_file<W: Write>(mut w: W, stats: &Stats) -> Result<(), Error> {
    writeln!(w, "{}", encode(stats))?;
    w.flush()?;
    Ok(())
}

pub fn read_stats_file<R: Read>(r: R) -> Result<Vec<Stats>, Error> {
    BufReader::new(r)
        .lines()
        .enumerate()
        .map(|(idx, line)| decode_line(idx + 1, &line?))
        .collect()
}

/// Compare the most recent record of each stats file (second minus first).
pub fn compare_stats_files(
    first: impl AsRef<Path>,
    second: impl AsRef<Path>,
) -> Result<StatsDelta, Error> {
    let first = last_record(first.as_ref())?;
    let second = last_record(second.as_ref())?;
    Ok(compare_stats(&first, &second))
}

fn last_record(path: &Path) -> Result<Stats, Error> {
    let file = File::open(path)?;
    let records = read_stats_file(file)?;
    debug!("Read {} stats records from {}", records.len(), path.display());
    records.into_iter().last().ok_or(Error::EmptyStatsFile)
}

// Split from the right so that a URL containing commas survives.
fn decode_line(line: usize, text: &str) -> Result<Stats, Error> {
    let malformed = |reason: String| Error::MalformedRecord { line, reason };

    let mut fields: Vec<&str> = text.rsplitn(FIELD_COUNT, ',').collect();
    if fields.len() < FIELD_COUNT {
        return Err(malformed(format!(
            "expected {FIELD_COUNT} fields, found {}",
            fields.len()
        )));
    }
    fields.reverse();

    let int = |name: &str, value: &str| {
        value
            .parse::<u64>()
            .map_err(|e| malformed(format!("{name} {value:?}: {e}")))
    };
    let float = |name: &str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|e| malformed(format!("{name} {value:?}: {e}")))
    };

    Ok(Stats {
        url: fields[0].to_string(),
        requests: int("requests", fields[1])?,
        successes: int("successes", fields[2])?,
        failures: int("failures", fields[3])?,
        mean: 0.,
        p50: float("p50", fields[4])?,
        p90: float("p90", fields[5])?,
        p99: float("p99", fields[6])?,
    })
}
