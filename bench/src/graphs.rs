//! Latency graphs rendered as SVG
use crate::error::BenchError;
use plotters::data::Quartiles;
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

const WIDTH: u32 = 600;
const HEIGHT: u32 = 400;
const HISTOGRAM_BINS: usize = 50;

/// Box-and-whisker plot of the latency samples, with the URL as the x-axis label.
pub fn boxplot(samples: &[f64], url: &str, path: impl AsRef<Path>) -> Result<(), BenchError> {
    let path = path.as_ref();
    if samples.is_empty() {
        return Err(bench_core::Error::TimeNotRecorded.into());
    }

    let [lower_fence, lower, median, upper, upper_fence] =
        Quartiles::new(samples).values().map(f64::from);
    let (min, max) = bounds(samples);
    let y_range = padded(min.min(lower_fence), max.max(upper_fence));

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Latency boxplot", ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..2f64, y_range)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(1)
        .x_label_formatter(&|_| String::new())
        .x_desc(url)
        .y_desc("latency (ms)")
        .draw()?;

    let style = BLUE.stroke_width(1);
    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.75, lower), (1.25, upper)],
        style,
    )))?;
    chart.draw_series(
        [
            vec![(0.75, median), (1.25, median)],
            vec![(1., upper), (1., upper_fence)],
            vec![(1., lower), (1., lower_fence)],
            vec![(0.9, upper_fence), (1.1, upper_fence)],
            vec![(0.9, lower_fence), (1.1, lower_fence)],
        ]
        .into_iter()
        .map(|points| PathElement::new(points, style)),
    )?;
    chart.draw_series(
        samples
            .iter()
            .filter(|v| **v < lower_fence || **v > upper_fence)
            .map(|v| Circle::new((1., *v), 2, BLUE.filled())),
    )?;

    root.present()?;
    debug!("Boxplot written to {}", path.display());
    Ok(())
}

/// Histogram of the latency samples in fixed-width bins.
pub fn histogram(samples: &[f64], path: impl AsRef<Path>) -> Result<(), BenchError> {
    let path = path.as_ref();
    if samples.is_empty() {
        return Err(bench_core::Error::TimeNotRecorded.into());
    }

    let (min, max) = bounds(samples);
    let counts = bin(samples, min, max, HISTOGRAM_BINS);
    let width = bin_width(min, max, HISTOGRAM_BINS);
    let y_max = counts.iter().copied().max().unwrap_or(0) + 1;

    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Latency Histogram", ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(50)
        .build_cartesian_2d(min..min + width * HISTOGRAM_BINS as f64, 0u32..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("latency (ms)")
        .y_desc("n reqs")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(idx, count)| {
        let x0 = min + idx as f64 * width;
        Rectangle::new([(x0, 0), (x0 + width, *count)], BLUE.mix(0.5).filled())
    }))?;

    root.present()?;
    debug!("Histogram written to {}", path.display());
    Ok(())
}

fn bounds(samples: &[f64]) -> (f64, f64) {
    samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(*v), max.max(*v))
        })
}

fn padded(min: f64, max: f64) -> std::ops::Range<f64> {
    let pad = ((max - min) * 0.05).max(0.5);
    (min - pad)..(max + pad)
}

// A single distinct value still gets a visible bin.
fn bin_width(min: f64, max: f64, bins: usize) -> f64 {
    if max > min {
        (max - min) / bins as f64
    } else {
        1.
    }
}

fn bin(samples: &[f64], min: f64, max: f64, bins: usize) -> Vec<u32> {
    let width = bin_width(min, max, bins);
    let mut counts = vec![0u32; bins];
    for v in samples {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}
