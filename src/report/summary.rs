use std::time::Duration;

use crate::metrics::{LatencyHistogram, RequesterStats};

/// Quantiles reported for every run, with their display labels.
pub const REPORTED_PERCENTILES: [(f64, &str); 7] = [
    (0.10, "10%"),
    (0.50, "50%"),
    (0.75, "75%"),
    (0.99, "99%"),
    (0.999, "99.9%"),
    (0.999_999, "99.9999%"),
    (0.999_999_9, "99.99999%"),
];

/// Aggregate outcome of one run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: RequesterStats,
    /// Sessions that delivered a stats record.
    pub reporters: usize,
    /// Time from launching the first session to receiving the last report.
    pub wall_clock: Duration,
    /// Absent when no request succeeded.
    pub derived: Option<DerivedMetrics>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedMetrics {
    /// Summed success latency divided by the number of reporters.
    pub mean_worker_duration: Duration,
    /// Rates are requests (or bytes) per second scaled by 100.
    pub request_rate_x100: u64,
    pub byte_rate_x100: u64,
    pub overall_request_rate_x100: u64,
    pub overall_byte_rate_x100: u64,
    pub latency: LatencySummary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencySummary {
    pub min: Duration,
    pub mean: Duration,
    pub max: Duration,
    pub stddev: Duration,
    pub percentiles: Vec<PercentileValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentileValue {
    pub label: &'static str,
    pub value: Duration,
}

impl RunReport {
    #[must_use]
    pub fn new(stats: RequesterStats, reporters: usize, wall_clock: Duration) -> Self {
        let derived = DerivedMetrics::compute(&stats, reporters, wall_clock);
        Self {
            stats,
            reporters,
            wall_clock,
            derived,
        }
    }
}

impl DerivedMetrics {
    /// Returns `None` when there is nothing to derive rates from.
    #[must_use]
    pub fn compute(
        stats: &RequesterStats,
        reporters: usize,
        wall_clock: Duration,
    ) -> Option<Self> {
        if stats.successful_requests == 0 || reporters == 0 {
            return None;
        }
        let divisor = u32::try_from(reporters).unwrap_or(u32::MAX);
        let mean_worker_duration = stats.total_duration.checked_div(divisor)?;

        Some(Self {
            mean_worker_duration,
            request_rate_x100: rate_x100(stats.successful_requests, mean_worker_duration),
            byte_rate_x100: rate_x100(stats.total_response_bytes, mean_worker_duration),
            overall_request_rate_x100: rate_x100(stats.successful_requests, wall_clock),
            overall_byte_rate_x100: rate_x100(stats.total_response_bytes, wall_clock),
            latency: LatencySummary::from_histogram(&stats.histogram),
        })
    }
}

impl LatencySummary {
    #[must_use]
    pub fn from_histogram(histogram: &LatencyHistogram) -> Self {
        let percentiles = REPORTED_PERCENTILES
            .iter()
            .map(|&(quantile, label)| PercentileValue {
                label,
                value: Duration::from_micros(histogram.percentile(quantile)),
            })
            .collect();
        Self {
            min: Duration::from_micros(histogram.min()),
            mean: micros_from_f64(histogram.mean()),
            max: Duration::from_micros(histogram.max()),
            stddev: micros_from_f64(histogram.stddev()),
            percentiles,
        }
    }
}

/// `count` per second over `span`, scaled by 100. Zero for an empty span.
fn rate_x100(count: u64, span: Duration) -> u64 {
    let scaled = u128::from(count)
        .saturating_mul(100_000_000)
        .checked_div(span.as_micros())
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn micros_from_f64(micros: f64) -> Duration {
    if micros.is_finite() && micros > 0.0 {
        Duration::from_micros(micros.round() as u64)
    } else {
        Duration::ZERO
    }
}
