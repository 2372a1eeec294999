use serde::Serialize;

use crate::error::AppResult;

use super::RunReport;

#[derive(Debug, Serialize)]
struct JsonSummary {
    successful_requests: u64,
    failed_requests: u64,
    total_response_bytes: u64,
    reporters: usize,
    wall_clock_us: u64,
    derived: Option<JsonDerived>,
    failures: Vec<JsonFailure>,
}

#[derive(Debug, Serialize)]
struct JsonDerived {
    mean_worker_duration_us: u64,
    requests_per_sec: f64,
    bytes_per_sec: f64,
    overall_requests_per_sec: f64,
    overall_bytes_per_sec: f64,
    latency: JsonLatency,
}

#[derive(Debug, Serialize)]
struct JsonLatency {
    min_us: u64,
    mean_us: u64,
    max_us: u64,
    stddev_us: u64,
    percentiles: Vec<JsonPercentile>,
}

#[derive(Debug, Serialize)]
struct JsonPercentile {
    percentile: &'static str,
    value_us: u64,
}

#[derive(Debug, Serialize)]
struct JsonFailure {
    cause: String,
    count: u64,
}

/// Renders the report as pretty-printed JSON with latencies in microseconds.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(report: &RunReport) -> AppResult<String> {
    let summary = JsonSummary::from(report);
    Ok(serde_json::to_string_pretty(&summary)?)
}

impl From<&RunReport> for JsonSummary {
    fn from(report: &RunReport) -> Self {
        let stats = &report.stats;
        let derived = report.derived.as_ref().map(|derived| JsonDerived {
            mean_worker_duration_us: micros(derived.mean_worker_duration),
            requests_per_sec: from_x100(derived.request_rate_x100),
            bytes_per_sec: from_x100(derived.byte_rate_x100),
            overall_requests_per_sec: from_x100(derived.overall_request_rate_x100),
            overall_bytes_per_sec: from_x100(derived.overall_byte_rate_x100),
            latency: JsonLatency {
                min_us: micros(derived.latency.min),
                mean_us: micros(derived.latency.mean),
                max_us: micros(derived.latency.max),
                stddev_us: micros(derived.latency.stddev),
                percentiles: derived
                    .latency
                    .percentiles
                    .iter()
                    .map(|percentile| JsonPercentile {
                        percentile: percentile.label,
                        value_us: micros(percentile.value),
                    })
                    .collect(),
            },
        });
        let failures = stats
            .sorted_failures()
            .into_iter()
            .map(|(cause, count)| JsonFailure {
                cause: cause.to_string(),
                count,
            })
            .collect();

        Self {
            successful_requests: stats.successful_requests,
            failed_requests: stats.failed_requests,
            total_response_bytes: stats.total_response_bytes,
            reporters: report.reporters,
            wall_clock_us: micros(report.wall_clock),
            derived,
            failures,
        }
    }
}

fn micros(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

#[expect(
    clippy::float_arithmetic,
    reason = "JSON consumers expect fractional rates."
)]
fn from_x100(value: u64) -> f64 {
    value as f64 / 100.0
}
