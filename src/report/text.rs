use std::fmt;

use super::{ByteSize, RunReport};

/// Plain-text rendering of a [`RunReport`].
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'report>(pub &'report RunReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let stats = &report.stats;

        let Some(derived) = report.derived.as_ref() else {
            writeln!(f, "Error: No statistics collected / no requests found")?;
            return write_failures(f, report);
        };

        writeln!(
            f,
            "{} requests in {:?}, {} read",
            stats.successful_requests,
            derived.mean_worker_duration,
            ByteSize(stats.total_response_bytes)
        )?;
        writeln!(f, "Requests/sec:\t\t{}", Fixed(derived.request_rate_x100))?;
        writeln!(
            f,
            "Transfer/sec:\t\t{}",
            ByteSize(derived.byte_rate_x100 / 100)
        )?;
        writeln!(
            f,
            "Overall Requests/sec:\t{}",
            Fixed(derived.overall_request_rate_x100)
        )?;
        writeln!(
            f,
            "Overall Transfer/sec:\t{}",
            ByteSize(derived.overall_byte_rate_x100 / 100)
        )?;
        writeln!(f, "Fastest Request:\t{:?}", derived.latency.min)?;
        writeln!(f, "Avg Req Time:\t\t{:?}", derived.latency.mean)?;
        writeln!(f, "Slowest Request:\t{:?}", derived.latency.max)?;
        write_failures(f, report)?;
        for percentile in &derived.latency.percentiles {
            writeln!(f, "{}:\t\t\t{:?}", percentile.label, percentile.value)?;
        }
        writeln!(f, "stddev:\t\t\t{:?}", derived.latency.stddev)
    }
}

fn write_failures(f: &mut fmt::Formatter<'_>, report: &RunReport) -> fmt::Result {
    writeln!(f, "Number of Errors:\t{}", report.stats.failed_requests)?;
    let failures = report.stats.sorted_failures();
    if failures.is_empty() {
        return Ok(());
    }
    write!(f, "Error Counts:\t\t")?;
    for (idx, (cause, count)) in failures.iter().enumerate() {
        if idx > 0 {
            write!(f, ",")?;
        }
        write!(f, "{cause}={count}")?;
    }
    writeln!(f)
}

/// Two-decimal rendering of a value scaled by 100.
struct Fixed(u64);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
