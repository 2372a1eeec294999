use std::time::Duration;

use hdrhistogram::Histogram;

use crate::error::MetricsError;

/// Significant decimal digits kept by every latency histogram.
pub const SIGNIFICANT_FIGURES: u8 = 4;

/// Latency distribution in microseconds.
///
/// Histograms for one run share the same bounds so they can be merged
/// without resizing.
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Creates a histogram tracking 1µs up to `max_micros`.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new(max_micros: u64) -> Result<Self, MetricsError> {
        let hist = Histogram::<u64>::new_with_bounds(1, max_micros.max(2), SIGNIFICANT_FIGURES)
            .map_err(|err| MetricsError::Histogram {
                context: "create",
                source: Box::new(err),
            })?;
        Ok(Self { hist })
    }

    /// Creates a histogram bounded by the run duration.
    ///
    /// # Errors
    ///
    /// Returns an error if the bound overflows or the histogram cannot be
    /// created.
    pub fn for_run(duration_secs: u64) -> Result<Self, MetricsError> {
        let max_micros = duration_secs
            .checked_mul(1_000_000)
            .ok_or(MetricsError::LatencyBoundOverflow {
                seconds: duration_secs,
            })?;
        Self::new(max_micros)
    }

    /// Records a latency, clamping into the tracked range.
    pub fn record(&mut self, latency_micros: u64) {
        self.hist.saturating_record(latency_micros.max(1));
    }

    /// Records a latency given as a [`Duration`].
    pub fn record_duration(&mut self, latency: Duration) {
        self.record(u64::try_from(latency.as_micros()).unwrap_or(u64::MAX));
    }

    /// Merge another histogram into this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the other histogram holds values outside this
    /// histogram's range.
    pub fn merge(&mut self, other: &Self) -> Result<(), MetricsError> {
        self.hist
            .add(&other.hist)
            .map_err(|err| MetricsError::Histogram {
                context: "merge",
                source: Box::new(err),
            })
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hist.is_empty()
    }

    #[must_use]
    pub fn min(&self) -> u64 {
        self.hist.min()
    }

    #[must_use]
    pub fn max(&self) -> u64 {
        self.hist.max()
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.hist.mean()
    }

    #[must_use]
    pub fn stddev(&self) -> f64 {
        self.hist.stdev()
    }

    /// Value at `quantile`, a fraction in `0.0..=1.0`.
    #[must_use]
    pub fn percentile(&self, quantile: f64) -> u64 {
        if self.hist.is_empty() {
            return 0;
        }
        self.hist.value_at_quantile(quantile)
    }

    #[cfg(test)]
    pub(crate) fn count_at(&self, value: u64) -> u64 {
        self.hist.count_at(value)
    }
}
