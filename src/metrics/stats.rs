use std::collections::HashMap;
use std::time::Duration;

use crate::error::MetricsError;

use super::{FailureCause, LatencyHistogram, RequestOutcome};

/// Counters and latency distribution accumulated by one load session, or by
/// the orchestrator after merging every session.
#[derive(Debug, Clone)]
pub struct RequesterStats {
    pub total_response_bytes: u64,
    /// Sum of the latencies of successful requests.
    pub total_duration: Duration,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub failures: HashMap<FailureCause, u64>,
    pub histogram: LatencyHistogram,
}

impl RequesterStats {
    /// Empty stats sized for a run of `duration_secs`.
    ///
    /// # Errors
    ///
    /// Returns an error when the latency histogram cannot be created.
    pub fn for_run(duration_secs: u64) -> Result<Self, MetricsError> {
        Ok(Self {
            total_response_bytes: 0,
            total_duration: Duration::ZERO,
            successful_requests: 0,
            failed_requests: 0,
            failures: HashMap::new(),
            histogram: LatencyHistogram::for_run(duration_secs)?,
        })
    }

    pub fn record_outcome(&mut self, outcome: RequestOutcome) {
        match outcome {
            Ok(sample) => self.record_success(sample.bytes, sample.elapsed),
            Err(cause) => self.record_failure(cause),
        }
    }

    /// Records a classified response; zero bytes counts as a failure.
    pub fn record_success(&mut self, bytes: u64, elapsed: Duration) {
        if bytes == 0 {
            self.record_failure(FailureCause::EmptyResponse);
            return;
        }
        self.total_response_bytes = self.total_response_bytes.saturating_add(bytes);
        self.total_duration = self.total_duration.saturating_add(elapsed);
        self.histogram.record_duration(elapsed);
        self.successful_requests = self.successful_requests.saturating_add(1);
    }

    pub fn record_failure(&mut self, cause: FailureCause) {
        self.failed_requests = self.failed_requests.saturating_add(1);
        let count = self.failures.entry(cause).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Folds another session's stats into this one.
    ///
    /// # Errors
    ///
    /// Returns an error when the histograms cannot be merged.
    pub fn merge(&mut self, other: &Self) -> Result<(), MetricsError> {
        self.histogram.merge(&other.histogram)?;
        self.total_response_bytes = self
            .total_response_bytes
            .saturating_add(other.total_response_bytes);
        self.total_duration = self.total_duration.saturating_add(other.total_duration);
        self.successful_requests = self
            .successful_requests
            .saturating_add(other.successful_requests);
        self.failed_requests = self.failed_requests.saturating_add(other.failed_requests);
        for (cause, count) in &other.failures {
            let total = self.failures.entry(cause.clone()).or_insert(0);
            *total = total.saturating_add(*count);
        }
        Ok(())
    }

    #[must_use]
    pub const fn total_requests(&self) -> u64 {
        self.successful_requests.saturating_add(self.failed_requests)
    }

    /// Failure breakdown ordered by cause.
    #[must_use]
    pub fn sorted_failures(&self) -> Vec<(&FailureCause, u64)> {
        let mut entries: Vec<_> = self
            .failures
            .iter()
            .map(|(cause, count)| (cause, *count))
            .collect();
        entries.sort_by(|left, right| left.0.cmp(right.0));
        entries
    }
}
