use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::config::RunConfig;
use crate::error::AppResult;
use crate::http::{PreparedRequest, build_client, execute_request};
use crate::metrics::RequesterStats;

use super::StopSignal;

/// What a session hands back to the orchestrator, exactly once.
pub type SessionReport = AppResult<RequesterStats>;

/// One sequential request loop with its own client and stats.
#[derive(Debug, Clone)]
pub struct LoadSession {
    id: usize,
    config: Arc<RunConfig>,
    stop: StopSignal,
}

impl LoadSession {
    #[must_use]
    pub const fn new(id: usize, config: Arc<RunConfig>, stop: StopSignal) -> Self {
        Self { id, config, stop }
    }

    /// Runs the loop and sends its single report, even when no request was
    /// issued.
    pub async fn run(self, results_tx: mpsc::Sender<SessionReport>) {
        let report = self.execute().await;
        if results_tx.send(report).await.is_err() {
            warn!(session = self.id, "Results channel closed before report was sent.");
        }
    }

    /// Issues requests until the run duration has elapsed or the stop
    /// signal is set.
    ///
    /// # Errors
    ///
    /// Returns an error when the session's client, request, or stats cannot
    /// be built.
    pub async fn execute(&self) -> SessionReport {
        let mut stats = RequesterStats::for_run(self.config.duration_secs())?;
        let client = build_client(&self.config.client).inspect_err(|err| {
            error!(session = self.id, "Failed to build HTTP client: {}", err);
        })?;
        let request = PreparedRequest::from_spec(&self.config.request)?;

        debug!(session = self.id, url = %request.url(), "Session started.");
        let start = Instant::now();
        while start.elapsed() <= self.config.duration && !self.stop.is_stopped() {
            let outcome = execute_request(&client, &request).await;
            stats.record_outcome(outcome);
        }
        debug!(
            session = self.id,
            successes = stats.successful_requests,
            failures = stats.failed_requests,
            "Session finished."
        );
        Ok(stats)
    }
}
